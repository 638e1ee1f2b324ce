/* src/cli/core/src/main.rs */

mod config;
mod content;
mod network;
mod serve;
mod snapshot;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use config::{FolioConfig, find_folio_config, load_folio_config};

#[derive(Parser)]
#[command(name = "folio", about = "Portfolio page server and static snapshot tool")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the portfolio page and its static assets
  Serve {
    /// Path to folio.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Port to listen on (overrides PORT and [server] port)
    #[arg(short, long)]
    port: Option<u16>,
  },
  /// Render the page once and write a static site for hosting
  Snapshot {
    /// Path to folio.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
}

/// Resolve config (explicit, found upward, or defaults) and the directory
/// every relative path in it is resolved against.
fn resolve_config(explicit: Option<PathBuf>) -> Result<(PathBuf, FolioConfig)> {
  if let Some(path) = explicit {
    let config = load_folio_config(&path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
    return Ok((base_dir, config));
  }

  let cwd = std::env::current_dir().context("failed to get cwd")?;
  match find_folio_config(&cwd) {
    Ok(path) => {
      let config = load_folio_config(&path)?;
      ui::arrow(&format!("using {}", path.display()));
      let base_dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
      Ok((base_dir, config))
    }
    Err(_) => Ok((cwd, FolioConfig::default())),
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Command::Serve { config, port } => {
      ui::banner("serve");
      let (base_dir, folio_config) = resolve_config(config)?;
      serve::run_serve(&folio_config, &base_dir, port).await?;
    }
    Command::Snapshot { config } => {
      ui::banner("snapshot");
      let (base_dir, folio_config) = resolve_config(config)?;
      let page = content::load_page(&base_dir, &folio_config)?;
      let opts = snapshot::SnapshotOptions::from_config(&base_dir, &folio_config);
      let report = match snapshot::run_snapshot(page, &opts).await {
        Ok(report) => report,
        Err(e) => {
          ui::blank();
          ui::fail(&format!("{e:#}"));
          return Err(e);
        }
      };
      ui::blank();
      ui::ok(&format!(
        "snapshot written to {} in {:.1}s",
        report.out_dir.display(),
        report.elapsed.as_secs_f64()
      ));
      ui::detail(&format!(
        "{} asset files, {} total",
        report.asset_files,
        ui::format_size(report.total_bytes)
      ));
    }
  }

  Ok(())
}
