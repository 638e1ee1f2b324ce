/* src/cli/core/src/snapshot/mod.rs */

// Static snapshot: copy assets, boot the server in-process, fetch `/` once,
// relativize paths, write the entry document and markers, stop the server.

mod copy;
mod fetch;
mod output;
mod rewrite;


use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow, bail};
use folio_server::{FolioError, FolioServer, PageData};
use folio_server_axum::{IntoAxumRouter, spawn_router};

pub use fetch::FetchPolicy;

use crate::config::FolioConfig;
use crate::network::{listen_addr, wait_for_addr};
use crate::ui;
use output::Staging;

/// How to produce the controller bundle the page's boot script imports.
pub(crate) const BUILD_HINT: &str = "build it with `wasm-pack build src/client/controller/wasm \
                                     --target web --out-dir ../../../../public/pkg`";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
  CopyAssets,
  StartServer,
  FetchPage,
  RewritePaths,
  WriteOutput,
  StopServer,
}

impl Step {
  const TOTAL: u32 = 6;

  fn number(self) -> u32 {
    match self {
      Self::CopyAssets => 1,
      Self::StartServer => 2,
      Self::FetchPage => 3,
      Self::RewritePaths => 4,
      Self::WriteOutput => 5,
      Self::StopServer => 6,
    }
  }

  fn announce(self) {
    ui::step(self.number(), Self::TOTAL, &self.to_string());
  }

  fn failed(self) -> String {
    format!("{self} failed")
  }
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::CopyAssets => "copy assets",
      Self::StartServer => "start server",
      Self::FetchPage => "fetch page",
      Self::RewritePaths => "rewrite paths",
      Self::WriteOutput => "write output",
      Self::StopServer => "stop server",
    };
    f.write_str(name)
  }
}

/// Resolved inputs of one snapshot run.
#[derive(Debug, Clone)]
pub struct SnapshotOptions {
  pub project_root: PathBuf,
  pub public_dir: PathBuf,
  pub out_dir: PathBuf,
  /// Controller JS glue, relative to `public_dir`.
  pub controller_bundle: PathBuf,
  /// Missing bundle fails the copy step instead of warning.
  pub require_bundle: bool,
  pub custom_domain: Option<String>,
  /// Interface the temporary server binds; the port is picked by the OS.
  pub host: String,
  pub ready_timeout: Duration,
  pub fetch: FetchPolicy,
}

impl SnapshotOptions {
  pub fn from_config(base_dir: &Path, config: &FolioConfig) -> Self {
    let snapshot = &config.snapshot;
    Self {
      project_root: base_dir.to_path_buf(),
      public_dir: base_dir.join(&config.site.public_dir),
      out_dir: base_dir.join(&snapshot.out_dir),
      controller_bundle: PathBuf::from(&config.site.controller_bundle),
      require_bundle: snapshot.require_bundle,
      custom_domain: snapshot.custom_domain.clone(),
      host: config.server.host.clone(),
      ready_timeout: Duration::from_millis(snapshot.ready_timeout_ms),
      fetch: FetchPolicy {
        attempts: snapshot.fetch_attempts,
        backoff: Duration::from_millis(snapshot.fetch_backoff_ms),
        timeout: Duration::from_millis(snapshot.fetch_timeout_ms),
      },
    }
  }
}

#[derive(Debug)]
pub struct SnapshotReport {
  pub out_dir: PathBuf,
  pub asset_files: usize,
  pub total_bytes: u64,
  pub elapsed: Duration,
}

/// Run the whole pipeline. Output appears at `opts.out_dir` only when every
/// step succeeded; on failure the previous output (if any) is left as it was.
pub async fn run_snapshot(page: PageData, opts: &SnapshotOptions) -> Result<SnapshotReport> {
  let public_dir = opts.public_dir.clone();
  snapshot_router(opts, move || FolioServer::new(page).public_dir(public_dir).into_axum_router())
    .await
}

/// Pipeline over whatever router `build_router` yields; it is called at the
/// start-server step so its errors are reported there.
async fn snapshot_router<F>(opts: &SnapshotOptions, build_router: F) -> Result<SnapshotReport>
where
  F: FnOnce() -> Result<axum::Router, FolioError>,
{
  let started = Instant::now();
  output::check_output_dir(&opts.out_dir, &opts.public_dir, &opts.project_root)?;
  let staging = Staging::create(&opts.out_dir)?;

  Step::CopyAssets.announce();
  let copied =
    copy::mirror_dir(&opts.public_dir, staging.path()).with_context(|| Step::CopyAssets.failed())?;
  ui::detail_ok(&format!(
    "{} files, {} from {}",
    copied.files,
    ui::format_size(copied.bytes),
    opts.public_dir.display()
  ));
  check_bundle(&staging, opts).with_context(|| Step::CopyAssets.failed())?;

  Step::StartServer.announce();
  let router =
    build_router().map_err(|e| anyhow!(e)).with_context(|| Step::StartServer.failed())?;
  let handle = spawn_router(router, &listen_addr(&opts.host, 0))
    .await
    .map_err(|e| anyhow!(e))
    .with_context(|| Step::StartServer.failed())?;
  let url = handle.url();
  ui::detail_ok(&format!("listening on {url}"));

  let written = async {
    wait_for_addr(handle.local_addr(), opts.ready_timeout)
      .await
      .with_context(|| Step::StartServer.failed())?;

    Step::FetchPage.announce();
    let html =
      fetch::fetch_page(&url, &opts.fetch).await.with_context(|| Step::FetchPage.failed())?;
    ui::detail_ok(&format!("GET {url} ({})", ui::format_size(html.len() as u64)));

    Step::RewritePaths.announce();
    let html = rewrite::relativize_paths(&html).with_context(|| Step::RewritePaths.failed())?;

    Step::WriteOutput.announce();
    let bytes = staging
      .write_entry(&html, opts.custom_domain.as_deref())
      .with_context(|| Step::WriteOutput.failed())?;
    ui::detail_ok(output::ENTRY_FILE);
    ui::detail_ok(output::NO_PREPROCESS_MARKER);
    if let Some(ref domain) = opts.custom_domain {
      ui::detail_ok(&format!("{} ({domain})", output::DOMAIN_MARKER));
    }
    anyhow::Ok(bytes)
  }
  .await;

  // The listener is released on every path, not only on success.
  Step::StopServer.announce();
  let stopped = handle.stop().await.with_context(|| Step::StopServer.failed());
  let entry_bytes = written?;
  stopped?;

  let out_dir = staging.publish().with_context(|| Step::WriteOutput.failed())?;
  Ok(SnapshotReport {
    out_dir,
    asset_files: copied.files,
    total_bytes: copied.bytes + entry_bytes,
    elapsed: started.elapsed(),
  })
}

/// The page is inert without the controller bundle, so by default its
/// absence from the copied assets fails the run.
fn check_bundle(staging: &Staging, opts: &SnapshotOptions) -> Result<()> {
  if staging.path().join(&opts.controller_bundle).is_file() {
    return Ok(());
  }
  let missing = opts.public_dir.join(&opts.controller_bundle);
  if opts.require_bundle {
    bail!("controller bundle {} is missing; {BUILD_HINT}", missing.display());
  }
  ui::warn(&format!("{} not found, tabs and the contact form will not work", missing.display()));
  Ok(())
}
