/* src/cli/core/src/serve.rs */

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use folio_server::FolioServer;
use folio_server_axum::IntoAxumRouter;

use crate::config::FolioConfig;
use crate::content::load_page;
use crate::network::listen_addr;
use crate::snapshot::BUILD_HINT;
use crate::ui;

/// Port precedence: `--port` flag, then the `PORT` env var, then `[server] port`.
fn resolve_port(flag: Option<u16>, env: Option<&str>, configured: u16) -> Result<u16> {
  if let Some(port) = flag {
    return Ok(port);
  }
  match env.map(str::trim).filter(|v| !v.is_empty()) {
    Some(raw) => raw.parse().with_context(|| format!("PORT must be a port number, got \"{raw}\"")),
    None => Ok(configured),
  }
}

pub async fn run_serve(
  config: &FolioConfig,
  base_dir: &Path,
  port_flag: Option<u16>,
) -> Result<()> {
  let page = load_page(base_dir, config)?;
  let env_port = std::env::var("PORT").ok();
  let port = resolve_port(port_flag, env_port.as_deref(), config.server.port)?;
  let addr = listen_addr(&config.server.host, port);

  let mut server = FolioServer::new(page);
  let public_dir = base_dir.join(&config.site.public_dir);
  if public_dir.is_dir() {
    ui::arrow(&format!("static assets from {}", public_dir.display()));
    let bundle = public_dir.join(&config.site.controller_bundle);
    if !bundle.is_file() {
      ui::warn(&format!(
        "{} not found, tabs and the contact form will not work",
        bundle.display()
      ));
      ui::detail(BUILD_HINT);
    }
    server = server.public_dir(public_dir);
  } else {
    ui::warn(&format!("{} not found, serving the page without assets", public_dir.display()));
  }

  server
    .serve(&addr)
    .await
    .map_err(|e| anyhow!(e))
    .with_context(|| format!("failed to serve on {addr}"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flag_beats_env_and_config() {
    assert_eq!(resolve_port(Some(8080), Some("9000"), 3000).unwrap(), 8080);
  }

  #[test]
  fn env_beats_config() {
    assert_eq!(resolve_port(None, Some("9000"), 3000).unwrap(), 9000);
    assert_eq!(resolve_port(None, Some(" 9001 "), 3000).unwrap(), 9001);
  }

  #[test]
  fn config_is_the_fallback() {
    assert_eq!(resolve_port(None, None, 3000).unwrap(), 3000);
    assert_eq!(resolve_port(None, Some(""), 4000).unwrap(), 4000);
  }

  #[test]
  fn garbage_env_is_an_error() {
    let err = resolve_port(None, Some("eighty"), 3000).unwrap_err();
    assert!(err.to_string().contains("eighty"));
    assert!(resolve_port(None, Some("70000"), 3000).is_err());
  }
}
