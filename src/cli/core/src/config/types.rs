/* src/cli/core/src/config/types.rs */

use anyhow::{Result, bail};
use folio_controller::SendShape;
use serde::Deserialize;

/// Parsed `folio.toml`. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolioConfig {
  #[serde(default)]
  pub site: SiteSection,
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub snapshot: SnapshotSection,
  #[serde(default)]
  pub relay: RelaySection,
}

impl FolioConfig {
  pub fn validate(&self) -> Result<()> {
    self.site.validate()?;
    self.snapshot.validate()?;
    self.relay.validate()
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
  /// TOML file with the page content; the built-in sample is used when unset.
  pub content: Option<String>,
  #[serde(default = "default_public_dir")]
  pub public_dir: String,
  /// Controller JS glue, relative to `public_dir`; the page's boot script imports it.
  #[serde(default = "default_controller_bundle")]
  pub controller_bundle: String,
}

impl Default for SiteSection {
  fn default() -> Self {
    Self {
      content: None,
      public_dir: default_public_dir(),
      controller_bundle: default_controller_bundle(),
    }
  }
}

impl SiteSection {
  pub fn validate(&self) -> Result<()> {
    let bundle = self.controller_bundle.trim();
    if bundle.is_empty() || bundle.starts_with('/') || bundle.split('/').any(|part| part == "..") {
      bail!(
        "site.controller_bundle must be a path inside public_dir, got {:?}",
        self.controller_bundle
      );
    }
    Ok(())
  }
}

fn default_public_dir() -> String {
  "public".to_string()
}

fn default_controller_bundle() -> String {
  "pkg/folio_controller_wasm.js".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
}

impl Default for ServerSection {
  fn default() -> Self {
    Self { host: default_host(), port: default_port() }
  }
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  3000
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotSection {
  #[serde(default = "default_out_dir")]
  pub out_dir: String,
  /// Written verbatim into `CNAME` when set.
  pub custom_domain: Option<String>,
  #[serde(default = "default_ready_timeout_ms")]
  pub ready_timeout_ms: u64,
  #[serde(default = "default_fetch_attempts")]
  pub fetch_attempts: u32,
  #[serde(default = "default_fetch_backoff_ms")]
  pub fetch_backoff_ms: u64,
  #[serde(default = "default_fetch_timeout_ms")]
  pub fetch_timeout_ms: u64,
  /// Fail the run when `site.controller_bundle` is missing; `false` only warns.
  #[serde(default = "default_true")]
  pub require_bundle: bool,
}

impl Default for SnapshotSection {
  fn default() -> Self {
    Self {
      out_dir: default_out_dir(),
      custom_domain: None,
      ready_timeout_ms: default_ready_timeout_ms(),
      fetch_attempts: default_fetch_attempts(),
      fetch_backoff_ms: default_fetch_backoff_ms(),
      fetch_timeout_ms: default_fetch_timeout_ms(),
      require_bundle: true,
    }
  }
}

impl SnapshotSection {
  pub fn validate(&self) -> Result<()> {
    if self.out_dir.trim().is_empty() {
      bail!("snapshot.out_dir must not be empty");
    }
    if let Some(ref domain) = self.custom_domain
      && (domain.is_empty() || domain.contains(|c: char| c.is_whitespace() || c == '/'))
    {
      bail!("snapshot.custom_domain must be a bare host name, got {domain:?}");
    }
    if self.fetch_attempts == 0 {
      bail!("snapshot.fetch_attempts must be at least 1");
    }
    if self.ready_timeout_ms == 0 || self.fetch_timeout_ms == 0 {
      bail!("snapshot timeouts must be greater than zero");
    }
    Ok(())
  }
}

fn default_out_dir() -> String {
  "dist/static".to_string()
}

fn default_ready_timeout_ms() -> u64 {
  5_000
}

fn default_fetch_attempts() -> u32 {
  5
}

fn default_fetch_backoff_ms() -> u64 {
  100
}

fn default_fetch_timeout_ms() -> u64 {
  10_000
}

fn default_true() -> bool {
  true
}

/// Email relay routing. These identifiers are public by the relay's design.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelaySection {
  pub public_key: Option<String>,
  pub service_id: Option<String>,
  pub template_id: Option<String>,
  pub timeout_ms: Option<u64>,
  pub shape: Option<SendShape>,
  pub include_timestamp: Option<bool>,
  /// SDK script URL; an empty string drops the script tag.
  pub sdk_url: Option<String>,
}

impl RelaySection {
  pub fn validate(&self) -> Result<()> {
    if self.timeout_ms == Some(0) {
      bail!("relay.timeout_ms must be greater than zero");
    }
    if self.service_id.is_some() != self.template_id.is_some() {
      bail!("relay.service_id and relay.template_id must be set together");
    }
    Ok(())
  }
}
