/* src/cli/core/src/snapshot/rewrite.rs */

use anyhow::{Context, Result};
use regex::Regex;

// ` href="/x"` or ` src="/x"` attributes, but not protocol-relative `href="//host"`
// and not `data-href` style attributes.
const ROOT_RELATIVE: &str = r#"(\s(?:href|src))="/([^/])"#;

/// Make root-relative `href`/`src` references relative, so the snapshot works
/// when hosted under a sub-path.
///
/// One left-to-right pass over the document: each reference loses exactly one
/// leading slash, and output is never fed back into the pattern.
pub(super) fn relativize_paths(html: &str) -> Result<String> {
  let re = Regex::new(ROOT_RELATIVE).context("invalid rewrite pattern")?;
  Ok(re.replace_all(html, r#"$1="$2"#).into_owned())
}
