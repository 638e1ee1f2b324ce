/* src/cli/core/src/snapshot/output.rs */

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};

pub(super) const ENTRY_FILE: &str = "index.html";
/// Zero-byte marker that turns off the host's static-site preprocessing.
pub(super) const NO_PREPROCESS_MARKER: &str = ".nojekyll";
pub(super) const DOMAIN_MARKER: &str = "CNAME";

/// Lexically resolve `.` and `..` in an absolute path.
fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        out.pop();
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}

fn absolute(path: &Path) -> Result<PathBuf> {
  if path.is_absolute() {
    return Ok(normalize(path));
  }
  let cwd = std::env::current_dir().context("failed to get cwd")?;
  Ok(normalize(&cwd.join(path)))
}

/// Refuse output locations that would delete the project or feed the
/// snapshot back into its own asset source.
pub(super) fn check_output_dir(out_dir: &Path, public_dir: &Path, project_root: &Path) -> Result<()> {
  let out = absolute(out_dir)?;
  let public = absolute(public_dir)?;
  let root = absolute(project_root)?;
  if out == root {
    bail!("output directory {} is the project root", out.display());
  }
  if out.starts_with(&public) {
    bail!("output directory {} is inside the public directory {}", out.display(), public.display());
  }
  if public.starts_with(&out) {
    bail!("output directory {} contains the public directory {}", out.display(), public.display());
  }
  if out.exists() && !out.is_dir() {
    bail!("output path {} exists and is not a directory", out.display());
  }
  Ok(())
}

/// Sibling directory the snapshot is assembled in. It only replaces the
/// output directory through [`Staging::publish`]; dropping it unpublished
/// removes it and leaves any previous output untouched.
pub(super) struct Staging {
  dir: PathBuf,
  target: PathBuf,
  published: bool,
}

impl Staging {
  pub(super) fn create(target: &Path) -> Result<Self> {
    let target = absolute(target)?;
    let parent = target.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("/"));
    let name = target
      .file_name()
      .with_context(|| format!("output directory {} has no name", target.display()))?
      .to_string_lossy()
      .into_owned();
    std::fs::create_dir_all(&parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;

    let dir = parent.join(format!(".{name}.staging-{}", std::process::id()));
    remove_dir_if_exists(&dir)?;
    std::fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    Ok(Self { dir, target, published: false })
  }

  pub(super) fn path(&self) -> &Path {
    &self.dir
  }

  /// Write the entry document and marker files.
  pub(super) fn write_entry(&self, html: &str, custom_domain: Option<&str>) -> Result<u64> {
    let entry = self.dir.join(ENTRY_FILE);
    std::fs::write(&entry, html).with_context(|| format!("failed to write {}", entry.display()))?;
    let marker = self.dir.join(NO_PREPROCESS_MARKER);
    std::fs::write(&marker, b"").with_context(|| format!("failed to write {}", marker.display()))?;
    if let Some(domain) = custom_domain {
      let cname = self.dir.join(DOMAIN_MARKER);
      std::fs::write(&cname, domain)
        .with_context(|| format!("failed to write {}", cname.display()))?;
    }
    Ok(html.len() as u64)
  }

  /// Swap the staged tree into the output location, replacing whatever was
  /// there before. Stale files from earlier runs do not survive.
  pub(super) fn publish(mut self) -> Result<PathBuf> {
    let backup = self.dir.with_file_name(format!(
      ".{}.previous-{}",
      self.target.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
      std::process::id()
    ));
    let had_previous = self.target.exists();
    if had_previous {
      remove_dir_if_exists(&backup)?;
      std::fs::rename(&self.target, &backup)
        .with_context(|| format!("failed to move aside {}", self.target.display()))?;
    }
    if let Err(e) = std::fs::rename(&self.dir, &self.target) {
      if had_previous {
        let _ = std::fs::rename(&backup, &self.target);
      }
      return Err(e).with_context(|| format!("failed to publish {}", self.target.display()));
    }
    self.published = true;
    if had_previous {
      remove_dir_if_exists(&backup)?;
    }
    Ok(self.target.clone())
  }
}

impl Drop for Staging {
  fn drop(&mut self) {
    if !self.published {
      let _ = std::fs::remove_dir_all(&self.dir);
    }
  }
}

fn remove_dir_if_exists(path: &Path) -> Result<()> {
  if path.exists() {
    std::fs::remove_dir_all(path).with_context(|| format!("failed to remove {}", path.display()))?;
  }
  Ok(())
}
