/* src/cli/core/src/snapshot/copy.rs */

use std::path::Path;

use anyhow::{Context, Result, bail};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct CopyStats {
  pub files: usize,
  pub bytes: u64,
}

/// Mirror every file and directory under `src` into `dst`, at any depth.
/// Existing files at the same relative path are overwritten.
pub(super) fn mirror_dir(src: &Path, dst: &Path) -> Result<CopyStats> {
  if !src.is_dir() {
    bail!("public directory {} does not exist", src.display());
  }
  let mut stats = CopyStats::default();
  mirror_into(src, dst, &mut stats)?;
  Ok(stats)
}

fn mirror_into(src: &Path, dst: &Path, stats: &mut CopyStats) -> Result<()> {
  std::fs::create_dir_all(dst).with_context(|| format!("failed to create {}", dst.display()))?;
  let mut entries = std::fs::read_dir(src)
    .with_context(|| format!("failed to read {}", src.display()))?
    .collect::<Result<Vec<_>, _>>()
    .with_context(|| format!("failed to list {}", src.display()))?;
  entries.sort_by_key(std::fs::DirEntry::file_name);

  for entry in entries {
    let from = entry.path();
    let to = dst.join(entry.file_name());
    // Follows symlinks, so linked files are copied as regular files.
    let meta =
      std::fs::metadata(&from).with_context(|| format!("failed to stat {}", from.display()))?;
    if meta.is_dir() {
      mirror_into(&from, &to, stats)?;
    } else {
      stats.bytes += std::fs::copy(&from, &to)
        .with_context(|| format!("failed to copy {} to {}", from.display(), to.display()))?;
      stats.files += 1;
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mirrors_nested_tree() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(src.path().join("a/b/c")).unwrap();
    std::fs::create_dir_all(src.path().join("empty")).unwrap();
    std::fs::write(src.path().join("top.txt"), "top").unwrap();
    std::fs::write(src.path().join("a/b/c/deep.bin"), [1u8, 2, 3]).unwrap();

    let stats = mirror_dir(src.path(), dst.path()).unwrap();
    assert_eq!(stats, CopyStats { files: 2, bytes: 6 });
    assert_eq!(std::fs::read(dst.path().join("top.txt")).unwrap(), b"top");
    assert_eq!(std::fs::read(dst.path().join("a/b/c/deep.bin")).unwrap(), vec![1u8, 2, 3]);
    assert!(dst.path().join("empty").is_dir());
  }

  #[test]
  fn later_copy_overwrites() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    std::fs::write(dst.path().join("x.css"), "old old old").unwrap();
    std::fs::write(src.path().join("x.css"), "new").unwrap();
    mirror_dir(src.path(), dst.path()).unwrap();
    assert_eq!(std::fs::read_to_string(dst.path().join("x.css")).unwrap(), "new");
  }

  #[test]
  fn missing_source_fails() {
    let dst = tempfile::tempdir().unwrap();
    let err = mirror_dir(&dst.path().join("nope"), dst.path()).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
  }
}
