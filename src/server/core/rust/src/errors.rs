/* src/server/core/rust/src/errors.rs */

use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub struct FolioError {
  code: &'static str,
  message: String,
}

impl FolioError {
  pub fn new(code: &'static str, message: impl Into<String>) -> Self {
    Self { code, message: message.into() }
  }

  pub fn invalid_page(msg: impl Into<String>) -> Self {
    Self::new("INVALID_PAGE", msg)
  }

  pub fn missing_public_dir(path: &Path) -> Self {
    Self::new("PUBLIC_DIR_MISSING", format!("{} is not a directory", path.display()))
  }

  pub fn code(&self) -> &str {
    self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}

impl fmt::Display for FolioError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for FolioError {}
