/* src/server/core/rust/src/server.rs */

use std::path::PathBuf;
use std::sync::Arc;

use folio_engine::{PageData, render_page};

use crate::errors::FolioError;

/// Framework-agnostic parts extracted from `FolioServer`.
/// Adapter crates consume this to build framework-specific routers.
#[derive(Debug, Clone)]
pub struct FolioParts {
  pub page: Arc<PageData>,
  /// Directory served verbatim for every path other than `/`.
  pub public_dir: Option<PathBuf>,
}

impl FolioParts {
  /// Fresh render of the entry document; nothing is cached between calls.
  pub fn render_index(&self) -> String {
    render_page(&self.page)
  }
}

pub struct FolioServer {
  page: Arc<PageData>,
  public_dir: Option<PathBuf>,
}

impl FolioServer {
  pub fn new(page: impl Into<Arc<PageData>>) -> Self {
    Self { page: page.into(), public_dir: None }
  }

  pub fn public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.public_dir = Some(dir.into());
    self
  }

  /// Consume the builder, checking the page data and the asset directory.
  pub fn into_parts(self) -> Result<FolioParts, FolioError> {
    self.page.validate().map_err(|e| FolioError::invalid_page(e.to_string()))?;
    if let Some(ref dir) = self.public_dir
      && !dir.is_dir()
    {
      return Err(FolioError::missing_public_dir(dir));
    }
    Ok(FolioParts { page: self.page, public_dir: self.public_dir })
  }
}
