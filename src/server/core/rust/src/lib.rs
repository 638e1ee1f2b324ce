/* src/server/core/rust/src/lib.rs */

pub mod errors;
pub mod server;

// Re-exports for ergonomic use
pub use errors::FolioError;
pub use folio_engine;
pub use folio_engine::{PageData, render_page};
pub use server::{FolioParts, FolioServer};
