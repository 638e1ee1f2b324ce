/* src/server/engine/rust/src/lib.rs */

pub mod escape;
pub mod model;
pub mod render;
pub mod roman;

// Public API re-exports
pub use escape::{ascii_escape_json, escape_html, script_safe_json};
pub use model::{
  ContactCopy, Identity, PageAssets, PageData, PageError, PanelKind, Project, RichText, Skill,
  SocialLink, Tab,
};
pub use render::render_page;
pub use roman::to_roman;
