/* src/client/controller/rust/src/config.rs */

// Client configuration embedded into the rendered page as a JSON data script.
// The server serializes it, the browser binding deserializes it on startup.

use serde::{Deserialize, Serialize};

/// Element ids and class hooks shared by the renderer and the browser binding.
pub mod ids {
  /// Id of the `<script type="application/json">` carrying `ControllerConfig`.
  pub const CONFIG_SCRIPT: &str = "__folio";
  pub const FORM: &str = "contact-form";
  pub const SUBMIT_BUTTON: &str = "submit-button";
  pub const FORM_STATUS: &str = "form-status";
  pub const TAB_BUTTON_CLASS: &str = "tab-button";
  pub const TAB_PANEL_CLASS: &str = "tab-content";
  pub const ACTIVE_CLASS: &str = "active";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
  /// Declared tab ids in display order.
  #[serde(default)]
  pub tabs: Vec<String>,
  #[serde(default)]
  pub transition: Transition,
  #[serde(default)]
  pub form: FormConfig,
  /// Public key passed to the relay SDK's `init`, when the SDK needs one.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub public_key: Option<String>,
}

/// Entrance animation played on a newly shown panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
  #[serde(default = "default_duration_ms")]
  pub duration_ms: u32,
  /// Initial downward offset in pixels, interpolated to zero.
  #[serde(default = "default_offset_px")]
  pub offset_px: u32,
  #[serde(default = "default_easing")]
  pub easing: String,
}

impl Default for Transition {
  fn default() -> Self {
    Self {
      duration_ms: default_duration_ms(),
      offset_px: default_offset_px(),
      easing: default_easing(),
    }
  }
}

fn default_duration_ms() -> u32 {
  300
}

fn default_offset_px() -> u32 {
  10
}

fn default_easing() -> String {
  "ease-out".to_string()
}

/// Service/template pair identifying where the relay delivers a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRoute {
  #[serde(default)]
  pub service_id: String,
  #[serde(default)]
  pub template_id: String,
}

impl RelayRoute {
  pub fn is_configured(&self) -> bool {
    !self.service_id.trim().is_empty() && !self.template_id.trim().is_empty()
  }
}

/// How the payload reaches the relay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendShape {
  /// Explicit flat key-value payload.
  #[default]
  Payload,
  /// Relay extracts the values from the form's named fields.
  Form,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
  #[serde(default)]
  pub route: RelayRoute,
  #[serde(default)]
  pub shape: SendShape,
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
  #[serde(default = "default_true")]
  pub include_timestamp: bool,
  #[serde(default)]
  pub messages: StatusMessages,
  #[serde(default)]
  pub labels: SubmitLabels,
}

impl Default for FormConfig {
  fn default() -> Self {
    Self {
      route: RelayRoute::default(),
      shape: SendShape::default(),
      timeout_ms: default_timeout_ms(),
      include_timestamp: true,
      messages: StatusMessages::default(),
      labels: SubmitLabels::default(),
    }
  }
}

fn default_timeout_ms() -> u64 {
  15_000
}

fn default_true() -> bool {
  true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessages {
  #[serde(default = "default_success")]
  pub success: String,
  #[serde(default = "default_failure")]
  pub failure: String,
  #[serde(default = "default_unavailable")]
  pub unavailable: String,
  #[serde(default = "default_timeout")]
  pub timeout: String,
  #[serde(default = "default_missing")]
  pub missing_fields: String,
}

impl Default for StatusMessages {
  fn default() -> Self {
    Self {
      success: default_success(),
      failure: default_failure(),
      unavailable: default_unavailable(),
      timeout: default_timeout(),
      missing_fields: default_missing(),
    }
  }
}

fn default_success() -> String {
  "Your message has been sent successfully!".to_string()
}

fn default_failure() -> String {
  "Sorry, there was an error sending your message.".to_string()
}

fn default_unavailable() -> String {
  "Email service not available. Please try again later or contact directly via email.".to_string()
}

fn default_timeout() -> String {
  "The email service did not respond in time. Please try again.".to_string()
}

fn default_missing() -> String {
  "Please fill in every field before sending.".to_string()
}

/// Submit button markup for the idle and busy states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitLabels {
  #[serde(default = "default_idle_label")]
  pub idle: String,
  #[serde(default = "default_busy_label")]
  pub busy: String,
}

impl Default for SubmitLabels {
  fn default() -> Self {
    Self { idle: default_idle_label(), busy: default_busy_label() }
  }
}

fn default_idle_label() -> String {
  r#"<i class="fas fa-paper-plane"></i> Send Message"#.to_string()
}

fn default_busy_label() -> String {
  r#"<i class="fas fa-spinner fa-spin"></i> Sending..."#.to_string()
}
