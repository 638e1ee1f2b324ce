/* src/server/engine/rust/src/model.rs */

use std::fmt;

use folio_controller::ControllerConfig;
use serde::{Deserialize, Serialize};

/// Author-supplied HTML fragment, inserted into the page verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(pub String);

impl RichText {
  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_blank(&self) -> bool {
    self.0.trim().is_empty()
  }
}

impl From<&str> for RichText {
  fn from(html: &str) -> Self {
    Self(html.to_string())
  }
}

/// Everything the portfolio page shows. Built once at startup, then shared
/// read-only between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData {
  pub identity: Identity,
  /// Free text; paragraphs are separated by a blank line.
  #[serde(default)]
  pub bio: String,
  #[serde(default)]
  pub social: Vec<SocialLink>,
  #[serde(default)]
  pub skills: Vec<Skill>,
  #[serde(default)]
  pub projects: Vec<Project>,
  #[serde(default = "default_tabs")]
  pub tabs: Vec<Tab>,
  #[serde(default)]
  pub contact: ContactCopy,
  #[serde(default)]
  pub assets: PageAssets,
  #[serde(default)]
  pub client: ControllerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  pub name: String,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub affiliation: Option<String>,
  /// Profile picture path or URL.
  #[serde(default)]
  pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
  pub platform: String,
  pub url: String,
  /// Icon classes; defaults to the brand icon named after the platform.
  #[serde(default)]
  pub icon: Option<String>,
}

impl SocialLink {
  pub fn icon_class(&self) -> String {
    match self.icon {
      Some(ref icon) => icon.clone(),
      None => format!("fab fa-{}", self.platform.to_ascii_lowercase()),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
  pub name: String,
  pub icon: String,
  #[serde(default)]
  pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
  pub title: String,
  pub description: RichText,
  #[serde(default)]
  pub tech: Vec<String>,
  #[serde(default)]
  pub github: Option<String>,
  #[serde(default)]
  pub demo: Option<String>,
  #[serde(default)]
  pub features: Vec<String>,
  #[serde(default)]
  pub image: Option<String>,
  #[serde(default)]
  pub note: Option<RichText>,
  #[serde(default)]
  pub acknowledgment: Option<RichText>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
  Home,
  Projects,
  Skills,
  Contact,
}

impl PanelKind {
  /// Identifier used for `data-tab` and the `tab-{id}` panel class.
  pub fn id(self) -> &'static str {
    match self {
      Self::Home => "home",
      Self::Projects => "projects",
      Self::Skills => "skills",
      Self::Contact => "contact",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
  pub panel: PanelKind,
  pub label: String,
  pub icon: String,
}

impl Tab {
  fn new(panel: PanelKind, label: &str, icon: &str) -> Self {
    Self { panel, label: label.to_string(), icon: icon.to_string() }
  }
}

fn default_tabs() -> Vec<Tab> {
  vec![
    Tab::new(PanelKind::Home, "Home", "fas fa-home"),
    Tab::new(PanelKind::Projects, "Projects", "fas fa-code-branch"),
    Tab::new(PanelKind::Skills, "Skills", "fas fa-cogs"),
    Tab::new(PanelKind::Contact, "Contact", "fas fa-envelope"),
  ]
}

/// Fixed copy of the contact panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactCopy {
  pub heading: String,
  pub intro: String,
  pub form_heading: String,
  pub form_intro: String,
  pub response_time: String,
}

impl Default for ContactCopy {
  fn default() -> Self {
    Self {
      heading: "Get In Touch".into(),
      intro: "Have a question or want to work together? Fill out the form below and I'll get back \
              to you as soon as possible."
        .into(),
      form_heading: "Send Me a Message".into(),
      form_intro: "I'll respond to your message as soon as possible".into(),
      response_time: "I typically respond within 24-48 business hours".into(),
    }
  }
}

/// Stylesheets and scripts referenced from `<head>` and the end of `<body>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageAssets {
  pub stylesheets: Vec<String>,
  /// Relay SDK script; omitted from the page when unset.
  pub relay_sdk: Option<String>,
  /// Module script that loads the browser controller.
  pub boot_script: String,
}

impl Default for PageAssets {
  fn default() -> Self {
    Self {
      stylesheets: vec![
        "/stylesheets/styles.css".into(),
        "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css".into(),
      ],
      relay_sdk: Some("https://cdn.emailjs.com/dist/email.min.js?v=3.11".into()),
      boot_script: "/javascripts/boot.js".into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
  BlankName,
  NoTabs,
  DuplicateTab(PanelKind),
  /// Two social links name the same platform (compared case-insensitively).
  DuplicatePlatform(String),
}

impl fmt::Display for PageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::BlankName => write!(f, "identity.name must not be blank"),
      Self::NoTabs => write!(f, "at least one tab must be declared"),
      Self::DuplicateTab(kind) => write!(f, "tab \"{}\" is declared twice", kind.id()),
      Self::DuplicatePlatform(platform) => {
        write!(f, "social platform \"{platform}\" is listed twice")
      }
    }
  }
}

impl std::error::Error for PageError {}

impl PageData {
  /// Page with the given identity and every other section empty.
  pub fn new(identity: Identity) -> Self {
    Self {
      identity,
      bio: String::new(),
      social: Vec::new(),
      skills: Vec::new(),
      projects: Vec::new(),
      tabs: default_tabs(),
      contact: ContactCopy::default(),
      assets: PageAssets::default(),
      client: ControllerConfig::default(),
    }
  }

  pub fn validate(&self) -> Result<(), PageError> {
    if self.identity.name.trim().is_empty() {
      return Err(PageError::BlankName);
    }
    if self.tabs.is_empty() {
      return Err(PageError::NoTabs);
    }
    for (i, tab) in self.tabs.iter().enumerate() {
      if self.tabs[..i].iter().any(|t| t.panel == tab.panel) {
        return Err(PageError::DuplicateTab(tab.panel));
      }
    }
    for (i, link) in self.social.iter().enumerate() {
      let platform = link.platform.trim();
      if self.social[..i].iter().any(|l| l.platform.trim().eq_ignore_ascii_case(platform)) {
        return Err(PageError::DuplicatePlatform(link.platform.clone()));
      }
    }
    Ok(())
  }

  pub fn has_panel(&self, panel: PanelKind) -> bool {
    self.tabs.iter().any(|t| t.panel == panel)
  }

  /// Controller configuration as embedded in the page, with the tab set
  /// taken from the declared tabs.
  pub fn controller_config(&self) -> ControllerConfig {
    ControllerConfig {
      tabs: self.tabs.iter().map(|t| t.panel.id().to_string()).collect(),
      ..self.client.clone()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn page() -> PageData {
    PageData::new(Identity { name: "Ada Lovelace".into(), ..Identity::default() })
  }

  #[test]
  fn default_tabs_are_valid() {
    assert_eq!(page().validate(), Ok(()));
    let ids: Vec<&str> = page().tabs.iter().map(|t| t.panel.id()).collect();
    assert_eq!(ids, vec!["home", "projects", "skills", "contact"]);
  }

  #[test]
  fn rejects_empty_and_duplicate_tabs() {
    let mut data = page();
    data.tabs.clear();
    assert_eq!(data.validate(), Err(PageError::NoTabs));

    let mut data = page();
    data.tabs.push(data.tabs[1].clone());
    assert_eq!(data.validate(), Err(PageError::DuplicateTab(PanelKind::Projects)));
  }

  #[test]
  fn rejects_repeated_social_platform() {
    let link = |platform: &str, url: &str| SocialLink {
      platform: platform.into(),
      url: url.into(),
      icon: None,
    };
    let mut data = page();
    data.social =
      vec![link("GitHub", "https://github.com/a"), link("LinkedIn", "https://l.example")];
    assert_eq!(data.validate(), Ok(()));

    data.social.push(link("github ", "https://github.com/b"));
    assert_eq!(data.validate(), Err(PageError::DuplicatePlatform("github ".into())));
    let err = data.validate().unwrap_err();
    assert_eq!(err.to_string(), "social platform \"github \" is listed twice");
  }

  #[test]
  fn rejects_blank_name() {
    let data = PageData::new(Identity::default());
    assert_eq!(data.validate(), Err(PageError::BlankName));
  }

  #[test]
  fn controller_config_follows_declared_tabs() {
    let mut data = page();
    data.tabs.retain(|t| t.panel != PanelKind::Skills);
    data.client.tabs = vec!["stale".into()];
    assert_eq!(data.controller_config().tabs, vec!["home", "projects", "contact"]);
  }

  #[test]
  fn social_icon_defaults_to_brand() {
    let link = SocialLink { platform: "GitHub".into(), url: "https://github.com".into(), icon: None };
    assert_eq!(link.icon_class(), "fab fa-github");
    let link = SocialLink { icon: Some("fas fa-code".into()), ..link };
    assert_eq!(link.icon_class(), "fas fa-code");
  }

  #[test]
  fn missing_sections_fill_defaults() {
    let data: PageData = serde_json::from_value(serde_json::json!({
      "identity": { "name": "Ada" },
      "projects": [{ "title": "Engine", "description": "<em>Analytical</em>" }]
    }))
    .unwrap();
    assert_eq!(data.tabs.len(), 4);
    assert!(data.projects[0].tech.is_empty());
    assert_eq!(data.projects[0].description.as_str(), "<em>Analytical</em>");
    assert!(data.assets.relay_sdk.is_some());
  }
}
