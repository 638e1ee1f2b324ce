/* src/cli/core/src/content.rs */

use std::path::Path;

use anyhow::{Context, Result};
use folio_server::PageData;
use folio_server::folio_engine::{Identity, Project, RichText, Skill, SocialLink};

use crate::config::{FolioConfig, RelaySection};

/// Page content for this run: the `[site] content` file when configured,
/// otherwise the built-in sample, with `[relay]` settings applied on top.
pub fn load_page(base_dir: &Path, config: &FolioConfig) -> Result<PageData> {
  let mut page = match config.site.content {
    Some(ref rel) => read_content(&base_dir.join(rel))?,
    None => sample_page(),
  };
  apply_relay(&mut page, &config.relay);
  page.validate().context("invalid page content")?;
  Ok(page)
}

fn read_content(path: &Path) -> Result<PageData> {
  let text =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn apply_relay(page: &mut PageData, relay: &RelaySection) {
  let client = &mut page.client;
  if let Some(ref key) = relay.public_key {
    client.public_key = Some(key.clone());
  }
  if let Some(ref id) = relay.service_id {
    client.form.route.service_id.clone_from(id);
  }
  if let Some(ref id) = relay.template_id {
    client.form.route.template_id.clone_from(id);
  }
  if let Some(ms) = relay.timeout_ms {
    client.form.timeout_ms = ms;
  }
  if let Some(shape) = relay.shape {
    client.form.shape = shape;
  }
  if let Some(include) = relay.include_timestamp {
    client.form.include_timestamp = include;
  }
  if let Some(ref url) = relay.sdk_url {
    page.assets.relay_sdk = if url.trim().is_empty() { None } else { Some(url.clone()) };
  }
}

fn social(platform: &str, url: &str, icon: Option<&str>) -> SocialLink {
  SocialLink { platform: platform.into(), url: url.into(), icon: icon.map(String::from) }
}

fn skill(name: &str, icon: &str, category: &str) -> Skill {
  Skill { name: name.into(), icon: icon.into(), category: Some(category.into()) }
}

/// Placeholder portfolio shown when no content file is configured.
pub fn sample_page() -> PageData {
  let mut page = PageData::new(Identity {
    name: "Alex Morgan".into(),
    title: "Software Engineer".into(),
    email: "alex@example.com".into(),
    affiliation: Some("Example University".into()),
    avatar: Some("/images/profile.svg".into()),
  });
  page.bio = "I build reliable backend systems and the tooling around them.\n\n\
              Lately I have been working on static site pipelines, small web services and \
              developer tools."
    .into();
  page.social = vec![
    social("LinkedIn", "https://www.linkedin.com/in/example", None),
    social("GitHub", "https://github.com/example", None),
    social("LeetCode", "https://leetcode.com/example", Some("fas fa-code")),
    social("Twitter", "https://twitter.com/example", None),
  ];
  page.skills = vec![
    skill("Rust", "fab fa-rust", "Languages"),
    skill("Python", "fab fa-python", "Languages"),
    skill("JavaScript", "fab fa-js", "Languages"),
    skill("Docker", "fab fa-docker", "Tools"),
    skill("Git", "fab fa-git-alt", "Tools"),
    skill("PostgreSQL", "fas fa-database", "Data"),
  ];
  page.projects = vec![
    Project {
      title: "Portfolio Site".into(),
      description: RichText::from(
        "A single-page portfolio with tabbed sections, a contact form and a static \
         snapshot for file hosting.",
      ),
      tech: vec!["Rust".into(), "Axum".into(), "WebAssembly".into()],
      github: Some("https://github.com/example/portfolio".into()),
      features: vec![
        "Server-rendered page with no client framework".into(),
        "Static snapshot with relative asset paths".into(),
      ],
      image: Some("/images/portfolio.svg".into()),
      ..Project::default()
    },
    Project {
      title: "Team Chatbot".into(),
      description: RichText::from(
        "A chat assistant that answers questions about internal documentation.",
      ),
      tech: vec!["Python".into(), "FastAPI".into()],
      demo: Some("https://chatbot.example.com".into()),
      acknowledgment: Some(RichText::from("Built with the platform team.")),
      note: Some(RichText::from("<em>Source is private.</em>")),
      ..Project::default()
    },
  ];
  page
}
