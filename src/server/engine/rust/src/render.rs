/* src/server/engine/rust/src/render.rs */

use folio_controller::FormField;
use folio_controller::config::ids;

use crate::escape::{escape_html, script_safe_json};
use crate::model::{PageData, PanelKind, Project, Tab};
use crate::roman::to_roman;

/// Render the whole portfolio document.
///
/// Pure and deterministic: the same `PageData` always yields the same bytes.
/// Plain text is escaped; `RichText` fields are inserted as-is. Optional
/// blocks are left out entirely when their data is absent.
pub fn render_page(data: &PageData) -> String {
  let mut html = String::with_capacity(16 * 1024);
  html.push_str("<!doctype html>\n<html lang=\"en\">\n");
  render_head(&mut html, data);
  html.push_str("<body>\n<div class=\"wrapper\">\n<div class=\"layout\">\n");
  html.push_str("<div class=\"main-content\">\n");
  render_navigation(&mut html, &data.tabs);
  for (i, tab) in data.tabs.iter().enumerate() {
    let class = if i == 0 { " active" } else { "" };
    html.push_str(&format!(
      "<div class=\"{} tab-{}{class}\">\n",
      ids::TAB_PANEL_CLASS,
      tab.panel.id()
    ));
    match tab.panel {
      PanelKind::Home => render_home(&mut html, data),
      PanelKind::Projects => render_projects(&mut html, data, &tab.label),
      PanelKind::Skills => render_skills(&mut html, data, &tab.label),
      PanelKind::Contact => render_contact(&mut html, data),
    }
    html.push_str("</div>\n");
  }
  html.push_str("</div>\n</div>\n</div>\n");

  // ControllerConfig holds only strings, numbers, bools and sequences of
  // them, so serialization has no failure path.
  let config = serde_json::to_string(&data.controller_config())
    .expect("controller config always serializes to JSON");
  html.push_str(&format!(
    "<script id=\"{}\" type=\"application/json\">{}</script>\n",
    ids::CONFIG_SCRIPT,
    script_safe_json(&config)
  ));
  html.push_str(&format!(
    "<script type=\"module\" src=\"{}\"></script>\n",
    escape_html(&data.assets.boot_script)
  ));
  html.push_str("</body>\n</html>\n");
  html
}

fn render_head(html: &mut String, data: &PageData) {
  html.push_str("<head>\n<meta charset=\"utf-8\">\n");
  html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
  html.push_str(&format!("<title>{}</title>\n", escape_html(&data.identity.name)));
  for sheet in &data.assets.stylesheets {
    html.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">\n", escape_html(sheet)));
  }
  if let Some(ref sdk) = data.assets.relay_sdk {
    html.push_str(&format!("<script src=\"{}\"></script>\n", escape_html(sdk)));
  }
  html.push_str("</head>\n");
}

fn render_navigation(html: &mut String, tabs: &[Tab]) {
  html.push_str("<div class=\"tab-navigation\">\n");
  for (i, tab) in tabs.iter().enumerate() {
    let class = if i == 0 { " active" } else { "" };
    html.push_str(&format!(
      "<button class=\"{}{class}\" data-tab=\"{}\"><i class=\"{}\"></i> {}</button>\n",
      ids::TAB_BUTTON_CLASS,
      tab.panel.id(),
      escape_html(&tab.icon),
      escape_html(&tab.label)
    ));
  }
  html.push_str("</div>\n");
}

fn external_link(url: &str, body: &str) -> String {
  format!("<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{body}</a>", escape_html(url))
}

fn render_home(html: &mut String, data: &PageData) {
  let identity = &data.identity;
  let name = escape_html(&identity.name);
  html.push_str("<div class=\"home-banner\">\n");
  if let Some(ref avatar) = identity.avatar {
    html.push_str(&format!(
      "<img src=\"{}\" alt=\"{name}\" class=\"profile-image\">\n",
      escape_html(avatar)
    ));
  }
  html.push_str(&format!("<h1>{name}</h1>\n"));
  if !identity.title.trim().is_empty() {
    html.push_str(&format!("<p class=\"home-title\">{}</p>\n", escape_html(&identity.title)));
  }
  if !data.social.is_empty() {
    html.push_str("<div class=\"social-icons\">\n");
    for link in &data.social {
      html.push_str(&format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"social-icon\" \
         aria-label=\"{}\"><i class=\"{}\"></i></a>\n",
        escape_html(&link.url),
        escape_html(&link.platform),
        escape_html(&link.icon_class())
      ));
    }
    html.push_str("</div>\n");
  }
  if let Some(ref affiliation) = identity.affiliation {
    html.push_str(&format!(
      "<div class=\"contact-info\"><div class=\"contact-item\"><i class=\"fas fa-building\"></i> \
       <span>{}</span></div></div>\n",
      escape_html(affiliation)
    ));
  }
  html.push_str("</div>\n");

  html.push_str("<div class=\"about-section\">\n<h2>About Me</h2>\n");
  for paragraph in data.bio.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
    html.push_str(&format!("<p>{}</p>\n", escape_html(paragraph)));
  }
  if data.has_panel(PanelKind::Contact) {
    html.push_str(&format!(
      "<div class=\"home-cta\"><button class=\"cta-button\" data-tab-target=\"{}\">Contact Me\
       </button></div>\n",
      PanelKind::Contact.id()
    ));
  }
  html.push_str("</div>\n");
}

fn render_projects(html: &mut String, data: &PageData, heading: &str) {
  html.push_str(&format!("<section>\n<h2>{}</h2>\n", escape_html(heading)));
  for (i, project) in data.projects.iter().enumerate() {
    let ordinal = u32::try_from(i + 1).map(to_roman).unwrap_or_default();
    render_project(html, &ordinal, project);
  }
  html.push_str("</section>\n");
}

fn render_project(html: &mut String, ordinal: &str, project: &Project) {
  let title = escape_html(&project.title);
  html.push_str("<div class=\"project\">\n");
  html.push_str(&format!("<h3>({ordinal}) {title}</h3>\n"));
  if let Some(ref image) = project.image {
    html.push_str(&format!(
      "<div class=\"project-image-container\"><img src=\"{}\" alt=\"{title}\" \
       class=\"project-image\"></div>\n",
      escape_html(image)
    ));
  }
  html.push_str(&format!(
    "<p class=\"project-description\">{}</p>\n",
    project.description.as_str()
  ));
  if !project.features.is_empty() {
    html.push_str("<ul class=\"feature-list\">\n");
    for feature in &project.features {
      html.push_str(&format!("<li>{}</li>\n", escape_html(feature)));
    }
    html.push_str("</ul>\n");
  }
  if let Some(ack) = project.acknowledgment.as_ref().filter(|a| !a.is_blank()) {
    html.push_str(&format!("<p class=\"acknowledgment\">{}</p>\n", ack.as_str()));
  }
  if let Some(note) = project.note.as_ref().filter(|n| !n.is_blank()) {
    html.push_str(&format!("<div class=\"project-note\">{}</div>\n", note.as_str()));
  }
  if !project.tech.is_empty() {
    html.push_str("<div class=\"tech-stack\">");
    for tech in &project.tech {
      html.push_str(&format!("<span class=\"tech-tag\">{}</span>", escape_html(tech)));
    }
    html.push_str("</div>\n");
  }
  let links: Vec<String> = [(&project.github, "GitHub"), (&project.demo, "Demo")]
    .into_iter()
    .filter_map(|(url, label)| url.as_deref().map(|u| external_link(u, label)))
    .collect();
  if !links.is_empty() {
    html.push_str(&format!("<div class=\"project-links\">{}</div>\n", links.join(" ")));
  }
  html.push_str("</div>\n");
}

fn render_skills(html: &mut String, data: &PageData, heading: &str) {
  html.push_str(&format!(
    "<section class=\"skills-section\">\n<h2>{}</h2>\n<div class=\"skills-grid\">\n",
    escape_html(heading)
  ));
  for skill in &data.skills {
    html.push_str("<div class=\"skill-item\">");
    html.push_str(&format!(
      "<i class=\"{} skill-icon\"></i><span class=\"skill-name\">{}</span>",
      escape_html(&skill.icon),
      escape_html(&skill.name)
    ));
    if let Some(ref category) = skill.category {
      html.push_str(&format!("<span class=\"skill-category\">{}</span>", escape_html(category)));
    }
    html.push_str("</div>\n");
  }
  html.push_str("</div>\n</section>\n");
}

fn field_markup(field: FormField) -> (&'static str, &'static str, &'static str, &'static str) {
  // (label, icon, input type, placeholder)
  match field {
    FormField::Name => ("Full Name", "fas fa-user", "text", "Your full name"),
    FormField::Email => ("Email Address", "fas fa-envelope", "email", "Your email address"),
    FormField::Subject => ("Subject", "fas fa-tag", "text", "What is this regarding?"),
    FormField::Message => (
      "Your Message",
      "",
      "textarea",
      "Tell me about your project, question, or job opportunity...",
    ),
  }
}

fn render_field(html: &mut String, field: FormField) {
  let (label, icon, kind, placeholder) = field_markup(field);
  let id = field.element_id();
  let name = field.payload_key();
  html.push_str(&format!("<div class=\"form-group has-icon\">\n<label for=\"{id}\">{label}</label>\n"));
  if !icon.is_empty() {
    html.push_str(&format!("<i class=\"{icon}\"></i>\n"));
  }
  if kind == "textarea" {
    html.push_str(&format!(
      "<textarea id=\"{id}\" name=\"{name}\" rows=\"5\" placeholder=\"{placeholder}\" \
       required></textarea>\n"
    ));
  } else {
    html.push_str(&format!(
      "<input type=\"{kind}\" id=\"{id}\" name=\"{name}\" placeholder=\"{placeholder}\" required>\n"
    ));
  }
  html.push_str("</div>\n");
}

fn render_contact(html: &mut String, data: &PageData) {
  let copy = &data.contact;
  html.push_str(&format!(
    "<section class=\"contact-section\">\n<h2>{}</h2>\n<p class=\"contact-intro\">{}</p>\n",
    escape_html(&copy.heading),
    escape_html(&copy.intro)
  ));
  html.push_str("<div class=\"contact-container\">\n");

  html.push_str(&format!("<form id=\"{}\" class=\"contact-form\">\n", ids::FORM));
  html.push_str(&format!(
    "<div class=\"contact-form-header\"><h3>{}</h3><p>{}</p></div>\n",
    escape_html(&copy.form_heading),
    escape_html(&copy.form_intro)
  ));
  html.push_str("<div class=\"form-group-row\">\n");
  render_field(html, FormField::Name);
  render_field(html, FormField::Email);
  html.push_str("</div>\n");
  render_field(html, FormField::Subject);
  render_field(html, FormField::Message);
  // Labels are markup owned by the page config, not visitor input.
  html.push_str(&format!(
    "<button type=\"submit\" id=\"{}\" class=\"submit-button\">{}</button>\n",
    ids::SUBMIT_BUTTON,
    data.client.form.labels.idle
  ));
  html.push_str(&format!("<div id=\"{0}\" class=\"{0}\"></div>\n", ids::FORM_STATUS));
  html.push_str("</form>\n");

  html.push_str("<div class=\"contact-info-sidebar\">\n");
  if !data.identity.email.trim().is_empty() {
    let email = escape_html(&data.identity.email);
    contact_method(html, "fas fa-at", "Email", &format!("<a href=\"mailto:{email}\">{email}</a>"));
  }
  if !data.social.is_empty() {
    let links: Vec<String> =
      data.social.iter().map(|l| external_link(&l.url, &escape_html(&l.platform))).collect();
    contact_method(
      html,
      "fas fa-globe",
      "Social &amp; Web",
      &format!("Connect with me on<br>{}", links.join(", ")),
    );
  }
  contact_method(html, "fas fa-clock", "Response Time", &escape_html(&copy.response_time));
  html.push_str("</div>\n</div>\n</section>\n");
}

fn contact_method(html: &mut String, icon: &str, heading: &str, body: &str) {
  html.push_str(&format!(
    "<div class=\"contact-method\"><div class=\"icon-container\"><i class=\"{icon}\"></i></div>\
     <div class=\"contact-details\"><h3>{heading}</h3><p>{body}</p></div></div>\n"
  ));
}
