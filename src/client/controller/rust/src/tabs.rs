/* src/client/controller/rust/src/tabs.rs */

use std::fmt;

use crate::config::Transition;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabError {
  NoTabs,
  DuplicateTab(String),
  UnknownTab(String),
}

impl fmt::Display for TabError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NoTabs => write!(f, "at least one tab must be declared"),
      Self::DuplicateTab(id) => write!(f, "tab \"{id}\" is declared twice"),
      Self::UnknownTab(id) => write!(f, "unknown tab \"{id}\""),
    }
  }
}

impl std::error::Error for TabError {}

/// Element access for tab switching. `activate` marks both the selector
/// button and its panel as active and shows the panel; `deactivate` undoes it.
pub trait TabSurface {
  fn activate(&mut self, tab: &str);
  fn deactivate(&mut self, tab: &str);
  fn play_entrance(&mut self, tab: &str, transition: &Transition);
}

pub struct TabController<S> {
  tabs: Vec<String>,
  active: usize,
  transition: Transition,
  surface: S,
}

impl<S: TabSurface> TabController<S> {
  /// Take over the declared tabs and force exactly one active.
  ///
  /// `marked` is the tab flagged active in markup; when absent or unknown,
  /// the first declared tab wins.
  pub fn init(
    tabs: Vec<String>,
    marked: Option<&str>,
    transition: Transition,
    mut surface: S,
  ) -> Result<Self, TabError> {
    if tabs.is_empty() {
      return Err(TabError::NoTabs);
    }
    for (i, tab) in tabs.iter().enumerate() {
      if tabs[..i].contains(tab) {
        return Err(TabError::DuplicateTab(tab.clone()));
      }
    }

    let active = marked.and_then(|m| tabs.iter().position(|t| t == m)).unwrap_or(0);
    for (i, tab) in tabs.iter().enumerate() {
      if i != active {
        surface.deactivate(tab);
      }
    }
    surface.activate(&tabs[active]);
    surface.play_entrance(&tabs[active], &transition);

    Ok(Self { tabs, active, transition, surface })
  }

  pub fn active(&self) -> &str {
    &self.tabs[self.active]
  }

  pub fn tabs(&self) -> &[String] {
    &self.tabs
  }

  pub fn surface(&self) -> &S {
    &self.surface
  }

  /// Switch to `tab`. Returns `Ok(false)` when it is already active.
  pub fn select(&mut self, tab: &str) -> Result<bool, TabError> {
    let next = self
      .tabs
      .iter()
      .position(|t| t == tab)
      .ok_or_else(|| TabError::UnknownTab(tab.to_string()))?;
    if next == self.active {
      return Ok(false);
    }

    self.surface.deactivate(&self.tabs[self.active]);
    self.surface.activate(&self.tabs[next]);
    self.surface.play_entrance(&self.tabs[next], &self.transition);
    self.active = next;
    Ok(true)
  }
}
