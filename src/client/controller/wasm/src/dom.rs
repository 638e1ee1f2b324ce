/* src/client/controller/wasm/src/dom.rs */

use folio_controller::config::ids;
use folio_controller::{FormField, FormStatus, FormSurface, TabSurface, Transition};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
  Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
  HtmlTextAreaElement,
};

pub(crate) fn document() -> Result<Document, JsValue> {
  web_sys::window()
    .and_then(|w| w.document())
    .ok_or_else(|| JsValue::from_str("no document available"))
}

pub(crate) fn report(message: &str) {
  web_sys::console::error_1(&JsValue::from_str(message));
}

fn toggle_active(element: &Element, on: bool) {
  let classes = element.class_list();
  let result =
    if on { classes.add_1(ids::ACTIVE_CLASS) } else { classes.remove_1(ids::ACTIVE_CLASS) };
  if let Err(e) = result {
    web_sys::console::error_1(&e);
  }
}

pub(crate) struct WebTabs {
  document: Document,
}

impl WebTabs {
  pub(crate) fn new(document: Document) -> Self {
    Self { document }
  }

  fn button(&self, tab: &str) -> Option<Element> {
    let selector = format!(".{}[data-tab=\"{tab}\"]", ids::TAB_BUTTON_CLASS);
    self.document.query_selector(&selector).ok().flatten()
  }

  fn panel(&self, tab: &str) -> Option<HtmlElement> {
    let selector = format!(".{}.tab-{tab}", ids::TAB_PANEL_CLASS);
    self.document.query_selector(&selector).ok().flatten()?.dyn_into::<HtmlElement>().ok()
  }

  fn mark(&self, tab: &str, on: bool) {
    if let Some(button) = self.button(tab) {
      toggle_active(&button, on);
    }
    if let Some(panel) = self.panel(tab) {
      toggle_active(&panel, on);
      let display = if on { "block" } else { "none" };
      if let Err(e) = panel.style().set_property("display", display) {
        web_sys::console::error_1(&e);
      }
    }
  }
}

impl TabSurface for WebTabs {
  fn activate(&mut self, tab: &str) {
    self.mark(tab, true);
  }

  fn deactivate(&mut self, tab: &str) {
    self.mark(tab, false);
  }

  fn play_entrance(&mut self, tab: &str, transition: &Transition) {
    let Some(panel) = self.panel(tab) else { return };
    if let Err(e) = animate(&panel, transition) {
      web_sys::console::error_1(&e);
    }
  }
}

/// Fade the panel in while sliding it up by `offset_px`, via `Element.animate`.
fn animate(panel: &HtmlElement, transition: &Transition) -> Result<(), JsValue> {
  let from = Object::new();
  Reflect::set(&from, &"opacity".into(), &JsValue::from_f64(0.0))?;
  Reflect::set(
    &from,
    &"transform".into(),
    &format!("translateY({}px)", transition.offset_px).into(),
  )?;
  let to = Object::new();
  Reflect::set(&to, &"opacity".into(), &JsValue::from_f64(1.0))?;
  Reflect::set(&to, &"transform".into(), &"translateY(0)".into())?;

  let options = Object::new();
  Reflect::set(&options, &"duration".into(), &f64::from(transition.duration_ms).into())?;
  Reflect::set(&options, &"easing".into(), &transition.easing.as_str().into())?;
  Reflect::set(&options, &"fill".into(), &"forwards".into())?;

  let animate = Reflect::get(panel, &"animate".into())?.dyn_into::<Function>()?;
  animate.call2(panel, &Array::of2(&from, &to), &options)?;
  Ok(())
}

pub(crate) struct WebForm {
  document: Document,
  form: HtmlFormElement,
}

impl WebForm {
  pub(crate) fn new(document: Document, form: HtmlFormElement) -> Self {
    Self { document, form }
  }
}

impl FormSurface for WebForm {
  fn field_value(&self, field: FormField) -> String {
    let Some(element) = self.document.get_element_by_id(field.element_id()) else {
      return String::new();
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
      input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
      area.value()
    } else {
      String::new()
    }
  }

  fn clear_fields(&mut self) {
    self.form.reset();
  }

  fn set_submit_state(&mut self, busy: bool, label: &str) {
    let button = self
      .document
      .get_element_by_id(ids::SUBMIT_BUTTON)
      .and_then(|e| e.dyn_into::<HtmlButtonElement>().ok());
    if let Some(button) = button {
      button.set_disabled(busy);
      button.set_inner_html(label);
    }
  }

  fn set_status(&mut self, status: &FormStatus) {
    if let Some(element) = self.document.get_element_by_id(ids::FORM_STATUS) {
      element.set_text_content(Some(status.text()));
      element.set_class_name(status.class_name());
    }
  }
}
