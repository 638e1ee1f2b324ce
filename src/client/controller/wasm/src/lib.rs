/* src/client/controller/wasm/src/lib.rs */

mod dom;
mod relay;
mod timer;

use std::cell::RefCell;
use std::rc::Rc;

use folio_controller::config::ids;
use folio_controller::{ControllerConfig, FormController, TabController, deliver, with_timeout};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlFormElement};

use crate::dom::{WebForm, WebTabs};
use crate::relay::WebRelay;

/// Entry point called by the page's boot script once the module is loaded.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
  let document = dom::document()?;
  let config = read_config(&document)?;
  mount_tabs(&document, &config)?;
  mount_form(&document, &config)?;
  Ok(())
}

fn read_config(document: &Document) -> Result<ControllerConfig, JsValue> {
  let Some(script) = document.get_element_by_id(ids::CONFIG_SCRIPT) else {
    return Ok(ControllerConfig::default());
  };
  let text = script.text_content().unwrap_or_default();
  serde_json::from_str(&text)
    .map_err(|e| JsValue::from_str(&format!("invalid #{} config: {e}", ids::CONFIG_SCRIPT)))
}

fn elements(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
  let list = document.query_selector_all(selector)?;
  Ok((0..list.length()).filter_map(|i| list.item(i)?.dyn_into::<Element>().ok()).collect())
}

fn mount_tabs(document: &Document, config: &ControllerConfig) -> Result<(), JsValue> {
  let buttons = elements(document, &format!(".{}[data-tab]", ids::TAB_BUTTON_CLASS))?;
  let mut tabs = config.tabs.clone();
  let mut marked = None;
  for button in &buttons {
    let Some(tab) = button.get_attribute("data-tab") else { continue };
    if marked.is_none() && button.class_list().contains(ids::ACTIVE_CLASS) {
      marked = Some(tab.clone());
    }
    if config.tabs.is_empty() {
      tabs.push(tab);
    }
  }
  if tabs.is_empty() {
    return Ok(());
  }

  let ctrl = TabController::init(
    tabs,
    marked.as_deref(),
    config.transition.clone(),
    WebTabs::new(document.clone()),
  )
  .map_err(|e| JsValue::from_str(&e.to_string()))?;
  let ctrl = Rc::new(RefCell::new(ctrl));

  // Tab buttons plus in-page links such as the hero call-to-action.
  let triggers = buttons
    .into_iter()
    .filter_map(|b| b.get_attribute("data-tab").map(|t| (b, t)))
    .chain(
      elements(document, "[data-tab-target]")?
        .into_iter()
        .filter_map(|b| b.get_attribute("data-tab-target").map(|t| (b, t))),
    );
  for (element, tab) in triggers {
    let ctrl = ctrl.clone();
    let on_click = Closure::<dyn FnMut()>::new(move || {
      if let Err(e) = ctrl.borrow_mut().select(&tab) {
        dom::report(&e.to_string());
      }
    });
    element.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
  }
  Ok(())
}

fn mount_form(document: &Document, config: &ControllerConfig) -> Result<(), JsValue> {
  let Some(form) = document.get_element_by_id(ids::FORM) else {
    return Ok(());
  };
  let form: HtmlFormElement = form.dyn_into().map_err(JsValue::from)?;

  let relay =
    Rc::new(WebRelay::init(form.clone(), config.public_key.as_deref(), &config.form.route));
  let ctrl = Rc::new(RefCell::new(FormController::new(
    config.form.clone(),
    WebForm::new(document.clone(), form.clone()),
  )));
  if let Err(reason) = relay.readiness() {
    dom::report(&format!("contact form disabled: {reason}"));
    ctrl.borrow_mut().relay_unavailable();
  }

  let on_submit = {
    let ctrl = ctrl.clone();
    Closure::<dyn FnMut(Event)>::new(move |event: Event| {
      event.prevent_default();
      let timestamp = String::from(js_sys::Date::new_0().to_iso_string());
      let Some(submission) = ctrl.borrow_mut().begin_submit(Some(timestamp)) else {
        return;
      };
      let (route, shape, timeout_ms) = {
        let ctrl = ctrl.borrow();
        let form = ctrl.config();
        (form.route.clone(), form.shape, form.timeout_ms)
      };
      let ctrl = ctrl.clone();
      let relay = relay.clone();
      spawn_local(async move {
        let send = deliver(relay.as_ref(), &route, shape, &submission);
        let result = with_timeout(send, timer::sleep(timeout_ms)).await;
        if let Err(ref e) = result {
          dom::report(&e.to_string());
        }
        ctrl.borrow_mut().finish(result);
      });
    })
  };
  form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
  on_submit.forget();

  let on_input = Closure::<dyn FnMut()>::new(move || ctrl.borrow_mut().input_changed());
  form.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
  on_input.forget();
  Ok(())
}
