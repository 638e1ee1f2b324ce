/* src/client/controller/wasm/src/relay.rs */

// EmailJS browser SDK, loaded by the page as a global `emailjs`.

use folio_controller::{
  EmailRelay, Payload, RelayError, RelayResponse, RelayRoute, UNCONFIGURED_ROUTE,
};
use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlFormElement;

#[wasm_bindgen]
extern "C" {
  #[wasm_bindgen(catch, js_namespace = emailjs, js_name = init)]
  fn emailjs_init(public_key: &str) -> Result<JsValue, JsValue>;

  #[wasm_bindgen(catch, js_namespace = emailjs, js_name = send)]
  fn emailjs_send(service_id: &str, template_id: &str, params: &JsValue)
  -> Result<Promise, JsValue>;

  #[wasm_bindgen(catch, js_namespace = emailjs, js_name = sendForm)]
  fn emailjs_send_form(
    service_id: &str,
    template_id: &str,
    form: &HtmlFormElement,
  ) -> Result<Promise, JsValue>;
}

pub(crate) struct WebRelay {
  form: HtmlFormElement,
  ready: Result<(), String>,
}

impl WebRelay {
  /// Check for the SDK global and run `init` once when a key is configured.
  /// An unconfigured route leaves the relay unavailable without touching the SDK.
  pub(crate) fn init(
    form: HtmlFormElement,
    public_key: Option<&str>,
    route: &RelayRoute,
  ) -> Self {
    let loaded = Reflect::has(&js_sys::global(), &"emailjs".into()).unwrap_or(false);
    let ready = if !route.is_configured() {
      Err(UNCONFIGURED_ROUTE.to_string())
    } else if !loaded {
      Err("emailjs SDK not loaded".to_string())
    } else if let Some(key) = public_key {
      emailjs_init(key).map(|_| ()).map_err(|e| describe(&e))
    } else {
      Ok(())
    };
    Self { form, ready }
  }

  pub(crate) fn readiness(&self) -> Result<(), &str> {
    self.ready.as_ref().map(|_| ()).map_err(String::as_str)
  }

  fn check_ready(&self) -> Result<(), RelayError> {
    self.ready.clone().map_err(RelayError::Unavailable)
  }
}

impl EmailRelay for WebRelay {
  async fn send(&self, route: &RelayRoute, payload: &Payload) -> Result<RelayResponse, RelayError> {
    self.check_ready()?;
    let params = Object::new();
    for (key, value) in payload {
      Reflect::set(&params, &JsValue::from_str(key), &JsValue::from_str(value))
        .map_err(|e| RelayError::Unavailable(describe(&e)))?;
    }
    let promise = emailjs_send(&route.service_id, &route.template_id, &params)
      .map_err(|e| RelayError::Unavailable(describe(&e)))?;
    settle(promise).await
  }

  async fn send_form(
    &self,
    route: &RelayRoute,
    _payload: &Payload,
  ) -> Result<RelayResponse, RelayError> {
    self.check_ready()?;
    let promise = emailjs_send_form(&route.service_id, &route.template_id, &self.form)
      .map_err(|e| RelayError::Unavailable(describe(&e)))?;
    settle(promise).await
  }
}

async fn settle(promise: Promise) -> Result<RelayResponse, RelayError> {
  match JsFuture::from(promise).await {
    Ok(value) => Ok(RelayResponse {
      status: read_status(&value).unwrap_or(200),
      text: read_text(&value).unwrap_or_default(),
    }),
    Err(err) => Err(RelayError::Rejected {
      status: read_status(&err),
      text: read_text(&err).or_else(|| err.as_string()),
    }),
  }
}

fn read_status(value: &JsValue) -> Option<u16> {
  let status = Reflect::get(value, &"status".into()).ok()?.as_f64()?;
  u16::try_from(status as i64).ok()
}

fn read_text(value: &JsValue) -> Option<String> {
  Reflect::get(value, &"text".into()).ok()?.as_string()
}

fn describe(value: &JsValue) -> String {
  if let Some(text) = value.as_string() {
    return text;
  }
  match value.dyn_ref::<js_sys::Error>() {
    Some(err) => String::from(err.message()),
    None => format!("{value:?}"),
  }
}
