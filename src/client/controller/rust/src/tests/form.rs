/* src/client/controller/rust/src/tests/form.rs */

use std::cell::RefCell;
use std::collections::HashMap;
use std::future;
use std::time::Duration;

use crate::config::{FormConfig, RelayRoute, SendShape};
use crate::form::{FormController, FormField, FormPhase, FormStatus, FormSurface, SubmitOutcome};
use crate::relay::{EmailRelay, Payload, RelayError, RelayResponse, UNCONFIGURED_ROUTE};

#[derive(Default)]
struct FakeForm {
  values: HashMap<FormField, String>,
  busy: bool,
  label: String,
  status: Option<FormStatus>,
  busy_transitions: Vec<bool>,
}

impl FakeForm {
  fn filled() -> Self {
    let mut form = Self::default();
    form.values.insert(FormField::Name, "Ada Lovelace".into());
    form.values.insert(FormField::Email, "ada@example.com".into());
    form.values.insert(FormField::Subject, "Hello".into());
    form.values.insert(FormField::Message, "Let's build an engine.".into());
    form
  }

  fn status(&self) -> &FormStatus {
    self.status.as_ref().unwrap_or(&FormStatus::Cleared)
  }
}

impl FormSurface for FakeForm {
  fn field_value(&self, field: FormField) -> String {
    self.values.get(&field).cloned().unwrap_or_default()
  }

  fn clear_fields(&mut self) {
    self.values.clear();
  }

  fn set_submit_state(&mut self, busy: bool, label: &str) {
    self.busy = busy;
    self.label = label.to_string();
    self.busy_transitions.push(busy);
  }

  fn set_status(&mut self, status: &FormStatus) {
    self.status = Some(status.clone());
  }
}

enum Reply {
  Ok,
  Reject(Option<&'static str>),
  Unavailable,
  Hang,
}

struct StubRelay {
  reply: Reply,
  calls: RefCell<Vec<(&'static str, RelayRoute, Payload)>>,
}

impl StubRelay {
  fn new(reply: Reply) -> Self {
    Self { reply, calls: RefCell::new(Vec::new()) }
  }

  async fn answer(&self) -> Result<RelayResponse, RelayError> {
    match self.reply {
      Reply::Ok => Ok(RelayResponse { status: 200, text: "OK".into() }),
      Reply::Reject(text) => {
        Err(RelayError::Rejected { status: Some(400), text: text.map(String::from) })
      }
      Reply::Unavailable => Err(RelayError::Unavailable("emailjs is not defined".into())),
      Reply::Hang => future::pending().await,
    }
  }
}

impl EmailRelay for StubRelay {
  async fn send(&self, route: &RelayRoute, payload: &Payload) -> Result<RelayResponse, RelayError> {
    self.calls.borrow_mut().push(("send", route.clone(), payload.clone()));
    self.answer().await
  }

  async fn send_form(
    &self,
    route: &RelayRoute,
    payload: &Payload,
  ) -> Result<RelayResponse, RelayError> {
    self.calls.borrow_mut().push(("send_form", route.clone(), payload.clone()));
    self.answer().await
  }
}

fn config() -> FormConfig {
  FormConfig {
    route: RelayRoute { service_id: "service_test".into(), template_id: "template_test".into() },
    ..FormConfig::default()
  }
}

async fn no_timeout() {
  tokio::time::sleep(Duration::from_secs(3600)).await;
}

#[tokio::test]
async fn success_clears_fields_and_restores_button() {
  let relay = StubRelay::new(Reply::Ok);
  let mut ctrl = FormController::new(config(), FakeForm::filled());

  let outcome = ctrl.submit(&relay, Some("2024-05-01T12:00:00.000Z".into()), no_timeout()).await;
  assert!(matches!(outcome, Some(SubmitOutcome::Sent(_))));

  assert_eq!(ctrl.phase(), FormPhase::Idle);
  let form = ctrl.surface();
  assert_eq!(form.status(), &FormStatus::Success(config().messages.success));
  assert!(form.values.is_empty());
  assert!(!form.busy);
  assert_eq!(form.label, config().labels.idle);
  assert_eq!(form.busy_transitions, vec![true, false]);

  let calls = relay.calls.borrow();
  assert_eq!(calls.len(), 1);
  let (method, route, payload) = &calls[0];
  assert_eq!(*method, "send");
  assert_eq!(route.service_id, "service_test");
  let keys: Vec<&str> = payload.iter().map(|(k, _)| *k).collect();
  assert_eq!(keys, vec!["from_name", "email_id", "subject", "message", "timestamp"]);
  assert_eq!(payload[0].1, "Ada Lovelace");
}

#[tokio::test]
async fn rejection_preserves_fields_and_shows_detail() {
  let relay = StubRelay::new(Reply::Reject(Some("The template ID is invalid")));
  let mut ctrl = FormController::new(config(), FakeForm::filled());

  ctrl.submit(&relay, None, no_timeout()).await;

  assert_eq!(ctrl.phase(), FormPhase::Idle);
  let form = ctrl.surface();
  assert_eq!(form.values.len(), 4);
  assert!(!form.busy);
  assert_eq!(form.label, config().labels.idle);
  match form.status() {
    FormStatus::Error(msg) => {
      assert!(msg.starts_with(&config().messages.failure));
      assert!(msg.ends_with("Error: The template ID is invalid"));
    }
    other => panic!("expected error status, got {other:?}"),
  }
}

#[tokio::test]
async fn rejection_without_detail_uses_generic_message() {
  let relay = StubRelay::new(Reply::Reject(None));
  let mut ctrl = FormController::new(config(), FakeForm::filled());
  ctrl.submit(&relay, None, no_timeout()).await;
  assert_eq!(
    ctrl.surface().status(),
    &FormStatus::Error(format!("{} Please try again later.", config().messages.failure))
  );
}

#[tokio::test]
async fn unavailable_relay_shows_service_message() {
  let relay = StubRelay::new(Reply::Unavailable);
  let mut ctrl = FormController::new(config(), FakeForm::filled());
  ctrl.submit(&relay, None, no_timeout()).await;
  assert_eq!(ctrl.surface().status(), &FormStatus::Error(config().messages.unavailable));
  assert_eq!(ctrl.surface().values.len(), 4);
  assert!(!ctrl.surface().busy);
}

#[tokio::test]
async fn hanging_relay_times_out_and_unlocks_button() {
  let relay = StubRelay::new(Reply::Hang);
  let mut ctrl = FormController::new(config(), FakeForm::filled());

  let outcome = ctrl.submit(&relay, None, future::ready(())).await;
  assert_eq!(outcome, Some(&SubmitOutcome::Failed(RelayError::TimedOut)));
  assert_eq!(ctrl.phase(), FormPhase::Idle);
  assert_eq!(ctrl.surface().status(), &FormStatus::Error(config().messages.timeout));
  assert!(!ctrl.surface().busy);
  assert_eq!(ctrl.surface().values.len(), 4);

  // A late answer after the timeout must not flip the outcome.
  assert!(!ctrl.finish(Ok(RelayResponse { status: 200, text: "OK".into() })));
  assert_eq!(ctrl.surface().status(), &FormStatus::Error(config().messages.timeout));
}

#[test]
fn only_one_submission_in_flight() {
  let mut ctrl = FormController::new(config(), FakeForm::filled());
  let first = ctrl.begin_submit(None);
  assert!(first.is_some());
  assert_eq!(ctrl.phase(), FormPhase::Submitting);
  assert!(ctrl.surface().busy);
  assert_eq!(ctrl.surface().label, config().labels.busy);

  assert!(ctrl.begin_submit(None).is_none());
  assert_eq!(ctrl.surface().busy_transitions, vec![true]);

  assert!(ctrl.finish(Err(RelayError::TimedOut)));
  assert!(ctrl.begin_submit(None).is_some());
}

#[test]
fn blank_fields_never_reach_the_relay() {
  let mut form = FakeForm::filled();
  form.values.insert(FormField::Subject, "   ".into());
  form.values.remove(&FormField::Email);
  let mut ctrl = FormController::new(config(), form);

  assert!(ctrl.begin_submit(None).is_none());
  assert_eq!(ctrl.phase(), FormPhase::Idle);
  assert!(!ctrl.surface().busy);
  assert_eq!(
    ctrl.last_outcome(),
    Some(&SubmitOutcome::Incomplete(vec![FormField::Email, FormField::Subject]))
  );
  match ctrl.surface().status() {
    FormStatus::Error(msg) => assert!(msg.contains("email address, subject")),
    other => panic!("expected error status, got {other:?}"),
  }
}

#[test]
fn timestamp_dropped_when_disabled() {
  let config = FormConfig { include_timestamp: false, ..config() };
  let mut ctrl = FormController::new(config, FakeForm::filled());
  let submission = ctrl.begin_submit(Some("2024-05-01T12:00:00.000Z".into())).unwrap();
  assert_eq!(submission.timestamp, None);
  assert_eq!(submission.payload().len(), 4);
}

#[tokio::test]
async fn form_shape_uses_send_form() {
  let relay = StubRelay::new(Reply::Ok);
  let config = FormConfig { shape: SendShape::Form, ..config() };
  let mut ctrl = FormController::new(config, FakeForm::filled());
  ctrl.submit(&relay, None, no_timeout()).await;
  assert_eq!(relay.calls.borrow()[0].0, "send_form");
}

#[tokio::test]
async fn typing_clears_previous_status() {
  let relay = StubRelay::new(Reply::Reject(None));
  let mut ctrl = FormController::new(config(), FakeForm::filled());
  ctrl.submit(&relay, None, no_timeout()).await;
  assert!(matches!(ctrl.surface().status(), FormStatus::Error(_)));

  ctrl.input_changed();
  assert_eq!(ctrl.surface().status(), &FormStatus::Cleared);
  assert!(ctrl.last_outcome().is_none());
}

#[test]
fn startup_notice_survives_typing() {
  let mut ctrl = FormController::new(config(), FakeForm::filled());
  ctrl.relay_unavailable();
  ctrl.input_changed();
  assert_eq!(ctrl.surface().status(), &FormStatus::Error(config().messages.unavailable));
}

#[tokio::test]
async fn unconfigured_route_never_reaches_the_relay() {
  for route in [
    RelayRoute::default(),
    RelayRoute { service_id: "service_test".into(), template_id: "  ".into() },
  ] {
    let relay = StubRelay::new(Reply::Reject(Some("The service ID is invalid")));
    let unrouted = FormConfig { route, ..FormConfig::default() };
    let mut ctrl = FormController::new(unrouted, FakeForm::filled());

    let outcome = ctrl.submit(&relay, None, no_timeout()).await;
    assert_eq!(
      outcome,
      Some(&SubmitOutcome::Failed(RelayError::Unavailable(UNCONFIGURED_ROUTE.into())))
    );
    assert!(relay.calls.borrow().is_empty());
    assert_eq!(ctrl.surface().status(), &FormStatus::Error(config().messages.unavailable));
    assert_eq!(ctrl.surface().values.len(), 4);
    assert!(!ctrl.surface().busy);
    assert_eq!(ctrl.phase(), FormPhase::Idle);
  }
}
