/* src/client/controller/rust/src/form.rs */

// Contact form lifecycle: IDLE -> SUBMITTING -> (SUCCESS | FAILED) -> IDLE.

use std::future::Future;

use crate::config::FormConfig;
use crate::relay::{self, EmailRelay, Payload, RelayError, RelayResponse};

/// The four required inputs of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
  Name,
  Email,
  Subject,
  Message,
}

impl FormField {
  pub const ALL: [FormField; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

  /// Element id of the input in the rendered page.
  pub fn element_id(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Email => "email",
      Self::Subject => "subject",
      Self::Message => "message",
    }
  }

  /// Input `name` attribute, doubling as the relay payload key.
  pub fn payload_key(self) -> &'static str {
    match self {
      Self::Name => "from_name",
      Self::Email => "email_id",
      Self::Subject => "subject",
      Self::Message => "message",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Name => "full name",
      Self::Email => "email address",
      Self::Subject => "subject",
      Self::Message => "message",
    }
  }
}

/// Values collected for one submit-to-resolution cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
  pub name: String,
  pub email: String,
  pub subject: String,
  pub message: String,
  pub timestamp: Option<String>,
}

impl FormSubmission {
  pub fn payload(&self) -> Payload {
    let mut payload = vec![
      (FormField::Name.payload_key(), self.name.clone()),
      (FormField::Email.payload_key(), self.email.clone()),
      (FormField::Subject.payload_key(), self.subject.clone()),
      (FormField::Message.payload_key(), self.message.clone()),
    ];
    if let Some(ref ts) = self.timestamp {
      payload.push(("timestamp", ts.clone()));
    }
    payload
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
  Cleared,
  Success(String),
  Error(String),
}

impl FormStatus {
  /// Class list applied to the status element.
  pub fn class_name(&self) -> &'static str {
    match self {
      Self::Cleared => "form-status",
      Self::Success(_) => "form-status success",
      Self::Error(_) => "form-status error",
    }
  }

  pub fn text(&self) -> &str {
    match self {
      Self::Cleared => "",
      Self::Success(msg) | Self::Error(msg) => msg,
    }
  }
}

/// Element access the form controller needs; implemented over the DOM
/// in the browser and over plain structs in tests.
pub trait FormSurface {
  fn field_value(&self, field: FormField) -> String;
  fn clear_fields(&mut self);
  /// Disable (`busy`) or re-enable the submit control and set its label markup.
  fn set_submit_state(&mut self, busy: bool, label: &str);
  fn set_status(&mut self, status: &FormStatus);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
  Idle,
  Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
  Sent(RelayResponse),
  Failed(RelayError),
  /// Required fields were blank; nothing reached the relay.
  Incomplete(Vec<FormField>),
}

pub struct FormController<S> {
  config: FormConfig,
  surface: S,
  phase: FormPhase,
  last_outcome: Option<SubmitOutcome>,
}

impl<S: FormSurface> FormController<S> {
  pub fn new(config: FormConfig, surface: S) -> Self {
    Self { config, surface, phase: FormPhase::Idle, last_outcome: None }
  }

  pub fn phase(&self) -> FormPhase {
    self.phase
  }

  pub fn config(&self) -> &FormConfig {
    &self.config
  }

  pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
    self.last_outcome.as_ref()
  }

  pub fn surface(&self) -> &S {
    &self.surface
  }

  pub fn surface_mut(&mut self) -> &mut S {
    &mut self.surface
  }

  /// Enter SUBMITTING and collect the field values.
  ///
  /// Returns `None` when a submission is already in flight or when a
  /// required field is blank (an error status is shown in that case and
  /// the controller stays IDLE).
  pub fn begin_submit(&mut self, timestamp: Option<String>) -> Option<FormSubmission> {
    if self.phase == FormPhase::Submitting {
      return None;
    }

    let missing: Vec<FormField> = FormField::ALL
      .into_iter()
      .filter(|f| self.surface.field_value(*f).trim().is_empty())
      .collect();
    if !missing.is_empty() {
      let labels: Vec<&str> = missing.iter().map(|f| f.label()).collect();
      let msg = format!("{} Missing: {}.", self.config.messages.missing_fields, labels.join(", "));
      self.surface.set_status(&FormStatus::Error(msg));
      self.last_outcome = Some(SubmitOutcome::Incomplete(missing));
      return None;
    }

    self.phase = FormPhase::Submitting;
    self.surface.set_submit_state(true, &self.config.labels.busy);
    self.surface.set_status(&FormStatus::Cleared);

    Some(FormSubmission {
      name: self.surface.field_value(FormField::Name),
      email: self.surface.field_value(FormField::Email),
      subject: self.surface.field_value(FormField::Subject),
      message: self.surface.field_value(FormField::Message),
      timestamp: timestamp.filter(|_| self.config.include_timestamp),
    })
  }

  /// Apply the relay result and return to IDLE.
  ///
  /// Results arriving while IDLE (e.g. a late answer after a timeout) are
  /// ignored and `false` is returned.
  pub fn finish(&mut self, result: Result<RelayResponse, RelayError>) -> bool {
    if self.phase != FormPhase::Submitting {
      return false;
    }

    match result {
      Ok(response) => {
        self.surface.set_status(&FormStatus::Success(self.config.messages.success.clone()));
        self.surface.clear_fields();
        self.last_outcome = Some(SubmitOutcome::Sent(response));
      }
      Err(err) => {
        self.surface.set_status(&FormStatus::Error(self.error_message(&err)));
        self.last_outcome = Some(SubmitOutcome::Failed(err));
      }
    }

    self.surface.set_submit_state(false, &self.config.labels.idle);
    self.phase = FormPhase::Idle;
    true
  }

  /// Clear a shown status message once the user edits a field again.
  pub fn input_changed(&mut self) {
    if self.phase == FormPhase::Idle && self.last_outcome.is_some() {
      self.surface.set_status(&FormStatus::Cleared);
      self.last_outcome = None;
    }
  }

  /// Show the unavailable notice before any submission, when the relay
  /// failed to start. The notice survives edits until a submit replaces it.
  pub fn relay_unavailable(&mut self) {
    if self.phase == FormPhase::Idle {
      self.surface.set_status(&FormStatus::Error(self.config.messages.unavailable.clone()));
    }
  }

  /// Run one full cycle against `relay`, failing with a timeout once `timer`
  /// completes first.
  pub async fn submit<R, T>(
    &mut self,
    relay: &R,
    timestamp: Option<String>,
    timer: T,
  ) -> Option<&SubmitOutcome>
  where
    R: EmailRelay,
    T: Future<Output = ()>,
  {
    let Some(submission) = self.begin_submit(timestamp) else {
      return self.last_outcome.as_ref();
    };
    let route = self.config.route.clone();
    let shape = self.config.shape;
    let result =
      relay::with_timeout(relay::deliver(relay, &route, shape, &submission), timer).await;
    self.finish(result);
    self.last_outcome.as_ref()
  }

  fn error_message(&self, err: &RelayError) -> String {
    let messages = &self.config.messages;
    match err {
      RelayError::Unavailable(_) => messages.unavailable.clone(),
      RelayError::TimedOut => messages.timeout.clone(),
      RelayError::Rejected { text: Some(text), .. } if !text.trim().is_empty() => {
        format!("{} Error: {}", messages.failure, text.trim())
      }
      RelayError::Rejected { .. } => format!("{} Please try again later.", messages.failure),
    }
  }
}
