/* src/client/controller/rust/src/relay.rs */

use std::fmt;
use std::future::Future;
use std::pin::pin;

use futures_util::future::{Either, select};

use crate::config::{RelayRoute, SendShape};
use crate::form::FormSubmission;

/// Reason reported when the service or template id is blank.
pub const UNCONFIGURED_ROUTE: &str = "relay service and template ids are not configured";

/// Flat key-value payload handed to the relay, in field order.
pub type Payload = Vec<(&'static str, String)>;

/// Successful relay acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
  pub status: u16,
  pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
  /// SDK missing or initialisation failed; nothing was sent.
  Unavailable(String),
  /// The relay answered with a rejection.
  Rejected { status: Option<u16>, text: Option<String> },
  /// Neither outcome arrived before the client-side deadline.
  TimedOut,
}

impl fmt::Display for RelayError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Unavailable(reason) => write!(f, "relay unavailable: {reason}"),
      Self::Rejected { status: Some(status), text: Some(text) } => {
        write!(f, "relay rejected ({status}): {text}")
      }
      Self::Rejected { status: Some(status), text: None } => write!(f, "relay rejected ({status})"),
      Self::Rejected { status: None, text: Some(text) } => write!(f, "relay rejected: {text}"),
      Self::Rejected { status: None, text: None } => write!(f, "relay rejected"),
      Self::TimedOut => write!(f, "relay timed out"),
    }
  }
}

impl std::error::Error for RelayError {}

/// Transactional-email relay. Implementations resolve exactly once.
pub trait EmailRelay {
  /// Send an explicit key-value payload to `route`.
  fn send(
    &self,
    route: &RelayRoute,
    payload: &Payload,
  ) -> impl Future<Output = Result<RelayResponse, RelayError>>;

  /// Send by letting the relay read the form's named fields.
  /// Relays without form access fall back to the explicit payload.
  fn send_form(
    &self,
    route: &RelayRoute,
    payload: &Payload,
  ) -> impl Future<Output = Result<RelayResponse, RelayError>> {
    self.send(route, payload)
  }
}

/// Dispatch one submission through the configured call shape.
///
/// A route missing its service or template id is a configuration error:
/// the relay is never called and `Unavailable` is returned.
pub async fn deliver<R: EmailRelay>(
  relay: &R,
  route: &RelayRoute,
  shape: SendShape,
  submission: &FormSubmission,
) -> Result<RelayResponse, RelayError> {
  if !route.is_configured() {
    return Err(RelayError::Unavailable(UNCONFIGURED_ROUTE.to_string()));
  }
  let payload = submission.payload();
  match shape {
    SendShape::Payload => relay.send(route, &payload).await,
    SendShape::Form => relay.send_form(route, &payload).await,
  }
}

/// Race a relay call against a timer; the timer winning yields `TimedOut`.
pub async fn with_timeout<F, T>(send: F, timer: T) -> Result<RelayResponse, RelayError>
where
  F: Future<Output = Result<RelayResponse, RelayError>>,
  T: Future<Output = ()>,
{
  let send = pin!(send);
  let timer = pin!(timer);
  match select(send, timer).await {
    Either::Left((result, _)) => result,
    Either::Right(((), _)) => Err(RelayError::TimedOut),
  }
}

#[cfg(test)]
mod tests {
  use std::future;

  use super::*;

  #[test]
  fn display_includes_detail() {
    let err = RelayError::Rejected { status: Some(400), text: Some("bad template".into()) };
    assert_eq!(err.to_string(), "relay rejected (400): bad template");
    assert_eq!(RelayError::TimedOut.to_string(), "relay timed out");
  }

  #[tokio::test]
  async fn timer_wins_when_send_never_resolves() {
    let result = with_timeout(future::pending(), future::ready(())).await;
    assert_eq!(result, Err(RelayError::TimedOut));
  }

  #[tokio::test]
  async fn send_wins_when_timer_pending() {
    let ok = RelayResponse { status: 200, text: "OK".into() };
    let result = with_timeout(future::ready(Ok(ok.clone())), future::pending()).await;
    assert_eq!(result, Ok(ok));
  }
}
