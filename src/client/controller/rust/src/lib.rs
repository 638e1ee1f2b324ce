/* src/client/controller/rust/src/lib.rs */

//! Tab switching and contact-form submission for the folio page,
//! independent of any DOM. Browser bindings implement [`TabSurface`],
//! [`FormSurface`] and [`EmailRelay`] over real elements.

pub mod config;
pub mod form;
pub mod relay;
pub mod tabs;

#[cfg(test)]
mod tests;

pub use config::{
  ControllerConfig, FormConfig, RelayRoute, SendShape, StatusMessages, SubmitLabels, Transition,
};
pub use form::{
  FormController, FormField, FormPhase, FormStatus, FormSubmission, FormSurface, SubmitOutcome,
};
pub use relay::{
  EmailRelay, Payload, RelayError, RelayResponse, UNCONFIGURED_ROUTE, deliver, with_timeout,
};
pub use tabs::{TabController, TabError, TabSurface};
