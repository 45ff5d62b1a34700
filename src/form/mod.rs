//! Upload form
//!
//! The form has four states per submission attempt. Responses carry `Idle`,
//! `Failed` or `Succeeded`; the `Submitting` button is rendered into a
//! template that the page swaps in while the request is in flight.

mod render;

pub use render::render_page;

use crate::validation::ValidationReport;

/// What the form currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// No attempt yet
    Idle,
    /// Validation in flight, submit disabled
    Submitting,
    /// A step failed; its message is shown under the file input
    Failed { message: String },
    /// All steps passed; success panel shown
    Succeeded,
}

impl FormState {
    pub fn from_report(report: &ValidationReport) -> Self {
        match report.failure {
            Some(failure) => FormState::Failed {
                message: failure.message().to_string(),
            },
            None => FormState::Succeeded,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FormState::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FormState::Submitting)
    }
}
