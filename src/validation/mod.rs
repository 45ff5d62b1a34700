//! Submission validation
//!
//! Every submitted file goes through the same ordered chain of checks:
//! a file must be present, it must be declared as a PDF, and its text must
//! contain a signature phrase. The first failing check decides the message.

mod chain;
mod steps;
mod types;

pub use chain::ValidationChain;
pub use steps::{FilePresent, PdfMimeType, SignaturePresent, ValidationStep};
pub use types::{
    StepOutcome, StepResult, UploadedFile, ValidationFailure, ValidationReport, PDF_MIME_TYPE,
};
