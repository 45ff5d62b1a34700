//! Validation types

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::signature::ScanOutcome;

/// The only media type accepted for upload
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A file submitted through the form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name as sent by the browser
    pub file_name: Option<String>,
    /// Declared MIME type of the part
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: Option<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type.as_deref() == Some(PDF_MIME_TYPE)
    }
}

/// Why a submission was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    MissingFile,
    NotPdf,
    MissingSignature,
}

impl ValidationFailure {
    /// Field-level message shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingFile => "A file is required.",
            Self::NotPdf => "Only PDF files are allowed.",
            Self::MissingSignature => {
                "The document must contain one of the required signature strings."
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFile => "FILE_REQUIRED",
            Self::NotPdf => "INVALID_FILE_TYPE",
            Self::MissingSignature => "SIGNATURE_NOT_FOUND",
        }
    }
}

/// Outcome of a single validation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Pass,
    Fail(ValidationFailure),
}

impl StepOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, StepOutcome::Pass)
    }
}

/// Step outcome plus the scan that produced it, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub outcome: StepOutcome,
    pub scan: Option<ScanOutcome>,
}

impl From<StepOutcome> for StepResult {
    fn from(outcome: StepOutcome) -> Self {
        Self {
            outcome,
            scan: None,
        }
    }
}

/// Result of running the whole chain on one submission
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub attempt_id: Uuid,
    pub checked_at: DateTime<Utc>,
    /// First failing step, if any
    pub failure: Option<ValidationFailure>,
    /// Present only when the content step ran
    pub scan: Option<ScanOutcome>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }
}
