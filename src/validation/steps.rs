//! The three checks applied to every submission

use async_trait::async_trait;

use super::types::{StepOutcome, StepResult, UploadedFile, ValidationFailure};
use crate::signature::{ScanOutcome, SignatureScanner};

/// One stage of the validation chain.
///
/// A step sees the submitted file (if any) and the outcome of the step
/// before it, and decides pass or fail.
#[async_trait]
pub trait ValidationStep: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self, input: Option<&UploadedFile>, prior: StepOutcome) -> StepResult;
}

/// A file must be selected
pub struct FilePresent;

#[async_trait]
impl ValidationStep for FilePresent {
    fn name(&self) -> &'static str {
        "presence"
    }

    async fn check(&self, input: Option<&UploadedFile>, _prior: StepOutcome) -> StepResult {
        match input {
            Some(_) => StepOutcome::Pass.into(),
            None => StepOutcome::Fail(ValidationFailure::MissingFile).into(),
        }
    }
}

/// The declared MIME type must be exactly `application/pdf`
pub struct PdfMimeType;

#[async_trait]
impl ValidationStep for PdfMimeType {
    fn name(&self) -> &'static str {
        "type"
    }

    async fn check(&self, input: Option<&UploadedFile>, _prior: StepOutcome) -> StepResult {
        match input {
            Some(file) if file.is_pdf() => StepOutcome::Pass.into(),
            _ => StepOutcome::Fail(ValidationFailure::NotPdf).into(),
        }
    }
}

/// The document text must contain a signature phrase.
///
/// Passes vacuously when an earlier step failed or there is no PDF to scan,
/// so only the earliest failure is ever reported.
pub struct SignaturePresent {
    scanner: SignatureScanner,
}

impl SignaturePresent {
    pub fn new(scanner: SignatureScanner) -> Self {
        Self { scanner }
    }
}

#[async_trait]
impl ValidationStep for SignaturePresent {
    fn name(&self) -> &'static str {
        "content"
    }

    async fn check(&self, input: Option<&UploadedFile>, prior: StepOutcome) -> StepResult {
        let file = match input {
            Some(file) if prior.is_pass() && file.is_pdf() => file,
            _ => return StepOutcome::Pass.into(),
        };

        let scanner = self.scanner.clone();
        let bytes = file.bytes.clone();
        let scan = tokio::task::spawn_blocking(move || scanner.scan(&bytes))
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Signature scan task failed");
                ScanOutcome::Unreadable {
                    reason: e.to_string(),
                }
            });

        let outcome = if scan.is_match() {
            StepOutcome::Pass
        } else {
            StepOutcome::Fail(ValidationFailure::MissingSignature)
        };

        StepResult {
            outcome,
            scan: Some(scan),
        }
    }
}
