//! Sequential validation runner

use chrono::Utc;
use uuid::Uuid;

use super::steps::{FilePresent, PdfMimeType, SignaturePresent, ValidationStep};
use super::types::{StepOutcome, UploadedFile, ValidationReport};
use crate::signature::SignatureScanner;

/// Ordered validation steps, run until the first failure
pub struct ValidationChain {
    steps: Vec<Box<dyn ValidationStep>>,
}

impl ValidationChain {
    pub fn new(steps: Vec<Box<dyn ValidationStep>>) -> Self {
        Self { steps }
    }

    /// presence → type → content
    pub fn standard(scanner: SignatureScanner) -> Self {
        Self::new(vec![
            Box::new(FilePresent),
            Box::new(PdfMimeType),
            Box::new(SignaturePresent::new(scanner)),
        ])
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Run every step in order, stopping at the first failure.
    pub async fn run(&self, input: Option<&UploadedFile>) -> ValidationReport {
        let mut report = ValidationReport {
            attempt_id: Uuid::new_v4(),
            checked_at: Utc::now(),
            failure: None,
            scan: None,
        };

        tracing::info!(
            attempt_id = %report.attempt_id,
            file_name = input.and_then(|f| f.file_name.as_deref()).unwrap_or("-"),
            content_type = input.and_then(|f| f.content_type.as_deref()).unwrap_or("-"),
            size = input.map_or(0, |f| f.bytes.len()),
            "Validating submission"
        );

        let mut prior = StepOutcome::Pass;
        for step in &self.steps {
            let result = step.check(input, prior).await;
            if result.scan.is_some() {
                report.scan = result.scan;
            }
            prior = result.outcome;

            if let StepOutcome::Fail(failure) = prior {
                tracing::info!(
                    attempt_id = %report.attempt_id,
                    step = step.name(),
                    code = failure.code(),
                    "Submission rejected"
                );
                report.failure = Some(failure);
                return report;
            }
            tracing::debug!(attempt_id = %report.attempt_id, step = step.name(), "Step passed");
        }

        tracing::info!(attempt_id = %report.attempt_id, "Submission accepted");
        report
    }
}
