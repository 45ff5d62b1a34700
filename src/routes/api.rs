//! JSON validation endpoint
//!
//! POST /api/v1/validate takes the same multipart upload as the form and
//! returns the full report, including whether an unsigned verdict came from
//! an unreadable document.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::submission::read_submission;
use crate::error::Result;
use crate::signature::ScanOutcome;
use crate::state::AppState;
use crate::validation::{ValidationFailure, ValidationReport};

/// Create the API router
pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/validate", post(validate))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub attempt_id: Uuid,
    pub checked_at: DateTime<Utc>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan: Option<ScanOutcome>,
}

#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub code: &'static str,
    pub message: &'static str,
}

impl From<ValidationFailure> for FailureBody {
    fn from(failure: ValidationFailure) -> Self {
        Self {
            code: failure.code(),
            message: failure.message(),
        }
    }
}

impl From<ValidationReport> for ValidationResponse {
    fn from(report: ValidationReport) -> Self {
        Self {
            attempt_id: report.attempt_id,
            checked_at: report.checked_at,
            valid: report.is_valid(),
            error: report.failure.map(FailureBody::from),
            scan: report.scan,
        }
    }
}

/// POST /api/v1/validate
async fn validate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ValidationResponse>)> {
    let file = read_submission(multipart).await?;
    let report = state.chain().run(file.as_ref()).await;

    let status = if report.is_valid() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    Ok((status, Json(report.into())))
}
