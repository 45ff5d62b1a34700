//! Upload form page
//!
//! Endpoints:
//! - GET / - Empty form
//! - POST / - Validate the submitted file and render the result

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};

use super::submission::read_submission;
use crate::error::Result;
use crate::form::{render_page, FormState};
use crate::state::AppState;

/// Create the form router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(show_form).post(submit_form))
}

/// GET /
async fn show_form() -> Html<String> {
    Html(render_page(&FormState::Idle))
}

/// POST /
///
/// Renders the success panel (200) or the first failure message (422).
async fn submit_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Html<String>)> {
    let file = read_submission(multipart).await?;
    let report = state.chain().run(file.as_ref()).await;

    let status = if report.is_valid() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    Ok((status, Html(render_page(&FormState::from_report(&report)))))
}
