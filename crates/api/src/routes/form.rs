//! HTML Form Routes

use axum::{extract::State, http::StatusCode, response::Html, Form};
use data_validator::parse_form;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use crate::error::ApiError;
use crate::page::{self, Outcome};
use crate::AppState;

/// Render the empty form
pub async fn index() -> Html<String> {
    Html(page::render(&page::default_values(), None))
}

/// Handle a form submission and re-render the page with the verdict
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    let values = page::submitted_values(&form);

    let result = parse_form(&form)
        .map_err(ApiError::from)
        .and_then(|stats| state.predict(&stats));

    match result {
        Ok(report) => (
            StatusCode::OK,
            Html(page::render(&values, Some(Outcome::Prediction(&report)))),
        ),
        Err(e) => {
            warn!("Form submission rejected: {}", e);
            let message = match &e {
                ApiError::Invalid(_) => e.to_string(),
                ApiError::Artifact(_) => format!("Prediction unavailable: {}", e),
            };
            (
                e.status_code(),
                Html(page::render(&values, Some(Outcome::Error(&message)))),
            )
        }
    }
}
