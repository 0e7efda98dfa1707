//! Axum route handlers for job-description parsing.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseJdRequest {
    pub jd: String,
}

/// POST /jds/parse_text
///
/// Structures a raw job description into the nested keyword object the analyzer consumes.
pub async fn handle_parse_text(
    State(state): State<AppState>,
    Json(request): Json<ParseJdRequest>,
) -> Result<Json<Value>, AppError> {
    let jd_text = request.jd.trim();
    if jd_text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Job description cannot be empty".to_string(),
        ));
    }

    let extractor = state
        .keyword_extractor
        .as_ref()
        .ok_or(AppError::LlmNotConfigured)?;
    let structured = extractor.extract(jd_text).await?;

    Ok(Json(structured))
}
