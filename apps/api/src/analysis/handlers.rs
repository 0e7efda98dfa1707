//! Axum route handlers for the ATS analysis API.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::analysis::geometry::DocumentGeometry;
use crate::analysis::narrative::generate_narrative;
use crate::analysis::report::{AnalysisResult, Diagnostics};
use crate::analysis::Analyzer;
use crate::errors::AppError;
use crate::extraction::{normalize, RawDocument};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyseRequest {
    /// Page geometry as produced by the document parser.
    pub document: RawDocument,
    /// Raw job description. Ignored when `keywords` is supplied.
    #[serde(default)]
    pub jd: Option<String>,
    /// Pre-structured keyword tree (objects, arrays, strings).
    #[serde(default)]
    pub keywords: Option<Value>,
    #[serde(default)]
    pub narrative: bool,
    #[serde(default)]
    pub include_diagnostics: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalyseResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub result: AnalysisResult,
    /// Narrative review JSON text from the LLM, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /ats/analyse
///
/// Normalize geometry → resolve keywords → analyze → optional narrative.
/// Too little text is a 422; anything unexpected inside the analysis is a 500.
pub async fn handle_analyse(
    State(state): State<AppState>,
    Json(request): Json<AnalyseRequest>,
) -> Result<Json<AnalyseResponse>, AppError> {
    let keywords = resolve_keywords(&state, request.keywords, request.jd.as_deref()).await?;

    let geometry = normalize(&request.document, state.analyzer.config().min_line_chars);
    let resume_text = geometry.full_text.clone();

    let (result, diagnostics) = run_analysis(
        state.analyzer.clone(),
        geometry,
        keywords,
        request.include_diagnostics,
    )
    .await?;

    let response = if request.narrative {
        let llm = state.llm.as_ref().ok_or(AppError::LlmNotConfigured)?;
        Some(generate_narrative(llm, &result, &resume_text).await?)
    } else {
        None
    };

    let analysis_id = Uuid::new_v4();
    info!(
        %analysis_id,
        overall = result.score.overall,
        structural = result.score.structural,
        keyword = result.score.keyword,
        "résumé analysed"
    );

    Ok(Json(AnalyseResponse {
        analysis_id,
        analyzed_at: Utc::now(),
        result,
        response,
        diagnostics,
    }))
}

/// Explicit keywords win; otherwise a non-blank JD goes through the keyword extractor.
async fn resolve_keywords(
    state: &AppState,
    keywords: Option<Value>,
    jd: Option<&str>,
) -> Result<Option<Value>, AppError> {
    if keywords.is_some() {
        return Ok(keywords);
    }
    let Some(jd) = jd else {
        return Ok(None);
    };
    let jd = jd.trim();
    if jd.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Job description cannot be empty".to_string(),
        ));
    }
    let extractor = state
        .keyword_extractor
        .as_ref()
        .ok_or(AppError::LlmNotConfigured)?;
    Ok(Some(extractor.extract(jd).await?))
}

/// Runs the analyzer on the blocking pool. A panic inside the analysis surfaces as a
/// `JoinError` and is reported as an internal error rather than tearing down the request.
async fn run_analysis(
    analyzer: Arc<Analyzer>,
    geometry: DocumentGeometry,
    keywords: Option<Value>,
    with_diagnostics: bool,
) -> Result<(AnalysisResult, Option<Diagnostics>), AppError> {
    let outcome = tokio::task::spawn_blocking(move || {
        if with_diagnostics {
            analyzer
                .analyze_detailed(&geometry, keywords.as_ref())
                .map(|d| (d.result, Some(d.diagnostics)))
        } else {
            analyzer
                .analyze(&geometry, keywords.as_ref())
                .map(|result| (result, None))
        }
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))?;
    Ok(outcome?)
}
