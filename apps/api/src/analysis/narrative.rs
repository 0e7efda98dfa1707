//! Narrative report: free-form reviewer prose layered on top of an `AnalysisResult`.
//!
//! Called by the HTTP handler after analysis succeeds; the analyzer itself never
//! depends on it.

use crate::analysis::prompts::{NARRATIVE_PERSONA, NARRATIVE_PROMPT_TEMPLATE};
use crate::analysis::report::AnalysisResult;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

/// Returns the model's JSON review as text. The body is passed through unparsed so
/// clients receive exactly what the model produced.
pub async fn generate_narrative(
    llm: &LlmClient,
    analysis: &AnalysisResult,
    resume_text: &str,
) -> Result<String, AppError> {
    let prompt = build_narrative_prompt(analysis, resume_text)?;
    let system = format!("{NARRATIVE_PERSONA} {JSON_ONLY_SYSTEM}");
    llm.call_text(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("Narrative generation failed: {e}")))
}

pub(crate) fn build_narrative_prompt(
    analysis: &AnalysisResult,
    resume_text: &str,
) -> Result<String, AppError> {
    let analysis_json =
        serde_json::to_string_pretty(analysis).map_err(|e| AppError::Internal(e.into()))?;

    // Placeholders are located in the template only, never in substituted text.
    let (head, rest) = NARRATIVE_PROMPT_TEMPLATE
        .split_once("{analysis_json}")
        .ok_or_else(|| missing_placeholder("analysis_json"))?;
    let (middle, tail) = rest
        .split_once("{resume_text}")
        .ok_or_else(|| missing_placeholder("resume_text"))?;

    Ok([head, analysis_json.as_str(), middle, resume_text, tail].concat())
}

fn missing_placeholder(name: &str) -> AppError {
    AppError::Internal(anyhow::anyhow!("narrative template lacks {{{name}}}"))
}
