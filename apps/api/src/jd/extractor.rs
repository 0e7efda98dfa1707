//! Keyword extraction: pluggable, trait-based JD → keyword structure conversion.
//!
//! `AppState` holds an `Arc<dyn KeywordExtractor>`. The shipped backend structures the
//! JD through the LLM client; tests swap in fixed structures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::jd::experience::extract_experience_requirements;
use crate::jd::prompts::{JD_KEYWORDS_PROMPT_TEMPLATE, JD_KEYWORDS_SYSTEM};
use crate::llm_client::LlmClient;

/// Structured keywords for a single job description.
///
/// `job_title` and `experience_years` are context, not skills; the analyzer's
/// flattening step skips them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredJd {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub experience_years: Option<String>,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
}

impl StructuredJd {
    pub fn keyword_count(&self) -> usize {
        self.technical_skills.len() + self.soft_skills.len() + self.tools.len() + self.qualifications.len()
    }
}

/// Implement this to swap keyword backends without touching handlers.
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    /// Returns a nested keyword structure (objects, arrays, strings) for `jd_text`.
    async fn extract(&self, jd_text: &str) -> Result<Value, AppError>;
}

/// LLM-backed extractor.
pub struct LlmKeywordExtractor(pub LlmClient);

#[async_trait]
impl KeywordExtractor for LlmKeywordExtractor {
    async fn extract(&self, jd_text: &str) -> Result<Value, AppError> {
        let experience = extract_experience_requirements(jd_text);
        let prompt = build_prompt(jd_text, &experience);

        let structured: StructuredJd = self
            .0
            .call_json(&prompt, JD_KEYWORDS_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("JD keyword extraction failed: {e}")))?;
        let structured = with_experience_fallback(structured, &experience);

        debug!(keywords = structured.keyword_count(), "structured JD keywords");
        serde_json::to_value(structured).map_err(|e| AppError::Internal(e.into()))
    }
}

fn build_prompt(jd_text: &str, experience: &[String]) -> String {
    let experience_json = serde_json::to_string(experience).unwrap_or_else(|_| "[]".to_string());
    JD_KEYWORDS_PROMPT_TEMPLATE
        .replace("{experience_json}", &experience_json)
        .replace("{jd_text}", jd_text)
}

/// Fills `experience_years` from the text scan when the model left it empty.
fn with_experience_fallback(mut jd: StructuredJd, experience: &[String]) -> StructuredJd {
    let missing = jd
        .experience_years
        .as_deref()
        .map_or(true, |s| s.trim().is_empty());
    if missing && !experience.is_empty() {
        jd.experience_years = Some(experience.join(", "));
    }
    jd
}
