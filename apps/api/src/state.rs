use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::jd::KeywordExtractor;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Immutable analyzer shared by every request; analysis holds no per-call state here.
    pub analyzer: Arc<Analyzer>,
    /// Absent when no API key is configured.
    pub llm: Option<LlmClient>,
    /// Pluggable JD keyword backend. Absent when no API key is configured.
    pub keyword_extractor: Option<Arc<dyn KeywordExtractor>>,
}
