mod analysis;
mod config;
mod errors;
mod extraction;
mod jd;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::jd::{KeywordExtractor, LlmKeywordExtractor};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Analyzer thresholds are fixed for the life of the process
    let analyzer_config = config.analyzer_config()?;
    info!(
        "Analyzer config: {} histogram bins, {} ATS font fragments, min {} lines",
        analyzer_config.histogram_bins,
        analyzer_config.ats_fonts.len(),
        analyzer_config.min_lines
    );
    let analyzer = Arc::new(Analyzer::new(analyzer_config));

    // LLM-backed features are optional
    let llm = match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(client)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; JD parsing and narrative reports are disabled");
            None
        }
    };
    let keyword_extractor = llm
        .clone()
        .map(|client| Arc::new(LlmKeywordExtractor(client)) as Arc<dyn KeywordExtractor>);

    let state = AppState {
        config: config.clone(),
        analyzer,
        llm,
        keyword_extractor,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the deployed client once its URL is configurable

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
