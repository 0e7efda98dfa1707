use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::analysis::AnalyzerConfig;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// LLM-backed endpoints (JD parsing, narrative reports) are disabled when unset.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    /// Optional JSON file overriding analyzer thresholds and the font allowlist.
    pub analyzer_config_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            analyzer_config_path: optional_env("ATS_CONFIG_PATH").map(PathBuf::from),
        })
    }

    /// Analyzer settings: the override file if configured, defaults otherwise.
    pub fn analyzer_config(&self) -> Result<AnalyzerConfig> {
        match &self.analyzer_config_path {
            Some(path) => AnalyzerConfig::from_json_file(path),
            None => Ok(AnalyzerConfig::default()),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            anthropic_api_key: None,
            port: 0,
            rust_log: "debug".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            analyzer_config_path: None,
        }
    }
}
