//! Analyzer configuration: every threshold and allowlist the scoring pipeline reads.
//!
//! Built once at startup and shared read-only behind `Arc<Analyzer>`.
//! Missing fields in an override file fall back to the defaults below.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Font family fragments considered safe for ATS parsing (case-insensitive substring match).
pub const DEFAULT_ATS_FONTS: &[&str] = &[
    "arial",
    "calibri",
    "times",
    "helvetica",
    "georgia",
    "garamond",
    "cambria",
    "verdana",
    "tahoma",
    "computer modern",
    "cmr",
    "lmroman",
];

/// Object keys whose values are not skills and are skipped while flattening keywords.
pub const DEFAULT_EXCLUDED_KEYWORD_FIELDS: &[&str] = &["job_title", "experience_years"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Below this many usable lines the document is rejected as insufficient text.
    pub min_lines: usize,
    /// Lines shorter than this (after trimming) are ignored by the layout adapter.
    pub min_line_chars: usize,

    pub histogram_bins: usize,
    /// Prominence threshold = max(peak bin height × ratio, floor).
    pub prominence_ratio: f64,
    pub prominence_floor: f64,
    /// A peak survives if its bin count > max(total lines × ratio, floor).
    pub peak_weight_ratio: f64,
    pub peak_weight_floor: f64,

    pub ats_fonts: Vec<String>,
    /// `uses_simple_fonts` requires a compatibility score strictly above this.
    pub font_pass_threshold: f64,

    /// Spans starting left of this page-width fraction count as left-aligned.
    pub left_margin_ratio: f64,
    /// `is_left_aligned` requires an alignment score strictly above this.
    pub alignment_pass_threshold: f64,

    pub keyword_weight: f64,
    pub structural_weight: f64,
    pub excluded_keyword_fields: Vec<String>,
    /// Nested keyword structures deeper than this are skipped.
    pub max_keyword_depth: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_lines: 5,
            min_line_chars: 3,
            histogram_bins: 50,
            prominence_ratio: 0.05,
            prominence_floor: 1.0,
            peak_weight_ratio: 0.05,
            peak_weight_floor: 5.0,
            ats_fonts: DEFAULT_ATS_FONTS.iter().map(|s| s.to_string()).collect(),
            font_pass_threshold: 80.0,
            left_margin_ratio: 0.20,
            alignment_pass_threshold: 70.0,
            keyword_weight: 0.6,
            structural_weight: 0.4,
            excluded_keyword_fields: DEFAULT_EXCLUDED_KEYWORD_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_keyword_depth: 32,
        }
    }
}

impl AnalyzerConfig {
    /// Loads overrides from a JSON file. Absent keys keep their default values.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read analyzer config at {}", path.display()))?;
        let config: AnalyzerConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid analyzer config JSON in {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.histogram_bins < 3 {
            anyhow::bail!("histogram_bins must be at least 3, got {}", self.histogram_bins);
        }
        if self.min_lines == 0 {
            anyhow::bail!("min_lines must be positive");
        }
        let weights = self.keyword_weight + self.structural_weight;
        if (weights - 1.0).abs() > 1e-9 {
            anyhow::bail!("keyword_weight + structural_weight must equal 1.0, got {weights}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_documented_thresholds() {
        let c = AnalyzerConfig::default();
        assert_eq!(c.histogram_bins, 50);
        assert_eq!(c.min_lines, 5);
        assert_eq!(c.ats_fonts.len(), 12);
        assert!((c.keyword_weight - 0.6).abs() < f64::EPSILON);
        assert!((c.left_margin_ratio - 0.20).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_override_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"ats_fonts": ["inter"], "min_lines": 8}}"#).unwrap();

        let c = AnalyzerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(c.ats_fonts, vec!["inter".to_string()]);
        assert_eq!(c.min_lines, 8);
        assert_eq!(c.histogram_bins, 50);
    }

    #[test]
    fn test_override_file_rejects_unbalanced_weights() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"keyword_weight": 0.9}}"#).unwrap();

        let err = AnalyzerConfig::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("must equal 1.0"));
    }

    #[test]
    fn test_missing_override_file_is_an_error() {
        let err = AnalyzerConfig::from_json_file(Path::new("/nonexistent/ats.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
