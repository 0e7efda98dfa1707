//! Report assembly: the externally consumed result shape and its error variant.
//!
//! Field names in the serialized `AnalysisResult` are a compatibility surface shared
//! with existing clients and must not change.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::analysis::keywords::KeywordMatch;
use crate::analysis::scoring::{round2, RawScores};
use crate::analysis::structure::{CheckOutcome, StructuralChecks};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    #[serde(rename = "overall score")]
    pub overall: f64,
    #[serde(rename = "structure score")]
    pub structural: f64,
    #[serde(rename = "keyword score")]
    pub keyword: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "column")]
    pub single_column: bool,
    #[serde(rename = "simple fonts")]
    pub simple_fonts: bool,
    #[serde(rename = "no images")]
    pub no_images: bool,
    #[serde(rename = "clear section header")]
    pub clear_section_header: bool,
    /// Inverted polarity: true when the document is NOT left-aligned.
    #[serde(rename = "poor text alignment")]
    pub poor_text_alignment: bool,
    #[serde(rename = "no tables")]
    pub no_tables: bool,
    #[serde(rename = "key words matched")]
    pub matched_keywords: Vec<String>,
    #[serde(rename = "keyword missing")]
    pub missing_keywords: Vec<String>,
    pub score: Scores,
}

impl AnalysisResult {
    pub fn assemble(checks: &StructuralChecks, keywords: KeywordMatch, scores: RawScores) -> Self {
        Self {
            single_column: checks.is_single_column,
            simple_fonts: checks.uses_simple_fonts,
            no_images: checks.no_images,
            clear_section_header: checks.has_clear_headers,
            poor_text_alignment: !checks.is_left_aligned,
            no_tables: checks.no_tables,
            matched_keywords: keywords.matched,
            missing_keywords: keywords.missing,
            score: Scores {
                overall: round2(scores.overall),
                structural: round2(scores.structural),
                keyword: round2(scores.keyword),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The document has too few usable lines to say anything about its layout.
    #[error("Not enough readable text found to analyze.")]
    InsufficientText { lines: usize, required: usize },

    #[error("Analysis failed: {0}")]
    Internal(String),
}

/// The `{"error": "..."}` shape returned to clients in place of a result.
impl Serialize for AnalysisError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("error", &self.to_string())?;
        map.end()
    }
}

/// Numeric data behind the layout, keyword, and structural charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub histogram: Vec<u32>,
    pub bin_width: f64,
    pub candidate_peaks: Vec<usize>,
    pub significant_peaks: Vec<usize>,
    pub column_count: usize,
    pub font_compatibility_score: f64,
    pub left_alignment_score: f64,
    pub checks: Vec<CheckOutcome>,
    pub total_lines: usize,
    pub total_spans: usize,
    pub total_keywords: usize,
    /// Records dropped by the layout adapter because of missing or invalid geometry.
    pub skipped_lines: usize,
    pub skipped_spans: usize,
    pub skipped_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub result: AnalysisResult,
    pub diagnostics: Diagnostics,
}
