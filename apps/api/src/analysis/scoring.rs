//! Composite scoring: blends structural and keyword coverage into the overall score.

use crate::analysis::settings::AnalyzerConfig;

/// Unrounded scores, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawScores {
    pub overall: f64,
    pub structural: f64,
    pub keyword: f64,
}

/// `overall = keyword_weight × keyword + structural_weight × structural` when keywords
/// were supplied, otherwise the structural score alone.
pub fn composite_score(
    structural: f64,
    keyword: f64,
    has_keywords: bool,
    config: &AnalyzerConfig,
) -> RawScores {
    let overall = if has_keywords {
        config.keyword_weight * keyword + config.structural_weight * structural
    } else {
        structural
    };
    RawScores {
        overall,
        structural,
        keyword,
    }
}

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
