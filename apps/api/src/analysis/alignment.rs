//! Alignment: share of spans that start inside the left-margin band.

use crate::analysis::settings::AnalyzerConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentReport {
    /// Percentage of spans with `x_ratio < left_margin_ratio` (0 – 100).
    pub left_alignment_score: f64,
    pub is_left_aligned: bool,
}

/// No spans scores 0 and fails the check. Unlike fonts, absence of data is not a pass.
pub fn score_alignment<I>(x_ratios: I, config: &AnalyzerConfig) -> AlignmentReport
where
    I: IntoIterator<Item = f64>,
{
    let mut total = 0usize;
    let mut left = 0usize;
    for ratio in x_ratios {
        total += 1;
        if ratio < config.left_margin_ratio {
            left += 1;
        }
    }

    let left_alignment_score = if total == 0 {
        0.0
    } else {
        left as f64 / total as f64 * 100.0
    };

    AlignmentReport {
        left_alignment_score,
        is_left_aligned: left_alignment_score > config.alignment_pass_threshold,
    }
}
