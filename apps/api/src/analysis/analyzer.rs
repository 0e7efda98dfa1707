//! Analyzer: the single entry point for scoring a résumé.
//!
//! Pure and synchronous: no I/O, no shared mutable state, safe to call from any
//! number of threads at once. Callers on an async runtime should run it inside
//! `tokio::task::spawn_blocking`.

use serde_json::Value;
use tracing::debug;

use crate::analysis::alignment::score_alignment;
use crate::analysis::columns::detect_columns;
use crate::analysis::geometry::DocumentGeometry;
use crate::analysis::keywords::{keywords_supplied, match_keywords, KeywordSet};
use crate::analysis::report::{AnalysisError, AnalysisResult, DetailedAnalysis, Diagnostics};
use crate::analysis::scoring::{composite_score, RawScores};
use crate::analysis::settings::AnalyzerConfig;
use crate::analysis::structure::StructuralChecks;
use crate::analysis::typography::classify_fonts;

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Scores `document` for ATS compatibility and, if `keywords` is given, coverage of
    /// the keyword strings nested anywhere inside it.
    pub fn analyze(
        &self,
        document: &DocumentGeometry,
        keywords: Option<&Value>,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_detailed(document, keywords).map(|d| d.result)
    }

    /// Same as [`Analyzer::analyze`], plus the intermediate numbers used for charts.
    pub fn analyze_detailed(
        &self,
        document: &DocumentGeometry,
        keywords: Option<&Value>,
    ) -> Result<DetailedAnalysis, AnalysisError> {
        let config = &self.config;

        let total_lines = document.line_count();
        if total_lines < config.min_lines {
            return Err(AnalysisError::InsufficientText {
                lines: total_lines,
                required: config.min_lines,
            });
        }

        let layout = detect_columns(&document.line_starts(), document.page_width, config);
        let fonts = classify_fonts(document.spans().map(|s| s.font.as_str()), config);
        let alignment = score_alignment(document.spans().map(|s| s.x_ratio), config);

        let checks = StructuralChecks::new(
            layout.is_single_column(),
            fonts.uses_simple_fonts,
            !document.has_images(),
            alignment.is_left_aligned,
        );

        let keyword_set = keywords
            .map(|v| {
                KeywordSet::from_value(v, &config.excluded_keyword_fields, config.max_keyword_depth)
            })
            .unwrap_or_default();
        let matches = match_keywords(&keyword_set, &document.full_text);

        let has_keywords = keywords.is_some_and(keywords_supplied);
        if has_keywords && keyword_set.is_empty() {
            debug!("keyword structure supplied but holds no matchable keywords");
        }

        let scores = composite_score(checks.score(), matches.score(), has_keywords, config);
        ensure_finite(&scores)?;

        debug!(
            columns = layout.column_count,
            checks_passed = checks.passed_count(),
            font_score = fonts.compatibility_score,
            alignment_score = alignment.left_alignment_score,
            keywords = keyword_set.len(),
            matched = matches.matched.len(),
            overall = scores.overall,
            "résumé analysis complete"
        );

        let diagnostics = Diagnostics {
            histogram: layout.histogram,
            bin_width: layout.bin_width,
            candidate_peaks: layout.candidate_peaks,
            significant_peaks: layout.significant_peaks,
            column_count: layout.column_count,
            font_compatibility_score: fonts.compatibility_score,
            left_alignment_score: alignment.left_alignment_score,
            checks: checks.outcomes(),
            total_lines,
            total_spans: document.spans().count(),
            total_keywords: keyword_set.len(),
            skipped_lines: document.skipped.lines,
            skipped_spans: document.skipped.spans,
            skipped_pages: document.skipped.pages,
        };

        Ok(DetailedAnalysis {
            result: AnalysisResult::assemble(&checks, matches, scores),
            diagnostics,
        })
    }
}

fn ensure_finite(scores: &RawScores) -> Result<(), AnalysisError> {
    for (name, value) in [
        ("overall", scores.overall),
        ("structural", scores.structural),
        ("keyword", scores.keyword),
    ] {
        if !value.is_finite() {
            return Err(AnalysisError::Internal(format!(
                "{name} score is not a finite number ({value})"
            )));
        }
    }
    Ok(())
}
