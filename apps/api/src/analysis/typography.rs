//! Typography: how much of the text is set in fonts ATS parsers handle reliably.

use crate::analysis::settings::AnalyzerConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontReport {
    /// Percentage of spans whose font matches the allowlist (0 – 100).
    pub compatibility_score: f64,
    pub uses_simple_fonts: bool,
}

/// Scores a sequence of span font names against `config.ats_fonts`.
///
/// No spans means nothing to penalize: the score defaults to 100.
pub fn classify_fonts<'a, I>(fonts: I, config: &AnalyzerConfig) -> FontReport
where
    I: IntoIterator<Item = &'a str>,
{
    let allowlist: Vec<String> = config.ats_fonts.iter().map(|f| f.to_lowercase()).collect();

    let mut total = 0usize;
    let mut friendly = 0usize;
    for font in fonts {
        total += 1;
        if is_ats_friendly(font, &allowlist) {
            friendly += 1;
        }
    }

    let compatibility_score = if total == 0 {
        100.0
    } else {
        friendly as f64 / total as f64 * 100.0
    };

    FontReport {
        compatibility_score,
        uses_simple_fonts: compatibility_score > config.font_pass_threshold,
    }
}

fn is_ats_friendly(font: &str, allowlist: &[String]) -> bool {
    let font = font.to_lowercase();
    allowlist.iter().any(|fragment| font.contains(fragment.as_str()))
}
