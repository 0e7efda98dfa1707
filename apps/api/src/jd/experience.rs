//! Years-of-experience requirements ("5+ years", "2.5 years") pulled from JD text.
//!
//! Deterministic and LLM-free, so the extractor can seed its prompt with them and
//! fill the field when the model leaves it out.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// `5 years`, `5+ years`, `2.5 year`, `7 + years`; the amount is capture group 1.
static EXPERIENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?\s*\+?)\s*years?").expect("experience pattern is valid")
});

/// Returns each distinct `"<n> years"` / `"<n>+ years"` requirement, sorted.
pub fn extract_experience_requirements(text: &str) -> Vec<String> {
    EXPERIENCE_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|amount| {
            let amount: String = amount
                .as_str()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            format!("{amount} years")
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
