//! Keyword coverage: flattens a structured JD keyword tree and checks each keyword
//! against the résumé body with whole-word boundaries.

use std::collections::BTreeSet;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

/// Deduplicated, lowercase target keywords. Iterates in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(BTreeSet<String>);

impl KeywordSet {
    /// Collects every non-empty string leaf of `value`.
    ///
    /// Object entries whose key is in `excluded_fields` are skipped along with their
    /// whole subtree. Numbers, booleans, and nulls carry no keywords. Subtrees nested
    /// deeper than `max_depth` are dropped.
    pub fn from_value(value: &Value, excluded_fields: &[String], max_depth: usize) -> Self {
        let mut keywords = BTreeSet::new();
        collect_strings(value, 0, excluded_fields, max_depth, &mut keywords);
        Self(keywords)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

/// Whether a supplied keyword structure counts as present for blending. Null, `false`,
/// zero and empty strings, arrays, or objects do not. Any other value does, even when
/// every entry is excluded or empty and the flattened set ends up with nothing in it.
pub fn keywords_supplied(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn collect_strings(
    value: &Value,
    depth: usize,
    excluded_fields: &[String],
    max_depth: usize,
    out: &mut BTreeSet<String>,
) {
    if depth > max_depth {
        warn!(depth, "keyword structure nested too deeply; skipping subtree");
        return;
    }
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if excluded_fields.iter().any(|f| f == key) {
                    continue;
                }
                collect_strings(child, depth + 1, excluded_fields, max_depth, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_strings(item, depth + 1, excluded_fields, max_depth, out);
            }
        }
        Value::String(s) => {
            let keyword = s.trim().to_lowercase();
            if !keyword.is_empty() {
                out.insert(keyword);
            }
        }
        Value::Number(_) | Value::Bool(_) | Value::Null => {}
    }
}

/// Partition of a `KeywordSet` into found and missing keywords, both in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordMatch {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl KeywordMatch {
    pub fn total(&self) -> usize {
        self.matched.len() + self.missing.len()
    }

    /// `100 × matched / total`, or 0 when there were no keywords.
    pub fn score(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.matched.len() as f64 / total as f64 * 100.0,
        }
    }
}

pub fn match_keywords(keywords: &KeywordSet, resume_text: &str) -> KeywordMatch {
    let text = normalize_text(resume_text);
    let mut result = KeywordMatch::default();
    for keyword in keywords.iter() {
        if contains_whole_word(&text, keyword) {
            result.matched.push(keyword.clone());
        } else {
            result.missing.push(keyword.clone());
        }
    }
    result
}

fn normalize_text(text: &str) -> String {
    format!(" {} ", text.to_lowercase().replace('\n', " "))
}

/// True if `needle` occurs in `haystack` with no word character directly before or after.
///
/// The boundary characters are part of the match, so every start position is tried and a
/// rejected occurrence inside a longer word does not hide a valid one later in the text.
pub fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let pattern = format!(r"(?:^|[^\w]){}(?:[^\w]|$)", regex::escape(needle));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(haystack),
        Err(e) => {
            warn!(keyword = needle, "keyword pattern rejected: {e}");
            false
        }
    }
}
