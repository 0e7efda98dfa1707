//! Normalized document geometry consumed by the scoring pipeline.
//!
//! Produced by `extraction::layout` from raw parser output; the core never sees
//! parser-native objects.

use serde::{Deserialize, Serialize};

/// One visually distinct text line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Leftmost span start on the page, in page units.
    pub x_start: f64,
    /// Character count of the trimmed line text.
    pub length: usize,
}

/// One text span belonging to a kept line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord {
    pub font: String,
    /// Span start normalized by page width.
    pub x_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub lines: Vec<LineRecord>,
    pub spans: Vec<SpanRecord>,
    pub has_image: bool,
}

/// Records the layout adapter dropped because their geometry was missing or invalid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecords {
    pub lines: usize,
    pub spans: usize,
    pub pages: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentGeometry {
    pub pages: Vec<PageGeometry>,
    pub page_width: f64,
    /// Concatenated page text, newlines preserved.
    pub full_text: String,
    #[serde(default)]
    pub skipped: SkippedRecords,
}

impl DocumentGeometry {
    pub fn line_starts(&self) -> Vec<f64> {
        self.pages
            .iter()
            .flat_map(|p| p.lines.iter().map(|l| l.x_start))
            .collect()
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    pub fn spans(&self) -> impl Iterator<Item = &SpanRecord> {
        self.pages.iter().flat_map(|p| p.spans.iter())
    }

    pub fn has_images(&self) -> bool {
        self.pages.iter().any(|p| p.has_image)
    }
}
