//! Layout adapter: turns the document parser's page/block/line/span dump into
//! `DocumentGeometry`.
//!
//! The parser output mirrors a PDF text dictionary: each page has a width, an image
//! count, its plain text, and blocks of lines of spans with a `[x0, y0, x1, y1]` bbox.
//! Malformed records are skipped and counted, never fatal.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::geometry::{
    DocumentGeometry, LineRecord, PageGeometry, SkippedRecords, SpanRecord,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocument {
    pub pages: Vec<RawPage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPage {
    pub width: Option<f64>,
    /// Plain page text. Rebuilt from the spans when absent.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image_count: usize,
    #[serde(default)]
    pub blocks: Vec<RawBlock>,
}

/// Image blocks carry no lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBlock {
    #[serde(default)]
    pub lines: Vec<RawLine>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLine {
    #[serde(default)]
    pub spans: Vec<RawSpan>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSpan {
    #[serde(default)]
    pub text: String,
    pub font: Option<String>,
    pub bbox: Option<[f64; 4]>,
}

impl RawSpan {
    fn x0(&self) -> Option<f64> {
        self.bbox.map(|b| b[0]).filter(|x| x.is_finite())
    }
}

const UNKNOWN_FONT: &str = "N/A";

/// Normalizes a parsed document. Lines shorter than `min_line_chars` after trimming are
/// ignored along with their spans.
pub fn normalize(raw: &RawDocument, min_line_chars: usize) -> DocumentGeometry {
    let mut doc = DocumentGeometry::default();

    for (page_idx, raw_page) in raw.pages.iter().enumerate() {
        doc.full_text.push_str(&page_text(raw_page));

        let width = match raw_page.width {
            Some(w) if w.is_finite() && w > 0.0 => w,
            other => {
                warn!(page = page_idx, width = ?other, "page has no usable width; skipping its geometry");
                doc.skipped.pages += 1;
                doc.pages.push(PageGeometry {
                    has_image: raw_page.image_count > 0,
                    ..PageGeometry::default()
                });
                continue;
            }
        };
        doc.page_width = width;

        let mut page = PageGeometry {
            has_image: raw_page.image_count > 0,
            ..PageGeometry::default()
        };
        let mut skipped = SkippedRecords::default();

        for line in raw_page.blocks.iter().flat_map(|b| b.lines.iter()) {
            let text: String = line.spans.iter().map(|s| s.text.as_str()).collect();
            let trimmed = text.trim();
            if trimmed.chars().count() < min_line_chars {
                continue;
            }

            let Some(x_start) = line.spans.iter().filter_map(RawSpan::x0).reduce(f64::min) else {
                skipped.lines += 1;
                continue;
            };
            page.lines.push(LineRecord {
                x_start,
                length: trimmed.chars().count(),
            });

            for span in &line.spans {
                let Some(x0) = span.x0() else {
                    skipped.spans += 1;
                    continue;
                };
                page.spans.push(SpanRecord {
                    font: span.font.clone().unwrap_or_else(|| UNKNOWN_FONT.to_string()),
                    x_ratio: x0 / width,
                });
            }
        }

        if skipped.lines > 0 || skipped.spans > 0 {
            warn!(
                page = page_idx,
                lines = skipped.lines,
                spans = skipped.spans,
                "skipped records without position data"
            );
        }
        doc.skipped.lines += skipped.lines;
        doc.skipped.spans += skipped.spans;
        doc.pages.push(page);
    }

    doc
}

fn page_text(page: &RawPage) -> String {
    if let Some(text) = &page.text {
        return text.clone();
    }
    let mut out = String::new();
    for line in page.blocks.iter().flat_map(|b| b.lines.iter()) {
        for span in &line.spans {
            out.push_str(&span.text);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn span(text: &str, font: &str, x0: f64) -> RawSpan {
        RawSpan {
            text: text.to_string(),
            font: Some(font.to_string()),
            bbox: Some([x0, 0.0, x0 + 100.0, 12.0]),
        }
    }

    fn line(spans: Vec<RawSpan>) -> RawLine {
        RawLine { spans }
    }

    fn page(lines: Vec<RawLine>) -> RawPage {
        RawPage {
            width: Some(600.0),
            text: None,
            image_count: 0,
            blocks: vec![RawBlock { lines }],
        }
    }

    #[test]
    fn test_line_start_is_leftmost_span() {
        let raw = RawDocument {
            pages: vec![page(vec![line(vec![
                span("Senior ", "Arial", 90.0),
                span("Engineer", "Arial-Bold", 60.0),
            ])])],
        };
        let doc = normalize(&raw, 3);
        assert_eq!(doc.pages[0].lines[0].x_start, 60.0);
        assert_eq!(doc.pages[0].lines[0].length, 15);
        assert_eq!(doc.pages[0].spans.len(), 2);
        assert!((doc.pages[0].spans[0].x_ratio - 0.15).abs() < 1e-9);
        assert_eq!(doc.page_width, 600.0);
    }

    #[test]
    fn test_short_lines_are_ignored_with_their_spans() {
        let raw = RawDocument {
            pages: vec![page(vec![
                line(vec![span(" • ", "Symbol", 50.0)]),
                line(vec![span("Rust", "Arial", 50.0)]),
            ])],
        };
        let doc = normalize(&raw, 3);
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.spans().count(), 1);
        assert_eq!(doc.skipped, SkippedRecords::default());
    }

    #[test]
    fn test_spans_without_bbox_are_skipped_not_fatal() {
        let mut unpositioned = span("Kafka", "Arial", 0.0);
        unpositioned.bbox = None;
        let raw = RawDocument {
            pages: vec![page(vec![
                line(vec![span("Rust and ", "Arial", 50.0), unpositioned.clone()]),
                line(vec![unpositioned]),
            ])],
        };
        let doc = normalize(&raw, 3);
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.spans().count(), 1);
        assert_eq!(doc.skipped.spans, 1);
        assert_eq!(doc.skipped.lines, 1);
    }

    #[test]
    fn test_page_without_width_keeps_text_and_images() {
        let mut bad = page(vec![line(vec![span("Profile", "Arial", 50.0)])]);
        bad.width = Some(0.0);
        bad.image_count = 1;
        let doc = normalize(&RawDocument { pages: vec![bad] }, 3);
        assert_eq!(doc.skipped.pages, 1);
        assert_eq!(doc.line_count(), 0);
        assert!(doc.has_images());
        assert_eq!(doc.full_text, "Profile\n");
    }

    #[test]
    fn test_missing_font_defaults_to_unknown() {
        let mut s = span("Experience", "", 50.0);
        s.font = None;
        let doc = normalize(&RawDocument { pages: vec![page(vec![line(vec![s])])] }, 3);
        assert_eq!(doc.pages[0].spans[0].font, "N/A");
    }

    #[test]
    fn test_full_text_prefers_parser_text_and_concatenates_pages() {
        let mut first = page(vec![]);
        first.text = Some("Page one\n".to_string());
        let second = page(vec![line(vec![span("Page two", "Arial", 50.0)])]);
        let doc = normalize(&RawDocument { pages: vec![first, second] }, 3);
        assert_eq!(doc.full_text, "Page one\nPage two\n");
    }

    #[test]
    fn test_deserializes_parser_json() {
        let raw: RawDocument = serde_json::from_value(json!({
            "pages": [{
                "width": 612.0,
                "image_count": 0,
                "blocks": [
                    {"lines": [{"spans": [{"text": "Jane Doe", "font": "Calibri", "bbox": [72.0, 40.0, 160.0, 58.0]}]}]},
                    {}
                ]
            }]
        }))
        .unwrap();
        let doc = normalize(&raw, 3);
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.pages[0].spans[0].font, "Calibri");
    }
}
