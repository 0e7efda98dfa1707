//! Structural checks: six independent pass/fail heuristics approximating ATS parseability.

use serde::{Deserialize, Serialize};

pub const CHECK_COUNT: usize = 6;

/// The six checks, in reporting order.
///
/// `has_clear_headers` and `no_tables` have no detection behind them yet and always pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralChecks {
    pub is_single_column: bool,
    pub uses_simple_fonts: bool,
    pub no_images: bool,
    pub has_clear_headers: bool,
    pub is_left_aligned: bool,
    pub no_tables: bool,
}

/// A named check outcome, used for chart data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
}

impl StructuralChecks {
    pub fn new(
        is_single_column: bool,
        uses_simple_fonts: bool,
        no_images: bool,
        is_left_aligned: bool,
    ) -> Self {
        Self {
            is_single_column,
            uses_simple_fonts,
            no_images,
            has_clear_headers: true,
            is_left_aligned,
            no_tables: true,
        }
    }

    pub fn as_array(&self) -> [bool; CHECK_COUNT] {
        [
            self.is_single_column,
            self.uses_simple_fonts,
            self.no_images,
            self.has_clear_headers,
            self.is_left_aligned,
            self.no_tables,
        ]
    }

    pub fn passed_count(&self) -> usize {
        self.as_array().iter().filter(|&&c| c).count()
    }

    /// `100 × passed / 6`.
    pub fn score(&self) -> f64 {
        let sum: f64 = self.as_array().into_iter().map(check_value).sum();
        sum / CHECK_COUNT as f64 * 100.0
    }

    pub fn outcomes(&self) -> Vec<CheckOutcome> {
        const NAMES: [&str; CHECK_COUNT] = [
            "Single Column",
            "Simple Fonts",
            "No Images",
            "Clear Headers",
            "Left Aligned",
            "No Tables",
        ];
        NAMES
            .iter()
            .zip(self.as_array())
            .map(|(name, passed)| CheckOutcome {
                name: name.to_string(),
                passed,
            })
            .collect()
    }
}

/// Numeric value of a check when averaging: 1.0 for pass, 0.0 for fail.
pub fn check_value(passed: bool) -> f64 {
    if passed {
        1.0
    } else {
        0.0
    }
}
