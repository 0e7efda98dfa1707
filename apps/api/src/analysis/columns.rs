//! Column Inference: counts text columns from a histogram of line start positions.
//!
//! # Algorithm
//! 1. Bin every line's `x_start` into `histogram_bins` equal bins over `[0, page_width]`.
//!    Values outside the range are dropped; the last bin is closed on the right.
//! 2. Candidate peaks are strict local maxima. A flat top resolves to its middle bin,
//!    and the first and last bins never qualify.
//! 3. A candidate survives if its prominence is at least
//!    `max(tallest bin × prominence_ratio, prominence_floor)`.
//! 4. A survivor counts as a column if its bin holds more than
//!    `max(total lines × peak_weight_ratio, peak_weight_floor)` lines. This discards
//!    the small bumps produced by indented bullets or a stray right-aligned date.
//! 5. Column count = surviving peaks, never less than 1.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::settings::AnalyzerConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub histogram: Vec<u32>,
    pub bin_width: f64,
    /// Bins that passed the prominence test.
    pub candidate_peaks: Vec<usize>,
    /// Candidates heavy enough to count as a column.
    pub significant_peaks: Vec<usize>,
    pub column_count: usize,
}

impl ColumnLayout {
    pub fn is_single_column(&self) -> bool {
        self.column_count <= 1
    }
}

pub fn detect_columns(x_starts: &[f64], page_width: f64, config: &AnalyzerConfig) -> ColumnLayout {
    let bins = config.histogram_bins.max(1);
    let histogram = build_histogram(x_starts, page_width, bins);
    let bin_width = if page_width.is_finite() && page_width > 0.0 {
        page_width / bins as f64
    } else {
        0.0
    };

    let tallest = histogram.iter().copied().max().unwrap_or(0);
    if tallest == 0 {
        return ColumnLayout {
            histogram,
            bin_width,
            candidate_peaks: vec![],
            significant_peaks: vec![],
            column_count: 1,
        };
    }

    let prominence_threshold = (tallest as f64 * config.prominence_ratio).max(config.prominence_floor);
    let candidate_peaks: Vec<usize> = local_maxima(&histogram)
        .into_iter()
        .filter(|&p| prominence(&histogram, p) as f64 >= prominence_threshold)
        .collect();

    let weight_threshold =
        (x_starts.len() as f64 * config.peak_weight_ratio).max(config.peak_weight_floor);
    let significant_peaks: Vec<usize> = candidate_peaks
        .iter()
        .copied()
        .filter(|&p| histogram[p] as f64 > weight_threshold)
        .collect();

    let column_count = significant_peaks.len().max(1);

    debug!(
        candidates = candidate_peaks.len(),
        significant = significant_peaks.len(),
        prominence_threshold,
        weight_threshold,
        "column detection finished"
    );

    ColumnLayout {
        histogram,
        bin_width,
        candidate_peaks,
        significant_peaks,
        column_count,
    }
}

fn build_histogram(values: &[f64], upper: f64, bins: usize) -> Vec<u32> {
    let mut counts = vec![0u32; bins];
    if !upper.is_finite() || upper <= 0.0 {
        return counts;
    }
    for &x in values {
        if !x.is_finite() || x < 0.0 || x > upper {
            continue;
        }
        let idx = ((x / upper) * bins as f64) as usize;
        counts[idx.min(bins - 1)] += 1;
    }
    counts
}

/// Indices of strict local maxima. Plateaus report their middle index (rounded down).
fn local_maxima(x: &[u32]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if x.len() < 3 {
        return peaks;
    }
    let last = x.len() - 1;
    let mut i = 1;
    while i < last {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;
            while ahead < last && x[ahead] == x[i] {
                ahead += 1;
            }
            if x[ahead] < x[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    peaks
}

/// Height of `peak` above the higher of the two bases reached by walking outwards
/// until a taller bin or the edge of the histogram.
fn prominence(x: &[u32], peak: usize) -> u32 {
    let height = x[peak];

    let mut left_min = height;
    for &v in x[..=peak].iter().rev() {
        if v > height {
            break;
        }
        left_min = left_min.min(v);
    }

    let mut right_min = height;
    for &v in &x[peak..] {
        if v > height {
            break;
        }
        right_min = right_min.min(v);
    }

    height - left_min.max(right_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LETTER_WIDTH: f64 = 612.0;

    fn config() -> AnalyzerConfig {
        AnalyzerConfig::default()
    }

    #[test]
    fn test_narrow_band_is_single_column() {
        let xs: Vec<f64> = (0..20).map(|i| 72.0 + (i % 10) as f64).collect();
        let layout = detect_columns(&xs, LETTER_WIDTH, &config());
        assert_eq!(layout.column_count, 1);
        assert!(layout.is_single_column());
        assert_eq!(layout.significant_peaks.len(), 1);
    }

    #[test]
    fn test_two_separated_bands_are_two_columns() {
        let mut xs = vec![50.0; 20];
        xs.extend(std::iter::repeat(320.0).take(20));
        let layout = detect_columns(&xs, LETTER_WIDTH, &config());
        assert_eq!(layout.column_count, 2);
        assert!(!layout.is_single_column());
    }

    #[test]
    fn test_small_indent_cluster_is_filtered_as_noise() {
        let mut xs = vec![50.0; 30];
        xs.extend([100.0, 100.0, 100.0]);
        let layout = detect_columns(&xs, LETTER_WIDTH, &config());
        assert_eq!(layout.candidate_peaks.len(), 2);
        assert_eq!(layout.column_count, 1);
    }

    #[test]
    fn test_empty_input_defaults_to_one_column() {
        let layout = detect_columns(&[], LETTER_WIDTH, &config());
        assert_eq!(layout.column_count, 1);
        assert!(layout.histogram.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_zero_page_width_defaults_to_one_column() {
        let layout = detect_columns(&[10.0, 20.0], 0.0, &config());
        assert_eq!(layout.column_count, 1);
        assert_eq!(layout.bin_width, 0.0);
    }

    #[test]
    fn test_edge_bin_is_never_a_peak() {
        let layout = detect_columns(&[0.0; 12], LETTER_WIDTH, &config());
        assert!(layout.candidate_peaks.is_empty());
        assert_eq!(layout.column_count, 1);
    }

    #[test]
    fn test_histogram_drops_out_of_range_and_closes_last_bin() {
        let h = build_histogram(&[-1.0, 0.0, 100.0, 100.5, f64::NAN], 100.0, 10);
        assert_eq!(h[0], 1);
        assert_eq!(h[9], 1);
        assert_eq!(h.iter().sum::<u32>(), 2);
    }

    #[test]
    fn test_local_maxima_plateau_reports_middle() {
        assert_eq!(local_maxima(&[0, 3, 3, 3, 0]), vec![2]);
        assert_eq!(local_maxima(&[0, 3, 3, 0]), vec![1]);
    }

    #[test]
    fn test_local_maxima_rising_plateau_to_edge_is_not_peak() {
        assert!(local_maxima(&[0, 2, 2, 2]).is_empty());
        assert!(local_maxima(&[5, 4, 3]).is_empty());
    }

    #[test]
    fn test_prominence_uses_higher_base() {
        // Valley to the left bottoms at 1, to the right at 0 (edge). Higher base = 1.
        let x = [0, 9, 1, 6, 0];
        assert_eq!(prominence(&x, 3), 5);
        assert_eq!(prominence(&x, 1), 9);
    }
}
