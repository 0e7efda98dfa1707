// ATS compliance analysis: column inference, typography, alignment, structural checks,
// keyword coverage, and composite scoring over normalized document geometry.
// Pure computation only. PDF decoding, JD keyword extraction, and narrative
// generation live at the HTTP boundary.

pub mod alignment;
pub mod analyzer;
pub mod columns;
pub mod geometry;
pub mod handlers;
pub mod keywords;
pub mod narrative;
pub mod prompts;
pub mod report;
pub mod scoring;
pub mod settings;
pub mod structure;
pub mod typography;

pub use analyzer::Analyzer;
pub use report::AnalysisError;
pub use settings::AnalyzerConfig;
