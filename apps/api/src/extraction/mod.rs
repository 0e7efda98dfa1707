// Document-parsing boundary: normalizes parser geometry for the analyzer and
// extracts plain text from uploaded PDFs.

pub mod handlers;
pub mod layout;
pub mod pdf_text;

pub use layout::{normalize, RawDocument};
