//! Plain-text extraction from uploaded PDF bytes.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

/// Extracts the text of every page. Runs on the blocking pool since decoding is CPU-bound
/// and the decoder may panic on hostile input.
pub async fn extract_text(pdf: Bytes) -> Result<String, AppError> {
    let size = pdf.len();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
        .map_err(|e| {
            warn!("PDF text extraction failed: {e}");
            AppError::UnprocessableEntity(format!("Could not read PDF: {e}"))
        })?;

    debug!(bytes = size, chars = text.len(), "extracted PDF text");
    Ok(text)
}

/// Returns true if the buffer starts with the `%PDF-` magic header.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF-")
}
