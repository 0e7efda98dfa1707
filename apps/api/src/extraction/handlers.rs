//! Axum route handlers for PDF text extraction.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::pdf_text::{extract_text, looks_like_pdf};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub extracted_text: String,
}

/// POST /pdfs/extracttext
///
/// Multipart upload with a `pdf` file field. Returns the text of every page.
pub async fn handle_extract_text(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, AppError> {
    let pdf = read_pdf_field(multipart, state.config.max_upload_bytes).await?;
    let text = extract_text(pdf).await?;
    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No text could be extracted from the PDF".to_string(),
        ));
    }

    info!(chars = text.len(), "PDF text extracted");
    Ok(Json(ExtractTextResponse {
        extracted_text: text,
    }))
}

/// Pulls the `pdf` field out of a multipart body and checks it is a plausible PDF.
pub async fn read_pdf_field(mut multipart: Multipart, max_bytes: usize) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("pdf") {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if data.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "PDF is {} bytes; the limit is {max_bytes}",
                data.len()
            )));
        }
        if !looks_like_pdf(&data) {
            return Err(AppError::Validation("Uploaded file is not a PDF".to_string()));
        }
        return Ok(data);
    }
    Err(AppError::Validation("Missing 'pdf' file field".to_string()))
}
