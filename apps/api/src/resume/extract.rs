//! Turns an uploaded résumé into a [`Document`] the pipeline can chunk.

use serde_json::json;

use crate::errors::AppError;
use crate::pipeline::chunker::Document;

/// Extracts plain text from the uploaded bytes. PDFs go through pdf-extract;
/// plain-text uploads are accepted as-is.
pub fn extract_document(content_type: &str, data: &[u8]) -> Result<Document, AppError> {
    let text = match content_type {
        "application/pdf" => pdf_extract::extract_text_from_mem(data).map_err(|e| {
            AppError::UnprocessableEntity(format!("Could not extract text from PDF: {e}"))
        })?,
        t if t.starts_with("text/") => String::from_utf8(data.to_vec())
            .map_err(|_| AppError::UnprocessableEntity("Resume is not valid UTF-8".to_string()))?,
        other => {
            return Err(AppError::UnprocessableEntity(format!(
                "Unsupported resume content type: {other}"
            )))
        }
    };

    Ok(Document {
        text,
        metadata: json!({ "content_type": content_type }),
    })
}
