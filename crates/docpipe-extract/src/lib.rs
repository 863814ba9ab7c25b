//! PDF text extraction.
//!
//! Turns a raw PDF byte buffer into a single page-concatenated string.
//! Extraction is pure: identical bytes yield identical text. A document with
//! no extractable text (blank pages, image-only scans) is a valid empty
//! result; a buffer that is not a parseable PDF is a distinct error.

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The buffer could not be decoded as a PDF container.
    #[error("not a parseable PDF document: {0}")]
    Format(#[from] pdf_extract::OutputError),
}

/// Extract all text from a PDF byte buffer, pages concatenated in order.
///
/// Returns `Ok("")` for an empty buffer or a document with no extractable
/// text. Whitespace-only extraction output (page-break artifacts from blank
/// pages) is normalised to the empty string so callers can treat
/// `is_empty()` as the no-content condition. Malformed buffers fail with
/// [`ExtractError::Format`] and are never converted to empty text.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    if bytes.is_empty() {
        return Ok(String::new());
    }

    let text = pdf_extract::extract_text_from_mem(bytes)?;
    if text.trim().is_empty() {
        info!(bytes = bytes.len(), "pdf contains no extractable text");
        return Ok(String::new());
    }

    info!(
        bytes = bytes.len(),
        chars = text.len(),
        "extracted text from pdf"
    );
    Ok(text)
}
