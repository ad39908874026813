//! Best-effort plain-text extraction for uploaded PDF documents.
//!
//! Page texts are concatenated in document order. Extraction failures are
//! typed so the upload pipeline can log the reason while still treating the
//! document as empty text instead of failing the whole request.

use lopdf::Document;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    #[error("PDF is encrypted")]
    Encrypted,
}

/// Extract plain text from raw PDF bytes.
///
/// Individual pages that cannot be decoded contribute nothing; only a
/// document that cannot be opened at all is an error.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractError::Parse(e.to_string()))?;

    if doc.is_encrypted() {
        return Err(ExtractError::Encrypted);
    }

    let mut text = String::new();
    for page_number in doc.get_pages().keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                debug!(page = page_number, error = %e, "Skipping undecodable page");
            }
        }
    }

    Ok(text)
}
