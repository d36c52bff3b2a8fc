use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("not a readable PDF: {0}")]
    UnreadableDocument(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A document reduced to its text layer.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Concatenation of each text-bearing page's text, one trailing newline
    /// per page, in page order. Pages with no extractable text (scanned or
    /// image-only) contribute nothing.
    pub text: String,
    pub page_count: usize,
}

/// Trait for PDF text extraction backends.
///
/// Implementors provide the low-level text-layer extraction step only: no
/// OCR, no layout reconstruction. Extraction is synchronous; async callers
/// run it under `tokio::task::spawn_blocking`.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<ExtractedDocument, ExtractError>;
}
