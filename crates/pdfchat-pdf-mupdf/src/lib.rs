use std::path::Path;

use mupdf::{Document, TextPageFlags};

use pdfchat_core::{ExtractError, ExtractedDocument, TextExtractor};

/// MuPDF-based implementation of [`TextExtractor`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that non-PDF code paths do not transitively
/// depend on it.
///
/// Extraction reads the text layer only. Each text-bearing page
/// contributes its text followed by a newline, in page order; pages with
/// nothing extractable (scanned or image-only) contribute nothing.
#[derive(Debug, Default)]
pub struct MupdfExtractor;

impl MupdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for MupdfExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedDocument, ExtractError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| ExtractError::UnreadableDocument("invalid path encoding".into()))?;

        let document = Document::open(path_str)
            .map_err(|e| ExtractError::UnreadableDocument(e.to_string()))?;

        let mut text = String::new();
        let mut page_count = 0usize;

        for page_result in document
            .pages()
            .map_err(|e| ExtractError::Extraction(e.to_string()))?
        {
            page_count += 1;
            let page = page_result.map_err(|e| ExtractError::Extraction(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| ExtractError::Extraction(e.to_string()))?;

            let mut page_text = String::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    if !page_text.is_empty() {
                        page_text.push('\n');
                    }
                    page_text.push_str(&line_text);
                }
            }

            // Pages with no text layer contribute nothing, not a placeholder.
            if !page_text.is_empty() {
                text.push_str(&page_text);
                text.push('\n');
            }
        }

        Ok(ExtractedDocument { text, page_count })
    }
}
