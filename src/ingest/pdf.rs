//! Embedded PDF text, page by page.

use std::path::Path;

use lopdf::Document;

use super::PdfTextSource;
use crate::error::{Error, Result};

/// Reads the text layer with lopdf
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfText;

impl PdfTextSource for LopdfText {
    fn page_texts(&self, pdf: &Path) -> Result<Vec<String>> {
        let extraction_error = |message: String| Error::Extraction {
            path: pdf.to_path_buf(),
            message,
        };

        let doc = Document::load(pdf).map_err(|e| extraction_error(e.to_string()))?;
        if doc.is_encrypted() {
            return Err(extraction_error("document is encrypted".to_string()));
        }

        let pages = doc.get_pages();
        let mut texts = Vec::with_capacity(pages.len());
        for page_num in pages.keys() {
            // A page that fails to decode counts as a page without text
            let text = match doc.extract_text(&[*page_num]) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!("Page {}: no text layer ({})", page_num, e);
                    String::new()
                }
            };
            texts.push(text);
        }
        Ok(texts)
    }
}
