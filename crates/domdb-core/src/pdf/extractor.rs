//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        // pdf-extract panics on some malformed inputs
        let raw = self.raw_data.as_slice();
        let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(raw))
            .map_err(|_| PdfError::TextExtraction("pdf-extract panicked".to_string()))?
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        let text = doc
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        trace!("Page {} yielded {} chars", page, text.len());
        Ok(text.trim_end().to_string())
    }

    fn extract_pages(&self) -> Result<Vec<String>> {
        let page_count = self.page_count();
        let mut pages = Vec::with_capacity(page_count as usize);

        for page in 1..=page_count {
            let text = match self.extract_page_text(page) {
                Ok(text) => text,
                Err(e) => {
                    debug!("No text from page {}: {}", page, e);
                    String::new()
                }
            };
            pages.push(text);
        }

        // lopdf cannot decode every font encoding; when it finds nothing at
        // all, let pdf-extract try the whole document as a single page.
        if pages.iter().all(|p| p.trim().is_empty()) {
            match self.extract_text() {
                Ok(text) if !text.trim().is_empty() => {
                    debug!("Per-page extraction empty, using whole-document text");
                    return Ok(vec![text.trim().to_string()]);
                }
                Ok(_) => {}
                Err(e) => debug!("Whole-document extraction failed: {}", e),
            }
        }

        Ok(pages)
    }
}
