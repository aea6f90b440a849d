//! PDF processing module.

mod extractor;

#[cfg(test)]
pub(crate) mod fixtures;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Extract text of every page, in page order.
    ///
    /// A page without extractable text yields an empty string, so the
    /// returned length always equals [`Self::page_count`].
    fn extract_pages(&self) -> Result<Vec<String>> {
        Ok((1..=self.page_count())
            .map(|page| self.extract_page_text(page).unwrap_or_default())
            .collect())
    }
}
