//! Document text extraction.
//!
//! A document's HTML body becomes a single page; a PDF body is split into
//! its pages. Failures stay local to the document: callers use
//! [`document_pages`], which logs and yields no pages instead of erroring.

mod html;

pub use html::html_to_text;

use base64::Engine;
use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::models::DocumentRecord;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Decode a base64 PDF payload, ignoring embedded whitespace.
pub fn decode_pdf_payload(payload: &str) -> Result<Vec<u8>, ExtractionError> {
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(base64::engine::general_purpose::STANDARD.decode(compact)?)
}

/// Extract the pages of one PDF payload.
pub fn pdf_pages(payload: &str) -> Result<Vec<String>, ExtractionError> {
    let data = decode_pdf_payload(payload)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;
    Ok(extractor.extract_pages()?)
}

/// Extract the pages of a document, HTML taking precedence over PDF.
pub fn extract_pages(doc: &DocumentRecord) -> Result<Vec<String>, ExtractionError> {
    if let Some(html) = doc.content_html.as_deref() {
        return Ok(vec![html_to_text(html)]);
    }
    if let Some(pdf) = doc.content_pdf.as_deref() {
        return pdf_pages(pdf);
    }
    Ok(Vec::new())
}

/// Like [`extract_pages`], but a failure is logged and yields no pages.
pub fn document_pages(doc: &DocumentRecord) -> Vec<String> {
    match extract_pages(doc) {
        Ok(pages) => {
            debug!(doc = doc.id.as_deref().unwrap_or("unknown"), pages = pages.len(), "Extracted document text");
            pages
        }
        Err(e) => {
            warn!(
                "Failed to extract text from PDF for doc {}: {}",
                doc.id.as_deref().unwrap_or("unknown"),
                e
            );
            Vec::new()
        }
    }
}

/// Single-block text of a document: non-empty pages joined by blank lines.
///
/// Returns `None` when the document yields no text at all.
pub fn document_text(doc: &DocumentRecord) -> Option<String> {
    let text = document_pages(doc)
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::pdf_base64;

    fn html_doc(html: &str) -> DocumentRecord {
        DocumentRecord {
            id: Some("doc1".to_string()),
            content_html: Some(html.to_string()),
            ..Default::default()
        }
    }

    fn pdf_doc(payload: String) -> DocumentRecord {
        DocumentRecord {
            id: Some("doc2".to_string()),
            content_pdf: Some(payload),
            ..Default::default()
        }
    }

    #[test]
    fn test_html_is_single_page() {
        let pages = extract_pages(&html_doc("<p>A</p><p>B</p>")).unwrap();
        assert_eq!(pages, vec!["A\nB".to_string()]);
    }

    #[test]
    fn test_html_takes_precedence() {
        let mut doc = html_doc("<p>from html</p>");
        doc.content_pdf = Some(pdf_base64(&["from pdf"]));
        assert_eq!(extract_pages(&doc).unwrap(), vec!["from html".to_string()]);
    }

    #[test]
    fn test_pdf_pages() {
        let pages = extract_pages(&pdf_doc(pdf_base64(&["One", "", "Three"]))).unwrap();
        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("One"));
        assert!(pages[1].is_empty());
        assert!(pages[2].contains("Three"));
    }

    #[test]
    fn test_wrapped_base64_payload() {
        let payload = pdf_base64(&["Wrapped"]);
        let wrapped = payload
            .as_bytes()
            .chunks(76)
            .map(|c| std::str::from_utf8(c).unwrap())
            .collect::<Vec<_>>()
            .join("\n");
        let pages = pdf_pages(&wrapped).unwrap();
        assert!(pages[0].contains("Wrapped"));
    }

    #[test]
    fn test_malformed_base64_degrades_to_no_text() {
        let doc = pdf_doc("***not base64***".to_string());
        assert!(matches!(extract_pages(&doc), Err(ExtractionError::Base64(_))));
        assert!(document_pages(&doc).is_empty());
        assert_eq!(document_text(&doc), None);
    }

    #[test]
    fn test_unreadable_pdf_degrades_to_no_text() {
        use base64::Engine;
        let payload = base64::engine::general_purpose::STANDARD.encode(b"%PDF-broken");
        let doc = pdf_doc(payload);
        assert!(matches!(extract_pages(&doc), Err(ExtractionError::Pdf(_))));
        assert!(document_pages(&doc).is_empty());
    }

    #[test]
    fn test_document_without_content() {
        let doc = DocumentRecord::default();
        assert!(document_pages(&doc).is_empty());
        assert_eq!(document_text(&doc), None);
    }

    #[test]
    fn test_document_text_joins_non_empty_pages() {
        let doc = pdf_doc(pdf_base64(&["One", "", "Three"]));
        let text = document_text(&doc).unwrap();
        assert!(text.contains("One"));
        assert!(text.contains("Three"));
        assert!(!text.contains("\n\n\n\n"));
    }
}
