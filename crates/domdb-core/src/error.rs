//! Error types for the domdb-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the domdb library.
#[derive(Error, Debug)]
pub enum DomdbError {
    /// A raw case record failed schema validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A conversion run could not complete.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Text could not be extracted from a document.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Remote API or case storage error.
    #[error("download error: {0}")]
    Download(#[from] DownloadError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A raw case record that does not fit the case schema.
///
/// Every variant carries the path of the offending field, e.g.
/// `documents[1].contentPdf`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is missing, null or empty.
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// Field holds a JSON value of the wrong type.
    #[error("invalid type for {field}: expected {expected}")]
    InvalidType { field: String, expected: &'static str },
}

impl ValidationError {
    /// Path of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field } | Self::InvalidType { field, .. } => field,
        }
    }
}

/// Errors that abort a whole conversion run.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The source directory holds no `*.json` files.
    #[error("No JSON files found in {}", .0.display())]
    NoInputFiles(PathBuf),

    /// The source directory could not be listed.
    #[error("failed to read input directory {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output artifact could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output artifact could not be serialized.
    #[error("failed to serialize {what}: {reason}")]
    Serialize { what: &'static str, reason: String },

    /// A conversion worker panicked or was cancelled.
    #[error("conversion worker failed: {0}")]
    Worker(String),
}

impl ConversionError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Errors related to extracting text from a single document.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The PDF payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded payload is not a readable PDF.
    #[error(transparent)]
    Pdf(#[from] PdfError),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to the remote API and local case storage.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// `DOMDB_USER_ID` or `DOMDB_PASSWORD` is not set.
    #[error("Missing USER_ID or PASSWORD environment variables")]
    MissingCredentials,

    /// The authentication call failed.
    #[error("Failed to get access token: {0}")]
    Auth(String),

    /// The case listing call failed.
    #[error("Failed to fetch cases: {0}")]
    Fetch(String),

    /// A fetched page could not be stored.
    #[error("Failed to save cases: {0}")]
    Storage(String),
}

/// Result type for the domdb library.
pub type Result<T> = std::result::Result<T, DomdbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_files_message() {
        let err = ConversionError::NoInputFiles(PathBuf::from("/tmp/cases"));
        assert_eq!(err.to_string(), "No JSON files found in /tmp/cases");
    }

    #[test]
    fn test_validation_error_field() {
        let err = ValidationError::InvalidType {
            field: "documents[0].contentHtml".to_string(),
            expected: "string",
        };
        assert_eq!(err.field(), "documents[0].contentHtml");
    }
}
