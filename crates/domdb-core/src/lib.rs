//! Core library for working with Danish court verdicts from domsdatabasen.dk.
//!
//! This crate provides:
//! - Case record validation for raw API records
//! - Citation field extraction (entry ids, dates, court descriptions)
//! - Document text extraction from HTML and base64 PDF bodies
//! - BibTeX, Markdown and EVID directory export
//! - Batch conversion of downloaded case files
//! - Fetching case pages from the remote API

pub mod convert;
pub mod download;
pub mod error;
pub mod fields;
pub mod models;
pub mod output;
pub mod pdf;
pub mod text;

pub use convert::{convert_to_bib, convert_to_evid, convert_to_md};
pub use download::{ApiClient, CaseSource, Credentials, load_next_batch};
pub use error::{
    ConversionError, DomdbError, DownloadError, ExtractionError, PdfError, Result, ValidationError,
};
pub use fields::CaseFields;
pub use models::{CaseRecord, DocumentRecord, DomdbConfig, Label};
pub use output::{BuildOutcome, EvidBuilder, EvidLayout};
pub use pdf::{PdfExtractor, PdfProcessor};
