//! Data models for case records and configuration.

pub mod case;
pub mod config;

pub use case::{CaseRecord, DocumentRecord, Label};
pub use config::{ApiConfig, ConversionConfig, DomdbConfig, PathConfig, expand_home};
