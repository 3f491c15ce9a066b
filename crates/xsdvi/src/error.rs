//! Error types for Xsdvi operations.
//!
//! This module provides the main error type [`XsdviError`] which wraps
//! the error conditions that can occur while loading and drawing a schema.

use std::io;

use thiserror::Error;

use xsdvi_parser::error::ParseError;

/// The main error type for Xsdvi operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant holds every diagnostic of a schema that could not be
/// loaded, together with the schema text, so that callers can show the
/// offending source locations.
#[derive(Debug, Error)]
pub enum XsdviError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for XsdviError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl XsdviError {
    /// Create a new `Parse` error with the associated schema text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
