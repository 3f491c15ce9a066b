//! Export functionality for Xsdvi diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting a finished symbol tree into an output format. It is the final
//! stage in the Xsdvi processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! XSD Documents
//!     ↓ load
//! Schema Component Graph
//!     ↓ walk
//! Symbol Tree
//!     ↓ export (this module)
//! Output Document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`XsdviError::Export`] at the crate
//! boundary.
//!
//! [`XsdviError::Export`]: crate::XsdviError::Export

/// SVG export backend.
pub mod svg;

use crate::tree::SymbolTree;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Exports a symbol tree to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the tree has nothing to draw, or
    /// [`Error::Io`] if writing the output fails.
    fn export_tree(&mut self, tree: &SymbolTree) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
///
/// This type is converted into [`XsdviError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`XsdviError::Export`]: crate::XsdviError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
