//! Error and diagnostic system for the schema loader.
//!
//! Loading a schema reports problems as [`Diagnostic`]s rather than failing
//! on the first one. Each diagnostic has a [`Severity`]:
//!
//! - [`Severity::Fatal`] - no component graph can be built (unreadable file,
//!   malformed XML, a root element other than `xs:schema`). Loading returns
//!   a [`ParseError`] holding every diagnostic collected so far.
//! - [`Severity::Error`] - a component is broken, for example an unresolved
//!   reference. The offending part is dropped or replaced and loading goes on.
//! - [`Severity::Warning`] - something was skipped, for example an
//!   unsupported schema child.
//!
//! # Example
//!
//! ```
//! # use xsdvi_parser::error::{Diagnostic, ErrorCode};
//! # use xsdvi_parser::Span;
//!
//! let diag = Diagnostic::error("type `OrderType` is not defined")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(120..152), "referenced here")
//!     .with_help("declare the type or import the schema defining it");
//! assert!(diag.severity().is_error());
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
