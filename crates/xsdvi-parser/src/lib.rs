//! # Xsdvi Parser
//!
//! Loader for W3C XML Schema documents. This crate turns schema text into
//! the component graph of [`xsdvi_core::schema`].
//!
//! ## Usage
//!
//! ```
//! # use xsdvi_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
//!           <xs:element name="note" type="xs:string"/>
//!         </xs:schema>
//!     "#;
//!
//!     let loaded = parse(source)?;
//!     assert!(loaded.model().find_element("note").is_some());
//!     Ok(())
//! }
//! ```

mod builder;
mod builtins;
pub mod error;
mod source;
mod span;
mod xsd;

pub use span::Span;
pub use xsd::XSD_NAMESPACE;

use std::{fs, path::Path};

use log::info;

use xsdvi_core::schema::SchemaModel;

use error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError};
use source::SchemaSource;

/// A loaded schema with the non-fatal diagnostics reported while loading.
#[derive(Debug)]
pub struct Loaded {
    model: SchemaModel,
    diagnostics: Vec<Diagnostic>,
}

impl Loaded {
    /// The schema component graph.
    pub fn model(&self) -> &SchemaModel {
        &self.model
    }

    /// Warnings and errors, in the order they were found.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (SchemaModel, Vec<Diagnostic>) {
        (self.model, self.diagnostics)
    }
}

/// Parse schema text into a component graph.
///
/// Loading runs in three steps:
///
/// 1. **Read** - Check that the text is a well-formed `xs:schema` document
/// 2. **Register** - Give every top-level component an identity
/// 3. **Resolve** - Build the components and link their references
///
/// `xs:include` and `xs:import` are not followed for text input since there
/// is no location to resolve them against; use [`load`] for that.
///
/// # Errors
///
/// Returns a [`ParseError`] if the text is not well-formed XML or its root
/// is not `xs:schema`. Other problems are reported through
/// [`Loaded::diagnostics`].
pub fn parse(source: &str) -> Result<Loaded, ParseError> {
    load_sources(SchemaSource::from_text(source))
}

/// Load a schema file together with the local files it includes or imports.
///
/// # Errors
///
/// Returns a [`ParseError`] if the file cannot be read, is not well-formed
/// XML, or is not a schema document.
pub fn load(path: impl AsRef<Path>) -> Result<Loaded, ParseError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| {
        Diagnostic::fatal(format!("cannot read `{}`: {err}", path.display()))
            .with_code(ErrorCode::E003)
    })?;
    load_sources(SchemaSource::from_file(path, text))
}

fn load_sources(main: SchemaSource) -> Result<Loaded, ParseError> {
    let name = main.name.clone();
    let mut collector = DiagnosticCollector::new();

    let sources = source::collect_sources(main, &mut collector);
    let model = if collector.has_fatal() {
        None
    } else {
        Some(builder::build_model(&sources, &mut collector))
    };
    let diagnostics = collector.finish()?;
    let model = model.unwrap_or_default();

    info!(
        schema = name,
        documents = sources.len(),
        diagnostics = diagnostics.len();
        "Schema loaded"
    );
    Ok(Loaded { model, diagnostics })
}
