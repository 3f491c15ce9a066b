//! Xsdvi - Interactive diagrams of XML Schema documents.
//!
//! Loading, walking and rendering of W3C XML Schemas. A schema's element
//! declarations and types are walked into a tree of boxes (elements,
//! attributes, content-model groups, wildcards, identity constraints) and
//! drawn as an SVG document with expand/collapse controls.

pub mod config;

mod error;
mod export;
mod tree;
mod walker;

pub use xsdvi_core::{schema, symbol, text};
pub use xsdvi_parser::Loaded;

pub use error::XsdviError;
pub use export::svg::STYLESHEET;
pub use tree::{SymbolIter, SymbolTree};

use std::{fs, path::Path};

use log::{debug, error, info, trace};

use schema::{ComponentKind, SchemaModel};

use config::{AppConfig, DiagramOptions, StyleMode};
use export::Exporter;

/// Builder for loading schemas and rendering their diagrams.
///
/// This provides an API for processing schemas through loading, walking,
/// and rendering stages.
///
/// # Examples
///
/// ```rust,no_run
/// use xsdvi::{DiagramBuilder, config::{AppConfig, DiagramOptions, RootSelection}};
///
/// let source = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
///   <xs:element name="note" type="xs:string"/>
/// </xs:schema>"#;
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = DiagramBuilder::new(config);
///
/// // Load the schema
/// let loaded = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Walk it from the `note` element
/// let options = DiagramOptions::new(RootSelection::Named("note".to_string()));
/// let tree = builder.build_tree(loaded.model(), &options)
///     .expect("Root exists");
///
/// // Render the tree to SVG
/// let svg = builder.render_svg(&tree, &options)
///     .expect("Failed to render");
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use xsdvi::{DiagramBuilder, config::AppConfig};
    ///
    /// let config = AppConfig::default();
    /// let builder = DiagramBuilder::new(config);
    /// ```
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse schema text into a component graph.
    ///
    /// Includes and imports are not followed; use [`DiagramBuilder::load`]
    /// for schemas spread over several files.
    ///
    /// # Errors
    ///
    /// Returns `XsdviError::Parse` if the text is not a well-formed schema
    /// document. Problems the loader can recover from are returned as
    /// diagnostics of the [`Loaded`] schema instead.
    pub fn parse(&self, source: &str) -> Result<Loaded, XsdviError> {
        info!("Parsing schema");

        let loaded = xsdvi_parser::parse(source)
            .map_err(|err| XsdviError::new_parse_error(err, source))?;

        debug!(diagnostics = loaded.diagnostics().len(); "Schema parsed successfully");
        trace!(model:? = loaded.model(); "Parsed schema");

        Ok(loaded)
    }

    /// Load a schema file, following its local includes and imports.
    ///
    /// # Errors
    ///
    /// Returns `XsdviError::Io` if the file cannot be read, and
    /// `XsdviError::Parse` if it or one of the documents it includes is
    /// not a well-formed schema document.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use xsdvi::DiagramBuilder;
    ///
    /// let loaded = DiagramBuilder::default()
    ///     .load("schemas/order.xsd")
    ///     .expect("Failed to load");
    /// for diagnostic in loaded.diagnostics() {
    ///     println!("{diagnostic}");
    /// }
    /// ```
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Loaded, XsdviError> {
        let path = path.as_ref();
        info!(path:? = path; "Loading schema");

        let source = fs::read_to_string(path)?;
        let loaded = xsdvi_parser::load(path)
            .map_err(|err| XsdviError::new_parse_error(err, source))?;

        debug!(diagnostics = loaded.diagnostics().len(); "Schema loaded successfully");
        Ok(loaded)
    }

    /// Names of the top-level components of the given kinds, in document
    /// order, grouped by kind.
    pub fn root_names(&self, model: &SchemaModel, kinds: &[ComponentKind]) -> Vec<String> {
        model.root_names(kinds)
    }

    /// Walk the schema into the symbol tree of one diagram.
    ///
    /// `options` must select a single diagram: expand
    /// [`RootSelection::All`](config::RootSelection::All) with
    /// [`DiagramOptions::expand`] first.
    ///
    /// Returns `None` when there is nothing to draw, e.g. when the named
    /// root does not exist.
    pub fn build_tree(&self, model: &SchemaModel, options: &DiagramOptions) -> Option<SymbolTree> {
        info!(root:? = options.root(), one_node_only = options.one_node_only(); "Walking schema");

        let tree = walker::build_tree(model, options);
        if tree.is_empty() {
            error!(root:? = options.root(); "SVG is empty");
            return None;
        }

        trace!(tree:?; "Symbol tree");
        Some(tree)
    }

    /// Render a symbol tree to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `XsdviError::Config` if the style links an external
    /// stylesheet without naming it, and `XsdviError::Export` if the tree
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use xsdvi::{DiagramBuilder, config::DiagramOptions};
    ///
    /// let builder = DiagramBuilder::default();
    /// let loaded = builder.load("schemas/order.xsd")
    ///     .expect("Failed to load");
    ///
    /// let options = DiagramOptions::default();
    /// if let Some(tree) = builder.build_tree(loaded.model(), &options) {
    ///     let svg = builder.render_svg(&tree, &options)
    ///         .expect("Failed to render diagram");
    ///     println!("{}", svg);
    /// }
    /// ```
    pub fn render_svg(
        &self,
        tree: &SymbolTree,
        options: &DiagramOptions,
    ) -> Result<String, XsdviError> {
        let style = self.config.style();
        if style.mode() == StyleMode::Link && style.link_uri().is_none() {
            return Err(XsdviError::Config(
                "style mode `link` requires a stylesheet URI".to_string(),
            ));
        }

        info!(symbols = tree.len(); "Rendering diagram");
        let mut svg_exporter = export::svg::SvgBuilder::new(Vec::new())
            .with_style(style)
            .with_measure(self.config.layout().measure())
            .with_menu_buttons(!options.hide_menu_buttons())
            .with_origin(export::svg::root_origin(options.one_node_only()))
            .build()?;

        svg_exporter.export_tree(tree)?;

        let svg_string = String::from_utf8(svg_exporter.into_inner())
            .map_err(|err| XsdviError::Export(Box::new(err)))?;

        info!("SVG rendered successfully");
        Ok(svg_string)
    }
}
