//! SVG export backend.
//!
//! [`SvgBuilder`] collects the output settings and produces an [`Svg`]
//! exporter writing to any [`Write`] sink. The exporter places every symbol of
//! the tree ([`layout`]), draws boxes, connectors and toggles ([`symbol`]),
//! and adds the stylesheet and the expand/collapse script.

mod layout;
mod script;
mod style;
mod symbol;

pub use style::STYLESHEET;

use std::io::Write;

use log::{debug, error, info};
use svg::{self, node::element as svg_element};

use xsdvi_core::{
    geometry::{Bounds, Point, Size},
    text::{EstimateMeasure, TextMeasure},
};

use crate::{
    config::{StyleConfig, StyleMode},
    export,
    tree::SymbolTree,
};
use layout::PlacedSymbol;

/// Space kept to the right of and below the content.
const MARGIN: f32 = 20.0;

/// Where the root box of a diagram starts.
///
/// Diagrams with menu buttons keep room above the root for them.
pub fn root_origin(one_node_only: bool) -> Point {
    if one_node_only {
        Point::new(20.0, 20.0)
    } else {
        Point::new(20.0, 50.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stylesheet {
    Embedded,
    Linked(String),
}

/// Builder for [`Svg`] exporters.
pub struct SvgBuilder<W: Write> {
    writer: W,
    style: StyleConfig,
    measure: Option<Box<dyn TextMeasure>>,
    menu_buttons: bool,
    origin: Point,
}

impl<W: Write> SvgBuilder<W> {
    /// Creates a builder writing the document to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            style: StyleConfig::default(),
            measure: None,
            menu_buttons: true,
            origin: root_origin(false),
        }
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Sets the text measure used to size the boxes. Defaults to a
    /// per-character estimate.
    pub fn with_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.measure = Some(measure);
        self
    }

    /// Shows or hides the expand/collapse controls.
    pub fn with_menu_buttons(mut self, menu_buttons: bool) -> Self {
        self.menu_buttons = menu_buttons;
        self
    }

    /// Sets the top-left corner of the root box.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// # Errors
    ///
    /// Returns [`export::Error::Render`] when the style links an external
    /// stylesheet without naming it.
    pub fn build(self) -> Result<Svg<W>, export::Error> {
        let stylesheet = match (self.style.mode(), self.style.link_uri()) {
            (StyleMode::Embody, _) => Stylesheet::Embedded,
            (StyleMode::Link, Some(uri)) => Stylesheet::Linked(uri.to_string()),
            (StyleMode::Link, None) => {
                return Err(export::Error::Render(
                    "Linked stylesheet has no URI".to_string(),
                ));
            }
        };

        Ok(Svg {
            writer: self.writer,
            measure: self
                .measure
                .unwrap_or_else(|| Box::new(EstimateMeasure::default())),
            stylesheet,
            menu_buttons: self.menu_buttons,
            origin: self.origin,
        })
    }
}

/// SVG exporter for symbol trees.
pub struct Svg<W: Write> {
    writer: W,
    measure: Box<dyn TextMeasure>,
    stylesheet: Stylesheet,
    menu_buttons: bool,
    origin: Point,
}

impl<W: Write> Svg<W> {
    /// Renders `tree` into an SVG document, or `None` for an empty tree.
    pub fn render_tree(&self, tree: &SymbolTree) -> Option<svg::Document> {
        let root = tree.root()?;
        let placed = PlacedSymbol::place(root, self.origin, self.measure.as_ref());

        let mut content_bounds = placed.subtree_bounds();
        if self.menu_buttons {
            content_bounds = content_bounds.merge(&script::menu_bounds());
        }
        let svg_size = self.calculate_svg_dimensions(content_bounds);

        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());

        if self.stylesheet == Stylesheet::Embedded {
            doc = doc.add(svg_element::Style::new(STYLESHEET).set("type", "text/css"));
        }
        if self.menu_buttons {
            doc = doc.add(script::script()).add(script::menu_buttons());
        }

        let mut next_group_id = 0;
        let diagram = svg_element::Group::new()
            .set("id", "diagram")
            .add(self.render_symbol(&placed, &mut next_group_id));

        Some(doc.add(diagram))
    }

    /// Consumes the exporter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// The document extends from the origin to the far corner of the
    /// content, plus a margin.
    fn calculate_svg_dimensions(&self, content_bounds: Bounds) -> Size {
        let width = content_bounds.max_x() + MARGIN;
        let height = content_bounds.max_y() + MARGIN;

        debug!("Final SVG dimensions: {width}x{height}");

        Size::new(width, height)
    }

    fn write_document(&mut self, doc: svg::Document) -> Result<(), export::Error> {
        let result = self.write_prolog().and_then(|()| {
            write!(self.writer, "{doc}")?;
            self.writer.flush()
        });

        if let Err(err) = result {
            error!(err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }
        Ok(())
    }

    fn write_prolog(&mut self) -> std::io::Result<()> {
        writeln!(self.writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        if let Stylesheet::Linked(uri) = &self.stylesheet {
            writeln!(
                self.writer,
                r#"<?xml-stylesheet href="{}" type="text/css"?>"#,
                escape_attribute(uri)
            )?;
        }
        Ok(())
    }
}

impl<W: Write> export::Exporter for Svg<W> {
    fn export_tree(&mut self, tree: &SymbolTree) -> Result<(), export::Error> {
        let Some(doc) = self.render_tree(tree) else {
            return Err(export::Error::Render("Nothing to draw".to_string()));
        };
        info!(symbols = tree.len(); "SVG document rendered");

        self.write_document(doc)
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
