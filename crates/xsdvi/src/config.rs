//! Configuration types for Xsdvi diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are measured, styled and which schema components they start from.
//! [`AppConfig`] and its sections implement [`serde::Deserialize`] for
//! loading from configuration files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - Controls how text is measured to size the boxes.
//! - [`StyleConfig`] - Controls whether the stylesheet is embedded or linked.
//! - [`DiagramOptions`] - Per-diagram settings: the root component and the
//!   one-node-only mode. Not part of the configuration file.
//!
//! # Example
//!
//! ```
//! # use xsdvi::config::{AppConfig, StyleMode};
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.style().mode(), StyleMode::Embody);
//! ```

use serde::Deserialize;

use xsdvi_core::{
    schema::{ComponentKind, SchemaModel},
    text::{DEFAULT_CHAR_WIDTH, EstimateMeasure, FontMeasure, TextMeasure},
};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replaces the style configuration, e.g. with one chosen on the command line.
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }
}

/// How box widths are derived from text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMeasureKind {
    /// A fixed advance per character. Output does not depend on installed fonts.
    #[default]
    Estimate,
    /// Shape the text with the configured font.
    Font,
}

/// Text measurement settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    text_measure: TextMeasureKind,

    /// Font family used by the `font` measure.
    #[serde(default = "default_font_family")]
    font_family: String,

    /// Font size in pixels used by the `font` measure.
    #[serde(default = "default_font_size")]
    font_size: f32,
}

fn default_font_family() -> String {
    "Arial".to_string()
}

fn default_font_size() -> f32 {
    11.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            text_measure: TextMeasureKind::default(),
            font_family: default_font_family(),
            font_size: default_font_size(),
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    pub fn new(text_measure: TextMeasureKind, font_family: impl Into<String>, font_size: f32) -> Self {
        Self {
            text_measure,
            font_family: font_family.into(),
            font_size,
        }
    }

    pub fn text_measure(&self) -> TextMeasureKind {
        self.text_measure
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Builds the configured [`TextMeasure`].
    pub fn measure(&self) -> Box<dyn TextMeasure> {
        match self.text_measure {
            TextMeasureKind::Estimate => Box::new(EstimateMeasure::new(DEFAULT_CHAR_WIDTH)),
            TextMeasureKind::Font => Box::new(FontMeasure::new(&self.font_family, self.font_size)),
        }
    }
}

/// Where a document gets its stylesheet from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    /// The stylesheet is embedded in every document.
    #[default]
    Embody,
    /// Documents reference an external stylesheet at [`StyleConfig::link_uri`].
    Link,
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    mode: StyleMode,

    /// Location of the external stylesheet for [`StyleMode::Link`].
    #[serde(default)]
    uri: Option<String>,
}

impl StyleConfig {
    /// Embed the stylesheet in every document.
    pub fn embody() -> Self {
        Self::default()
    }

    /// Link every document to the stylesheet at `uri`.
    pub fn link(uri: impl Into<String>) -> Self {
        Self {
            mode: StyleMode::Link,
            uri: Some(uri.into()),
        }
    }

    pub fn mode(&self) -> StyleMode {
        self.mode
    }

    /// The stylesheet to link, or `None` when the stylesheet is embedded.
    pub fn link_uri(&self) -> Option<&str> {
        match self.mode {
            StyleMode::Link => self.uri.as_deref(),
            StyleMode::Embody => None,
        }
    }
}

/// Which component a diagram starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RootSelection {
    /// Every top-level component under a synthetic schema root.
    #[default]
    Schema,
    /// One diagram per top-level component of the root kinds.
    All,
    /// The top-level component with this name.
    Named(String),
}

impl RootSelection {
    /// Parses a root name, where `all` selects every component.
    pub fn from_name(name: &str) -> Self {
        if name == "all" {
            Self::All
        } else {
            Self::Named(name.to_string())
        }
    }
}

/// Settings of one diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramOptions {
    root: RootSelection,
    root_kinds: Vec<ComponentKind>,
    one_node_only: bool,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            root: RootSelection::Schema,
            root_kinds: vec![ComponentKind::ElementDeclaration],
            one_node_only: false,
        }
    }
}

impl DiagramOptions {
    pub fn new(root: RootSelection) -> Self {
        Self {
            root,
            ..Self::default()
        }
    }

    /// Sets the kinds of components eligible as roots (builder style).
    ///
    /// An empty list keeps the default of element declarations.
    pub fn with_root_kinds(mut self, kinds: Vec<ComponentKind>) -> Self {
        if !kinds.is_empty() {
            self.root_kinds = kinds;
        }
        self
    }

    /// Limits the diagram to the root box and its direct content (builder style).
    pub fn with_one_node_only(mut self, one_node_only: bool) -> Self {
        self.one_node_only = one_node_only;
        self
    }

    pub fn root(&self) -> &RootSelection {
        &self.root
    }

    pub fn root_kinds(&self) -> &[ComponentKind] {
        &self.root_kinds
    }

    pub fn one_node_only(&self) -> bool {
        self.one_node_only
    }

    /// The name of the single root component, if one is selected.
    pub fn root_name(&self) -> Option<&str> {
        match &self.root {
            RootSelection::Named(name) => Some(name),
            RootSelection::Schema | RootSelection::All => None,
        }
    }

    /// Menu buttons and expand/collapse toggles are hidden in one-node-only mode.
    pub fn hide_menu_buttons(&self) -> bool {
        self.one_node_only
    }

    /// Splits these options into one set per diagram to draw.
    ///
    /// [`RootSelection::All`] becomes one [`RootSelection::Named`] per
    /// top-level component of the root kinds, each in one-node-only mode.
    /// Any other selection is a single diagram.
    pub fn expand(&self, model: &SchemaModel) -> Vec<DiagramOptions> {
        match &self.root {
            RootSelection::All => model
                .root_names(&self.root_kinds)
                .into_iter()
                .map(|name| Self {
                    root: RootSelection::Named(name),
                    root_kinds: self.root_kinds.clone(),
                    one_node_only: true,
                })
                .collect(),
            RootSelection::Schema | RootSelection::Named(_) => vec![self.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use xsdvi_core::schema::{ComplexTypeDefinition, ElementDeclaration, TypeDefinition};

    use super::*;

    fn model() -> SchemaModel {
        let mut model = SchemaModel::new(None);
        let ty = model.add_type(TypeDefinition::Complex(ComplexTypeDefinition::new(
            Some("T".to_string()),
            None,
        )));
        model.register_global_type(ty);
        for name in ["a", "b"] {
            let id = model.add_element(ElementDeclaration::new(name, None, ty));
            model.register_global_element(id);
        }
        model
    }

    #[test]
    fn test_root_selection_from_name() {
        assert_eq!(RootSelection::from_name("all"), RootSelection::All);
        assert_eq!(
            RootSelection::from_name("Order"),
            RootSelection::Named("Order".to_string())
        );
    }

    #[test]
    fn test_expand_all_forces_one_node_only() {
        let options = DiagramOptions::new(RootSelection::All);
        let expanded = options.expand(&model());

        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[0].root_name(), Some("a"));
        assert_eq!(expanded[1].root_name(), Some("b"));
        assert!(expanded.iter().all(DiagramOptions::one_node_only));
    }

    #[test]
    fn test_expand_all_with_type_kind() {
        let options = DiagramOptions::new(RootSelection::All).with_root_kinds(vec![
            ComponentKind::ElementDeclaration,
            ComponentKind::TypeDefinition,
        ]);
        let names: Vec<_> = options
            .expand(&model())
            .iter()
            .filter_map(|o| o.root_name().map(str::to_string))
            .collect();

        assert_eq!(names, ["a", "b", "T"]);
    }

    #[test]
    fn test_expand_named_is_unchanged() {
        let options = DiagramOptions::new(RootSelection::Named("a".to_string()));
        assert_eq!(options.expand(&model()), vec![options.clone()]);
    }

    #[test]
    fn test_style_link_uri() {
        assert_eq!(StyleConfig::embody().link_uri(), None);
        assert_eq!(StyleConfig::link("xsdvi.css").link_uri(), Some("xsdvi.css"));
    }
}
