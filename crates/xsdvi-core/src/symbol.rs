//! Renderable diagram symbols.
//!
//! A [`Symbol`] is one box of the diagram. Its [`SymbolKind`] is a closed set
//! of variants, one per schema construct the diagram can show, and carries
//! the kind-specific attributes. Every symbol owns its ordered children, so
//! a diagram is a plain tree with a single root.
//!
//! Sizing is fixed per kind: each kind reserves a number of text slots at
//! fixed vertical offsets ([`Symbol::text_lines`]), its height is a per-kind
//! constant grown by description lines, and its width is the widest of its
//! text fragments ([`Symbol::width`]).
//!
//! # Example
//!
//! ```
//! # use xsdvi_core::symbol::{ElementSymbol, Symbol, SymbolKind};
//! # use xsdvi_core::text::EstimateMeasure;
//! let mut order = Symbol::new(SymbolKind::Element(ElementSymbol {
//!     name: "Order".to_string(),
//!     type_ref: Some("type: OrderType".to_string()),
//!     ..ElementSymbol::default()
//! }));
//! order.append_child(Symbol::new(SymbolKind::Sequence { cardinality: None }));
//!
//! assert_eq!(order.children().len(), 1);
//! assert!(order.width(&EstimateMeasure::default()) >= Symbol::MIN_WIDTH);
//! ```

mod kind;
mod width;

pub use kind::{AttributeSymbol, ElementSymbol, IdentitySymbol, WildcardSymbol};
pub use width::WidthCalculator;

use crate::text::TextMeasure;

/// Vertical offset of the first text baseline inside a box.
pub const FIRST_LINE_Y: f32 = 13.0;

/// Vertical distance between two text baselines.
pub const LINE_HEIGHT: f32 = 14.0;

/// Space kept below the last reserved text slot.
const BOTTOM_PADDING: f32 = 5.0;

/// Horizontal padding used for width candidates.
const TEXT_OFFSET: f32 = 15.0;

/// The kinds of diagram symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// Synthetic root holding every top-level component.
    Schema,
    Element(ElementSymbol),
    Attribute(AttributeSymbol),
    Sequence { cardinality: Option<String> },
    Choice { cardinality: Option<String> },
    All { cardinality: Option<String> },
    Any(WildcardSymbol),
    AnyAttribute(WildcardSymbol),
    Key(IdentitySymbol),
    Keyref { identity: IdentitySymbol, refer: String },
    Unique(IdentitySymbol),
    Selector { xpath: String },
    Field { xpath: String },
    /// Marks a recursive reference to a declaration already on the path.
    Loop,
}

/// The styling role of a text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    /// The box title.
    Title,
    /// Secondary information: namespace, type, properties.
    Detail,
    /// Documentation lines.
    Description,
}

/// A line of text placed in one of a box's fixed text slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    slot: usize,
    text: String,
    role: TextRole,
}

impl TextLine {
    fn new(slot: usize, text: impl Into<String>, role: TextRole) -> Self {
        Self {
            slot,
            text: text.into(),
            role,
        }
    }

    /// Index of the slot, counted from the top of the box.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Baseline offset from the top of the box.
    pub fn y(&self) -> f32 {
        FIRST_LINE_Y + self.slot as f32 * LINE_HEIGHT
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn role(&self) -> TextRole {
        self.role
    }
}

/// A diagram node: a kind, documentation lines and owned children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    kind: SymbolKind,
    description: Vec<String>,
    children: Vec<Symbol>,
}

impl Symbol {
    /// Minimum width of any box.
    pub const MIN_WIDTH: f32 = 60.0;

    pub fn new(kind: SymbolKind) -> Self {
        Self {
            kind,
            description: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the description lines (builder style).
    pub fn with_description(mut self, description: Vec<String>) -> Self {
        self.description = description;
        self
    }

    /// Attaches `child` as the last child of this symbol.
    pub fn append_child(&mut self, child: Symbol) {
        debug_assert!(
            !matches!(self.kind, SymbolKind::Loop),
            "loop symbols never have children"
        );
        self.children.push(child);
    }

    pub fn kind(&self) -> &SymbolKind {
        &self.kind
    }

    pub fn description(&self) -> &[String] {
        &self.description
    }

    pub fn children(&self) -> &[Symbol] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The cardinality string of kinds occupying a particle.
    pub fn cardinality(&self) -> Option<&str> {
        match &self.kind {
            SymbolKind::Element(element) => element.cardinality.as_deref(),
            SymbolKind::Sequence { cardinality }
            | SymbolKind::Choice { cardinality }
            | SymbolKind::All { cardinality } => cardinality.as_deref(),
            SymbolKind::Any(wildcard) => wildcard.cardinality.as_deref(),
            _ => None,
        }
    }

    /// True when the node may be omitted: minimum occurrence zero, or an
    /// attribute that is not required.
    pub fn is_optional(&self) -> bool {
        match &self.kind {
            SymbolKind::Attribute(attribute) => !attribute.required,
            _ => self
                .cardinality()
                .is_some_and(|cardinality| cardinality.starts_with('0')),
        }
    }

    /// The CSS class of the main box.
    pub fn box_class(&self) -> &'static str {
        let optional = self.is_optional();
        match &self.kind {
            SymbolKind::Schema => "boxschema",
            SymbolKind::Element(_) if optional => "boxelementoptional",
            SymbolKind::Element(_) => "boxelement",
            SymbolKind::Attribute(_) if optional => "boxattribute2",
            SymbolKind::Attribute(_) => "boxattribute1",
            SymbolKind::Sequence { .. } | SymbolKind::Choice { .. } | SymbolKind::All { .. }
                if optional =>
            {
                "boxcompositoroptional"
            }
            SymbolKind::Sequence { .. } | SymbolKind::Choice { .. } | SymbolKind::All { .. } => {
                "boxcompositor"
            }
            SymbolKind::Any(_) if optional => "boxanyoptional",
            SymbolKind::Any(_) => "boxany",
            SymbolKind::AnyAttribute(_) => "boxanyattribute",
            SymbolKind::Key(_) | SymbolKind::Keyref { .. } | SymbolKind::Unique(_) => "boxidc",
            SymbolKind::Selector { .. } => "boxselector",
            SymbolKind::Field { .. } => "boxfield",
            SymbolKind::Loop => "boxloop",
        }
    }

    /// Number of text slots reserved by the kind, one of which is left for
    /// the first description line.
    fn header_slots(&self) -> usize {
        match &self.kind {
            SymbolKind::Element(_) | SymbolKind::Attribute(_) => 4,
            SymbolKind::Any(_)
            | SymbolKind::AnyAttribute(_)
            | SymbolKind::Key(_)
            | SymbolKind::Keyref { .. }
            | SymbolKind::Unique(_) => 3,
            SymbolKind::Sequence { .. }
            | SymbolKind::Choice { .. }
            | SymbolKind::All { .. }
            | SymbolKind::Selector { .. }
            | SymbolKind::Field { .. } => 2,
            SymbolKind::Schema | SymbolKind::Loop => 1,
        }
    }

    /// The fixed height of this kind, before description growth.
    pub fn base_height(&self) -> f32 {
        FIRST_LINE_Y + self.header_slots() as f32 * LINE_HEIGHT + BOTTOM_PADDING
    }

    /// Box height: the kind's constant, plus one line per description line
    /// beyond the first.
    pub fn height(&self) -> f32 {
        let extra_lines = self.description.len().saturating_sub(1);
        self.base_height() + extra_lines as f32 * LINE_HEIGHT
    }

    /// Box width: the minimum width, widened to fit the kind's text.
    pub fn width(&self, measure: &dyn TextMeasure) -> f32 {
        let mut calc = WidthCalculator::new(Self::MIN_WIDTH, measure);
        match &self.kind {
            SymbolKind::Element(element) => {
                calc.fit_text(TEXT_OFFSET, Some(&element.name), 3);
                calc.fit_text(TEXT_OFFSET, element.namespace.as_deref(), 0);
                calc.fit_text(TEXT_OFFSET, element.type_ref.as_deref(), 0);
                calc.fit_text(TEXT_OFFSET, element.cardinality.as_deref(), 0);
                calc.fit_chars(
                    TEXT_OFFSET,
                    if element.substitution.is_some() { 22 } else { 11 },
                );
                calc.fit_text(TEXT_OFFSET, element.substitution.as_deref(), 8);
                calc.fit_text(TEXT_OFFSET, Some(&element.properties()), 0);
            }
            SymbolKind::Attribute(attribute) => {
                calc.fit_text(TEXT_OFFSET, Some(&attribute.name), 3);
                calc.fit_text(TEXT_OFFSET, attribute.namespace.as_deref(), 0);
                calc.fit_text(TEXT_OFFSET, attribute.type_ref.as_deref(), 0);
                calc.fit_text(TEXT_OFFSET, Some(&attribute.properties()), 0);
            }
            SymbolKind::Sequence { cardinality }
            | SymbolKind::Choice { cardinality }
            | SymbolKind::All { cardinality } => {
                calc.fit_text(TEXT_OFFSET, Some(self.title()), 0);
                calc.fit_text(TEXT_OFFSET, cardinality.as_deref(), 0);
            }
            SymbolKind::Any(wildcard) | SymbolKind::AnyAttribute(wildcard) => {
                calc.fit_text(TEXT_OFFSET, Some(self.title()), 0);
                calc.fit_text(TEXT_OFFSET, wildcard.namespace.as_deref(), 0);
                calc.fit_text(TEXT_OFFSET, Some(&wildcard.properties()), 0);
            }
            SymbolKind::Key(identity)
            | SymbolKind::Unique(identity)
            | SymbolKind::Keyref { identity, .. } => {
                calc.fit_text(TEXT_OFFSET, Some(&identity.name), 3);
                calc.fit_text(TEXT_OFFSET, identity.namespace.as_deref(), 0);
                calc.fit_text(TEXT_OFFSET, Some(&self.identity_detail()), 0);
            }
            SymbolKind::Selector { xpath } | SymbolKind::Field { xpath } => {
                calc.fit_text(TEXT_OFFSET, Some(self.title()), 0);
                calc.fit_text(TEXT_OFFSET, Some(xpath), 0);
            }
            SymbolKind::Schema | SymbolKind::Loop => {
                calc.fit_text(TEXT_OFFSET, Some(self.title()), 0);
            }
        }
        calc.width()
    }

    /// The text of the box, each line in its fixed slot. Description lines
    /// follow the header slots, one slot each.
    pub fn text_lines(&self) -> Vec<TextLine> {
        let mut lines = Vec::new();
        let mut push = |slot: usize, text: Option<&str>, role: TextRole| {
            if let Some(text) = text.filter(|text| !text.is_empty()) {
                lines.push(TextLine::new(slot, text, role));
            }
        };

        match &self.kind {
            SymbolKind::Element(element) => {
                push(0, element.namespace.as_deref(), TextRole::Detail);
                push(1, Some(&element.name), TextRole::Title);
                push(2, element.type_ref.as_deref(), TextRole::Detail);
                push(3, Some(&element.properties()), TextRole::Detail);
            }
            SymbolKind::Attribute(attribute) => {
                push(0, attribute.namespace.as_deref(), TextRole::Detail);
                push(1, Some(&attribute.name), TextRole::Title);
                push(2, attribute.type_ref.as_deref(), TextRole::Detail);
                push(3, Some(&attribute.properties()), TextRole::Detail);
            }
            SymbolKind::Sequence { cardinality }
            | SymbolKind::Choice { cardinality }
            | SymbolKind::All { cardinality } => {
                push(0, Some(self.title()), TextRole::Title);
                push(1, cardinality.as_deref(), TextRole::Detail);
            }
            SymbolKind::Any(wildcard) | SymbolKind::AnyAttribute(wildcard) => {
                push(0, wildcard.namespace.as_deref(), TextRole::Detail);
                push(1, Some(self.title()), TextRole::Title);
                push(2, Some(&wildcard.properties()), TextRole::Detail);
            }
            SymbolKind::Key(identity)
            | SymbolKind::Unique(identity)
            | SymbolKind::Keyref { identity, .. } => {
                push(0, identity.namespace.as_deref(), TextRole::Detail);
                push(1, Some(&identity.name), TextRole::Title);
                push(2, Some(&self.identity_detail()), TextRole::Detail);
            }
            SymbolKind::Selector { xpath } | SymbolKind::Field { xpath } => {
                push(0, Some(self.title()), TextRole::Title);
                push(1, Some(xpath), TextRole::Detail);
            }
            SymbolKind::Schema | SymbolKind::Loop => {
                push(0, Some(self.title()), TextRole::Title);
            }
        }

        let first_description_slot = self.header_slots();
        for (index, line) in self.description.iter().enumerate() {
            push(
                first_description_slot + index,
                Some(line),
                TextRole::Description,
            );
        }
        lines
    }

    /// The fixed title of kinds without a name of their own.
    fn title(&self) -> &'static str {
        match &self.kind {
            SymbolKind::Schema => "schema",
            SymbolKind::Sequence { .. } => "sequence",
            SymbolKind::Choice { .. } => "choice",
            SymbolKind::All { .. } => "all",
            SymbolKind::Any(_) => "any",
            SymbolKind::AnyAttribute(_) => "anyAttribute",
            SymbolKind::Selector { .. } => "selector",
            SymbolKind::Field { .. } => "field",
            SymbolKind::Loop => "loop",
            SymbolKind::Element(_)
            | SymbolKind::Attribute(_)
            | SymbolKind::Key(_)
            | SymbolKind::Keyref { .. }
            | SymbolKind::Unique(_) => "",
        }
    }

    fn identity_detail(&self) -> String {
        match &self.kind {
            SymbolKind::Key(_) => "key".to_string(),
            SymbolKind::Unique(_) => "unique".to_string(),
            SymbolKind::Keyref { refer, .. } => format!("keyref, refer: {refer}"),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::{schema::ProcessContents, text::EstimateMeasure};

    fn element(name: &str) -> ElementSymbol {
        ElementSymbol {
            name: name.to_string(),
            ..ElementSymbol::default()
        }
    }

    #[test]
    fn test_base_heights_per_kind() {
        assert_approx_eq!(
            f32,
            Symbol::new(SymbolKind::Element(element("a"))).height(),
            74.0
        );
        assert_approx_eq!(
            f32,
            Symbol::new(SymbolKind::Sequence { cardinality: None }).height(),
            46.0
        );
        assert_approx_eq!(f32, Symbol::new(SymbolKind::Loop).height(), 32.0);
        assert_approx_eq!(
            f32,
            Symbol::new(SymbolKind::Any(WildcardSymbol::default())).height(),
            60.0
        );
    }

    #[test]
    fn test_description_grows_height_beyond_first_line() {
        let kind = SymbolKind::Element(element("Order"));
        let none = Symbol::new(kind.clone());
        let one = Symbol::new(kind.clone()).with_description(vec!["a".into()]);
        let three =
            Symbol::new(kind).with_description(vec!["a".into(), "b".into(), "c".into()]);

        assert_approx_eq!(f32, none.height(), one.height());
        assert_approx_eq!(f32, three.height(), none.height() + 2.0 * LINE_HEIGHT);
    }

    #[test]
    fn test_element_text_lines_slots() {
        let symbol = Symbol::new(SymbolKind::Element(ElementSymbol {
            name: "Order".to_string(),
            namespace: Some("urn:orders".to_string()),
            type_ref: Some("type: OrderType".to_string()),
            cardinality: Some("0..1".to_string()),
            substitution: Some("Head".to_string()),
            is_abstract: true,
            ..ElementSymbol::default()
        }))
        .with_description(vec!["An order.".to_string()]);

        let lines = symbol.text_lines();
        let texts: Vec<_> = lines.iter().map(|l| (l.slot(), l.text())).collect();
        assert_eq!(
            texts,
            vec![
                (0, "urn:orders"),
                (1, "Order"),
                (2, "type: OrderType"),
                (3, "0..1, subst.: Head, abstract: true"),
                (4, "An order."),
            ]
        );
        assert_approx_eq!(f32, lines[1].y(), 27.0);
        assert_eq!(lines[4].role(), TextRole::Description);
    }

    #[test]
    fn test_empty_properties_line_is_skipped() {
        let symbol = Symbol::new(SymbolKind::Element(element("Id")));
        let slots: Vec<_> = symbol.text_lines().iter().map(TextLine::slot).collect();
        assert_eq!(slots, vec![1]);
    }

    #[test]
    fn test_optional_styling() {
        let optional = Symbol::new(SymbolKind::Element(ElementSymbol {
            cardinality: Some("0..∞".to_string()),
            ..element("Item")
        }));
        let required = Symbol::new(SymbolKind::Element(ElementSymbol {
            cardinality: Some("1..∞".to_string()),
            ..element("Item")
        }));
        let attribute = Symbol::new(SymbolKind::Attribute(AttributeSymbol {
            name: "id".to_string(),
            ..AttributeSymbol::default()
        }));

        assert_eq!(optional.box_class(), "boxelementoptional");
        assert_eq!(required.box_class(), "boxelement");
        assert_eq!(attribute.box_class(), "boxattribute2");
    }

    #[test]
    fn test_wildcard_properties() {
        let wildcard = WildcardSymbol {
            namespace: Some("any NS".to_string()),
            process_contents: ProcessContents::Lax,
            cardinality: Some("0..∞".to_string()),
        };
        assert_eq!(wildcard.properties(), "lax, 0..∞");
    }

    #[test]
    fn test_keyref_detail_names_referenced_key() {
        let symbol = Symbol::new(SymbolKind::Keyref {
            identity: IdentitySymbol {
                name: "OrderRef".to_string(),
                namespace: None,
            },
            refer: "OrderKey".to_string(),
        });
        let lines = symbol.text_lines();
        assert_eq!(lines.last().map(TextLine::text), Some("keyref, refer: OrderKey"));
    }

    #[test]
    fn test_substitution_allowance_widens_box() {
        let measure = EstimateMeasure::default();
        let plain = Symbol::new(SymbolKind::Element(element("a")));
        let substituted = Symbol::new(SymbolKind::Element(ElementSymbol {
            substitution: Some("b".to_string()),
            ..element("a")
        }));

        assert!(substituted.width(&measure) > plain.width(&measure));
    }

    proptest! {
        #[test]
        fn prop_element_width_monotonic(
            name in "[A-Za-z]{1,20}",
            suffix in "[A-Za-z]{1,20}",
            namespace in proptest::option::of("[a-z:]{1,30}"),
        ) {
            let measure = EstimateMeasure::default();
            let short = Symbol::new(SymbolKind::Element(ElementSymbol {
                name: name.clone(),
                namespace: namespace.clone(),
                ..ElementSymbol::default()
            }));
            let long = Symbol::new(SymbolKind::Element(ElementSymbol {
                name: format!("{name}{suffix}"),
                namespace,
                ..ElementSymbol::default()
            }));

            prop_assert!(long.width(&measure) >= short.width(&measure));
            prop_assert!(short.width(&measure) >= Symbol::MIN_WIDTH);
        }
    }
}
