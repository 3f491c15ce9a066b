//! SVG rendering of placed symbols.

use std::io::Write;

use svg::{self, node::Text as SvgText, node::element as svg_element};

use xsdvi_core::{geometry::Point, symbol::TextRole};

use super::{Svg, layout::PlacedSymbol};

/// Offset of the drop shadow from the main box.
const SHADOW_OFFSET: f32 = 3.0;

/// Left padding of text inside a box.
const TEXT_INSET: f32 = 5.0;

/// Side length of an expand/collapse toggle.
const TOGGLE_SIZE: f32 = 10.0;

impl<W: Write> Svg<W> {
    /// Renders a symbol, then its children inside a group the symbol's
    /// toggle can hide.
    pub(super) fn render_symbol(
        &self,
        placed: &PlacedSymbol<'_>,
        next_group_id: &mut usize,
    ) -> svg_element::Group {
        let group = svg_element::Group::new().add(self.render_box(placed));
        if placed.children().is_empty() {
            return group;
        }

        let id = format!("children{next_group_id}");
        *next_group_id += 1;

        let mut children = svg_element::Group::new()
            .set("id", id.as_str())
            .set("class", "children");
        for child in placed.children() {
            children = children
                .add(render_connector(placed.anchor(), child.entry()))
                .add(self.render_symbol(child, next_group_id));
        }

        let group = group.add(children);
        if self.menu_buttons {
            group.add(render_toggle(placed.anchor(), &id))
        } else {
            group
        }
    }

    /// Shadow, main box and text lines of one symbol.
    fn render_box(&self, placed: &PlacedSymbol<'_>) -> svg_element::Group {
        let bounds = placed.bounds();
        let symbol = placed.symbol();

        let shadow_corner = bounds
            .min_point()
            .add_point(Point::new(SHADOW_OFFSET, SHADOW_OFFSET));
        let shadow = svg_element::Rectangle::new()
            .set("x", shadow_corner.x())
            .set("y", shadow_corner.y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("class", "shadow");

        let main = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("class", symbol.box_class());

        let mut group = svg_element::Group::new().add(shadow).add(main);
        for line in symbol.text_lines() {
            let text = svg_element::Text::new("")
                .set("x", bounds.min_x() + TEXT_INSET)
                .set("y", bounds.min_y() + line.y())
                .set("class", text_class(line.role()))
                .add(SvgText::new(line.text()));
            group = group.add(text);
        }
        group
    }
}

fn text_class(role: TextRole) -> &'static str {
    match role {
        TextRole::Title => "title",
        TextRole::Detail => "detail",
        TextRole::Description => "description",
    }
}

/// An elbow from the parent's anchor down to the child's left edge.
fn render_connector(from: Point, to: Point) -> svg_element::Path {
    svg_element::Path::new()
        .set(
            "d",
            format!("M {} {} V {} H {}", from.x(), from.y(), to.y(), to.x()),
        )
        .set("class", "connection")
}

/// A +/- button below the box showing or hiding the group `children_id`.
fn render_toggle(anchor: Point, children_id: &str) -> svg_element::Group {
    let half = TOGGLE_SIZE / 2.0;
    let button = svg_element::Rectangle::new()
        .set("x", anchor.x() - half)
        .set("y", anchor.y())
        .set("width", TOGGLE_SIZE)
        .set("height", TOGGLE_SIZE)
        .set("class", "toggle");
    let sign = svg_element::Text::new("")
        .set("x", anchor.x())
        .set("y", anchor.y() + TOGGLE_SIZE - 1.5)
        .set("id", format!("{children_id}-sign"))
        .set("class", "togglesign")
        .add(SvgText::new("-"));

    svg_element::Group::new()
        .set("onclick", format!("toggle('{children_id}')"))
        .add(button)
        .add(sign)
}

#[cfg(test)]
mod tests {
    use xsdvi_core::{
        symbol::{ElementSymbol, Symbol, SymbolKind},
        text::EstimateMeasure,
    };

    use super::*;
    use crate::export::svg::SvgBuilder;

    fn render(menu_buttons: bool) -> String {
        let mut root = Symbol::new(SymbolKind::Element(ElementSymbol {
            name: "Node".to_string(),
            cardinality: Some("0..1".to_string()),
            ..ElementSymbol::default()
        }))
        .with_description(vec!["A node.".to_string()]);
        root.append_child(Symbol::new(SymbolKind::Loop));

        let svg = SvgBuilder::new(Vec::new())
            .with_menu_buttons(menu_buttons)
            .build()
            .unwrap();
        let placed = PlacedSymbol::place(&root, Point::new(20.0, 50.0), &EstimateMeasure::default());
        let mut next_group_id = 0;
        svg.render_symbol(&placed, &mut next_group_id).to_string()
    }

    #[test]
    fn test_box_classes_and_text() {
        let output = render(true);

        assert!(output.contains(r#"class="shadow""#));
        assert!(output.contains(r#"class="boxelementoptional""#));
        assert!(output.contains(r#"class="boxloop""#));
        assert!(output.contains(r#"class="connection""#));
        assert!(output.contains("Node"));
        assert!(output.contains("0..1"));
        assert!(output.contains(r#"class="description""#));
        assert!(output.contains("toggle('children0')"));
    }

    #[test]
    fn test_hidden_menu_buttons_omit_toggles() {
        let output = render(false);

        assert!(output.contains(r#"id="children0""#));
        assert!(!output.contains("onclick"));
    }

    #[test]
    fn test_connector_path() {
        let path = render_connector(Point::new(42.5, 124.0), Point::new(65.0, 171.0));
        assert!(path.to_string().contains(r#"d="M 42.5 124 V 171 H 65""#));
    }
}
