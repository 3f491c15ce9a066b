//! Expand/collapse script and the menu buttons driving it.

use svg::{self, node::Text as SvgText, node::element as svg_element};

use xsdvi_core::geometry::{Bounds, Point, Size};

const SCRIPT: &str = r#"
function toggle(id) {
  var group = document.getElementById(id);
  var sign = document.getElementById(id + '-sign');
  var hidden = group.style.display == 'none';
  group.style.display = hidden ? 'inline' : 'none';
  sign.textContent = hidden ? '-' : '+';
}
function setAll(display, text) {
  var groups = document.querySelectorAll('g.children');
  for (var i = 0; i != groups.length; i++) {
    groups[i].style.display = display;
    var sign = document.getElementById(groups[i].id + '-sign');
    if (sign) {
      sign.textContent = text;
    }
  }
}
function collapseAll() {
  setAll('none', '+');
}
function expandAll() {
  setAll('inline', '-');
}
"#;

const BUTTON_X: f32 = 20.0;
const BUTTON_Y: f32 = 10.0;
const BUTTON_WIDTH: f32 = 90.0;
const BUTTON_HEIGHT: f32 = 20.0;
const BUTTON_GAP: f32 = 10.0;

/// (label, handler) of each menu button, left to right.
const BUTTONS: [(&str, &str); 2] = [
    ("collapse all", "collapseAll()"),
    ("expand all", "expandAll()"),
];

pub(super) fn script() -> svg_element::Script {
    svg_element::Script::new(SCRIPT).set("type", "text/ecmascript")
}

pub(super) fn menu_buttons() -> svg_element::Group {
    let mut menu = svg_element::Group::new().set("id", "menu");
    let mut x = BUTTON_X;
    for (label, handler) in BUTTONS {
        let button = svg_element::Rectangle::new()
            .set("x", x)
            .set("y", BUTTON_Y)
            .set("width", BUTTON_WIDTH)
            .set("height", BUTTON_HEIGHT)
            .set("class", "button");
        let text = svg_element::Text::new("")
            .set("x", x + BUTTON_WIDTH / 2.0)
            .set("y", BUTTON_Y + 14.0)
            .set("class", "button")
            .add(SvgText::new(label));
        menu = menu.add(
            svg_element::Group::new()
                .set("onclick", handler)
                .add(button)
                .add(text),
        );
        x += BUTTON_WIDTH + BUTTON_GAP;
    }
    menu
}

/// Area covered by the menu buttons.
pub(super) fn menu_bounds() -> Bounds {
    let count = BUTTONS.len() as f32;
    Bounds::new_from_top_left(
        Point::new(BUTTON_X, BUTTON_Y),
        Size::new(
            count * BUTTON_WIDTH + (count - 1.0) * BUTTON_GAP,
            BUTTON_HEIGHT,
        ),
    )
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_menu_bounds_cover_both_buttons() {
        let bounds = menu_bounds();
        assert_approx_eq!(f32, bounds.min_x(), 20.0);
        assert_approx_eq!(f32, bounds.max_x(), 210.0);
        assert_approx_eq!(f32, bounds.max_y(), 30.0);
    }

    #[test]
    fn test_menu_buttons_call_script() {
        let menu = menu_buttons().to_string();
        assert!(menu.contains("collapseAll()"));
        assert!(menu.contains("expandAll()"));
        assert!(SCRIPT.contains("function collapseAll()"));
        assert!(SCRIPT.contains("function expandAll()"));
    }

    #[test]
    fn test_script_element_carries_functions() {
        let script = script().to_string();
        assert!(script.starts_with(r#"<script type="text/ecmascript">"#));
        assert!(script.contains("function toggle(id)"));
    }
}
