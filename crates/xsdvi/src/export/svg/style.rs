//! The diagram stylesheet.

/// CSS for every class the SVG exporter emits.
///
/// Embedded into each document in embody mode; written to a file or served
/// from a URI in link mode.
pub const STYLESHEET: &str = "\
text {
  font-family: Arial, Helvetica, sans-serif;
  font-size: 11px;
  fill: #000000;
}
text.title {
  font-weight: bold;
}
text.detail {
  fill: #333333;
}
text.description {
  font-style: italic;
  fill: #555555;
}
text.button,
text.togglesign {
  text-anchor: middle;
  cursor: pointer;
}
rect {
  stroke: #000000;
  stroke-width: 1;
}
rect.shadow {
  fill: #c0c0c0;
  stroke: none;
}
rect.boxschema {
  fill: #ffffff;
}
rect.boxelement {
  fill: #fff6d5;
}
rect.boxelementoptional {
  fill: #fff6d5;
  stroke-dasharray: 4, 2;
}
rect.boxattribute1 {
  fill: #e5f0ff;
}
rect.boxattribute2 {
  fill: #e5f0ff;
  stroke-dasharray: 4, 2;
}
rect.boxcompositor {
  fill: #eeeeee;
}
rect.boxcompositoroptional {
  fill: #eeeeee;
  stroke-dasharray: 4, 2;
}
rect.boxany {
  fill: #e8f5e2;
}
rect.boxanyoptional {
  fill: #e8f5e2;
  stroke-dasharray: 4, 2;
}
rect.boxanyattribute {
  fill: #e8f5e2;
}
rect.boxidc {
  fill: #f5e2f0;
}
rect.boxselector,
rect.boxfield {
  fill: #faeef7;
}
rect.boxloop {
  fill: #ffe0e0;
}
rect.toggle,
rect.button {
  fill: #ffffff;
  stroke: #666666;
  cursor: pointer;
}
path.connection {
  fill: none;
  stroke: #666666;
  stroke-width: 1;
}
";
