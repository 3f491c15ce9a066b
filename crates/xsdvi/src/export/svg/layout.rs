//! Box positions of a symbol tree.
//!
//! Children stack downward below their parent, each indented to the right
//! by a fixed amount. A subtree's extent is its own box height plus the
//! stacked extents of its children, so the next sibling starts below the
//! whole subtree.

use xsdvi_core::{
    geometry::{Bounds, Point, Size},
    symbol::Symbol,
    text::TextMeasure,
};

/// Horizontal offset of a child box from its parent box.
pub(super) const INDENT: f32 = 45.0;

/// Vertical gap above every child box.
pub(super) const SPACING: f32 = 10.0;

/// A symbol with its box placed, and its children placed below it.
#[derive(Debug)]
pub(super) struct PlacedSymbol<'a> {
    symbol: &'a Symbol,
    bounds: Bounds,
    extent: f32,
    subtree_bounds: Bounds,
    children: Vec<PlacedSymbol<'a>>,
}

impl<'a> PlacedSymbol<'a> {
    /// Places `symbol` with its top-left corner at `origin`, then its
    /// children below it.
    pub fn place(symbol: &'a Symbol, origin: Point, measure: &dyn TextMeasure) -> Self {
        let size = Size::new(symbol.width(measure), symbol.height());
        let bounds = Bounds::new_from_top_left(origin, size);

        let mut extent = size.height();
        let mut subtree_bounds = bounds;
        let mut children = Vec::with_capacity(symbol.children().len());
        for child in symbol.children() {
            let child_origin = origin.add_point(Point::new(INDENT, extent + SPACING));
            let placed = Self::place(child, child_origin, measure);
            extent += SPACING + placed.extent;
            subtree_bounds = subtree_bounds.merge(&placed.subtree_bounds);
            children.push(placed);
        }

        Self {
            symbol,
            bounds,
            extent,
            subtree_bounds,
            children,
        }
    }

    pub fn symbol(&self) -> &'a Symbol {
        self.symbol
    }

    /// The symbol's own box.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Height consumed by the box and everything below it.
    #[cfg(test)]
    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Bounds of the box and all descendant boxes.
    pub fn subtree_bounds(&self) -> Bounds {
        self.subtree_bounds
    }

    pub fn children(&self) -> &[PlacedSymbol<'a>] {
        &self.children
    }

    /// Where connectors to the children start: below the box, halfway
    /// into the indent.
    pub fn anchor(&self) -> Point {
        Point::new(self.bounds.min_x() + INDENT / 2.0, self.bounds.max_y())
    }

    /// Where the connector from the parent ends: the middle of the left edge.
    pub fn entry(&self) -> Point {
        Point::new(
            self.bounds.min_x(),
            self.bounds.min_y() + self.bounds.height() / 2.0,
        )
    }
}
