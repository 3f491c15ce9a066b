//! The finished symbol tree of one diagram.
//!
//! The schema walker builds every subtree bottom-up and hands back complete
//! [`Symbol`]s, so a tree is just an optional root. There is no cursor to
//! move up and down: a child is attached with [`Symbol::append_child`] once
//! its own children are complete.

use xsdvi_core::symbol::Symbol;

/// A diagram's symbols, rooted at a single symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTree {
    root: Option<Symbol>,
}

impl SymbolTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tree with `root` as its root symbol.
    pub fn with_root(root: Symbol) -> Self {
        Self { root: Some(root) }
    }

    pub fn root(&self) -> Option<&Symbol> {
        self.root.as_ref()
    }

    /// True if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Every symbol in depth-first pre-order, paired with its depth (the
    /// root has depth 0).
    pub fn iter(&self) -> SymbolIter<'_> {
        SymbolIter {
            stack: self.root.iter().map(|root| (0, root)).collect(),
        }
    }

    /// Number of symbols in the tree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }
}

/// Pre-order iterator over a [`SymbolTree`].
pub struct SymbolIter<'a> {
    stack: Vec<(usize, &'a Symbol)>,
}

impl<'a> Iterator for SymbolIter<'a> {
    type Item = (usize, &'a Symbol);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, symbol) = self.stack.pop()?;
        self.stack
            .extend(symbol.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, symbol))
    }
}
