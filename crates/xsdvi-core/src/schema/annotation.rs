//! Schema annotations.

/// An `xs:annotation` attached to a schema component.
///
/// Only the documentation text is kept: one entry per `xs:documentation`
/// child, holding its full text content in document order. `xs:appinfo`
/// content is not retained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    documentation: Vec<String>,
}

impl Annotation {
    /// Creates an annotation from its documentation texts.
    pub fn new(documentation: Vec<String>) -> Self {
        Self { documentation }
    }

    /// Returns the text content of each `xs:documentation` element.
    pub fn documentation(&self) -> &[String] {
        &self.documentation
    }
}
