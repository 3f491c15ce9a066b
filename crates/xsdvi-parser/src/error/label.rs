//! Source spans of schema elements, annotated for diagnostics.
//!
//! Spans cover a whole XML element, from `<` of its start tag to the end of
//! its end tag, so a label on `<xs:element ref="tns:Order"/>` underlines the
//! complete reference.

use crate::span::Span;

/// A message attached to the span of a schema element.
///
/// The primary label points at the element that caused the diagnostic: the
/// `ref` or `type` that does not resolve, or the second `xs:complexType`
/// with a taken name. Secondary labels point at related elements, such as
/// the definition that claimed the name first.
///
/// ```text
/// error[E200]: complex type `Address` is defined multiple times
///    |
///  3 | <xs:complexType name="Address"> ... </xs:complexType>
///    | ----------------------------------------------------- first defined here
///  9 | <xs:complexType name="Address"> ... </xs:complexType>
///    | ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ duplicate definition
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Marks a QName reference (`ref`, `type`, `base`, `itemType`) that
    /// names no known component.
    pub fn reference(span: Span) -> Self {
        Self::primary(span, "referenced here")
    }

    /// Marks a global component whose name is already taken in its
    /// symbol space.
    pub fn duplicate_definition(span: Span) -> Self {
        Self::primary(span, "duplicate definition")
    }

    /// Marks the component that took the name first.
    pub fn first_definition(span: Span) -> Self {
        Self::secondary(span, "first defined here")
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"<xs:complexType name="Address"/><xs:complexType name="Address"/><xs:element name="Ship" type="tns:Adress"/>"#;

    fn span_of(needle: &str, nth: usize) -> Span {
        let start = SOURCE.match_indices(needle).nth(nth).unwrap().0;
        Span::new(start..start + needle.len())
    }

    #[test]
    fn test_unresolved_type_reference() {
        let element = r#"<xs:element name="Ship" type="tns:Adress"/>"#;
        let label = Label::reference(span_of(element, 0));

        assert!(label.is_primary());
        assert_eq!(label.message(), "referenced here");
        assert_eq!(&SOURCE[label.span().start()..label.span().end()], element);
    }

    #[test]
    fn test_duplicate_complex_type() {
        let definition = r#"<xs:complexType name="Address"/>"#;
        let duplicate = Label::duplicate_definition(span_of(definition, 1));
        let first = Label::first_definition(span_of(definition, 0));

        assert!(duplicate.is_primary());
        assert!(first.is_secondary());
        assert_eq!(first.message(), "first defined here");
        assert!(first.span().end() <= duplicate.span().start());
    }

    #[test]
    fn test_custom_label() {
        let label = Label::secondary(Span::new(5..15), "base type declared here");

        assert!(!label.is_primary());
        assert_eq!(label.span().len(), 10);
        assert_eq!(label.message(), "base type declared here");
    }
}
