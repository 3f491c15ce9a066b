//! Helpers for reading XML Schema documents with `roxmltree`.

use roxmltree::{Document, Node, ParsingOptions};

use xsdvi_core::schema::Annotation;

/// The XML Schema namespace.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// A namespace-qualified component name.
pub(crate) type QName = (Option<String>, String);

/// Parses a schema document. Document type declarations are allowed, as
/// schemas for schemas commonly carry one.
pub(crate) fn parse_document(text: &str) -> Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options)
}

/// Returns `true` if `node` is an element in the XML Schema namespace.
pub(crate) fn is_xsd_element(node: &Node<'_, '_>) -> bool {
    node.is_element() && node.tag_name().namespace() == Some(XSD_NAMESPACE)
}

/// Child elements of `node` in the XML Schema namespace.
///
/// Elements from other namespaces (`xs:appinfo` payloads, foreign
/// attributes' elements) are not schema components and are skipped.
pub(crate) fn xsd_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(is_xsd_element)
}

/// Local name of a schema element, e.g. `"complexType"`.
pub(crate) fn local_name<'a>(node: &Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Splits a QName attribute value into prefix and local part.
pub(crate) fn split_qname(value: &str) -> (Option<&str>, &str) {
    match value.trim().split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, value.trim()),
    }
}

/// Reads the documentation of all `xs:annotation` children of `node`.
///
/// Each `xs:documentation` element contributes its full text content,
/// trimmed. Empty documentation elements are kept out.
pub(crate) fn annotations(node: Node<'_, '_>) -> Vec<Annotation> {
    xsd_children(node)
        .filter(|child| local_name(child) == "annotation")
        .map(|annotation| {
            let documentation = xsd_children(annotation)
                .filter(|child| local_name(child) == "documentation")
                .map(text_content)
                .filter(|text| !text.is_empty())
                .collect();
            Annotation::new(documentation)
        })
        .collect()
}

/// Concatenated text of all descendant text nodes, trimmed.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|text| text.text())
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("xs:string"), (Some("xs"), "string"));
        assert_eq!(split_qname(" OrderType "), (None, "OrderType"));
    }

    #[test]
    fn test_annotations_collect_documentation_text() {
        let source = r#"<xs:element xmlns:xs="http://www.w3.org/2001/XMLSchema" name="a">
            <xs:annotation>
                <xs:appinfo>ignored</xs:appinfo>
                <xs:documentation>First <b xmlns="">bold</b> line</xs:documentation>
                <xs:documentation>   </xs:documentation>
            </xs:annotation>
            <xs:annotation>
                <xs:documentation>Second</xs:documentation>
            </xs:annotation>
        </xs:element>"#;
        let doc = Document::parse(source).unwrap();

        let annotations = annotations(doc.root_element());
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].documentation(), ["First bold line"]);
        assert_eq!(annotations[1].documentation(), ["Second"]);
    }
}
