use std::fs;

use xsdvi_core::schema::{
    Compositor, ConstraintCategory, MaxOccurs, NamespaceConstraint, ProcessContents, SchemaModel,
    Term, TypeId, ValueConstraint,
};
use xsdvi_parser::{
    error::{ErrorCode, Severity},
    load, parse,
};

fn schema(body: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
{body}
</xs:schema>"#
    )
}

fn element_type(model: &SchemaModel, name: &str) -> TypeId {
    let id = model.find_element(name).expect("element is declared");
    model.element(id).type_id()
}

/// Local names of the elements in the content model of a complex type.
fn content_names(model: &SchemaModel, type_id: TypeId) -> Vec<String> {
    let complex = model
        .type_definition(type_id)
        .as_complex()
        .expect("complex type");
    let particle = complex.particle().expect("type has content");
    let Term::ModelGroup(group) = particle.term() else {
        panic!("Expected model group content");
    };
    model
        .model_group(*group)
        .particles()
        .iter()
        .filter_map(|p| match p.term() {
            Term::Element(id) => Some(model.element(*id).name().to_string()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_sequence_keeps_document_order() {
    let source = schema(
        r#"
        <xs:element name="order">
          <xs:complexType>
            <xs:sequence>
              <xs:element name="id" type="xs:string"/>
              <xs:element name="item" type="xs:string" maxOccurs="unbounded"/>
              <xs:element name="note" type="xs:string" minOccurs="0"/>
            </xs:sequence>
          </xs:complexType>
        </xs:element>
        "#,
    );

    let loaded = parse(&source).expect("Failed to parse");
    let model = loaded.model();

    assert!(loaded.diagnostics().is_empty());
    let order_type = element_type(model, "order");
    assert!(model.type_definition(order_type).is_anonymous());
    assert_eq!(content_names(model, order_type), ["id", "item", "note"]);

    let complex = model.type_definition(order_type).as_complex().unwrap();
    let Term::ModelGroup(group) = complex.particle().unwrap().term() else {
        panic!("Expected model group content");
    };
    let group = model.model_group(*group);
    assert_eq!(group.compositor(), Compositor::Sequence);
    assert_eq!(group.particles()[1].max_occurs(), MaxOccurs::Unbounded);
    assert_eq!(group.particles()[2].min_occurs(), 0);
}

#[test]
fn test_declaration_order_does_not_matter() {
    let source = schema(
        r#"
        <xs:element name="root" type="Later"/>
        <xs:complexType name="Later">
          <xs:sequence><xs:element name="x" type="xs:int"/></xs:sequence>
        </xs:complexType>
        "#,
    );

    let loaded = parse(&source).expect("Failed to parse");
    let model = loaded.model();

    assert!(loaded.diagnostics().is_empty());
    assert_eq!(element_type(model, "root"), model.find_type("Later").unwrap());
}

#[test]
fn test_recursive_type_is_not_circular() {
    let source = schema(
        r#"
        <xs:complexType name="NodeType">
          <xs:sequence>
            <xs:element name="node" type="NodeType" minOccurs="0" maxOccurs="unbounded"/>
          </xs:sequence>
        </xs:complexType>
        <xs:element name="node" type="NodeType"/>
        "#,
    );

    let loaded = parse(&source).expect("Failed to parse");
    let model = loaded.model();

    assert!(loaded.diagnostics().is_empty());
    let node_type = model.find_type("NodeType").unwrap();
    assert_eq!(content_names(model, node_type), ["node"]);
}

#[test]
fn test_identity_constraints() {
    let source = schema(
        r#"
        <xs:element name="catalog">
          <xs:complexType>
            <xs:sequence>
              <xs:element name="product" type="xs:string" maxOccurs="unbounded"/>
            </xs:sequence>
          </xs:complexType>
          <xs:key name="productKey">
            <xs:selector xpath="product"/>
            <xs:field xpath="@id"/>
          </xs:key>
          <xs:keyref name="productRef" refer="productKey">
            <xs:selector xpath="ref"/>
            <xs:field xpath="@product"/>
          </xs:keyref>
        </xs:element>
        "#,
    );

    let loaded = parse(&source).expect("Failed to parse");
    let model = loaded.model();
    let catalog = model.element(model.find_element("catalog").unwrap());
    let constraints = catalog.identity_constraints();

    assert_eq!(constraints.len(), 2);
    assert_eq!(constraints[0].name(), "productKey");
    assert_eq!(constraints[0].category(), &ConstraintCategory::Key);
    assert_eq!(constraints[0].selector(), "product");
    assert_eq!(constraints[0].fields(), ["@id"]);
    assert_eq!(
        constraints[1].category(),
        &ConstraintCategory::Keyref {
            refer: "productKey".to_string()
        }
    );
}

#[test]
fn test_extension_merges_base_content() {
    let source = schema(
        r#"
        <xs:complexType name="Base">
          <xs:sequence><xs:element name="a" type="xs:string"/></xs:sequence>
          <xs:attribute name="x" type="xs:string"/>
        </xs:complexType>
        <xs:complexType name="Derived">
          <xs:complexContent>
            <xs:extension base="Base">
              <xs:sequence><xs:element name="b" type="xs:string"/></xs:sequence>
              <xs:attribute name="y" type="xs:int" use="required" default="3"/>
            </xs:extension>
          </xs:complexContent>
        </xs:complexType>
        "#,
    );

    let loaded = parse(&source).expect("Failed to parse");
    let model = loaded.model();
    assert!(loaded.diagnostics().is_empty());

    let derived_id = model.find_type("Derived").unwrap();
    let derived = model.type_definition(derived_id);
    assert_eq!(derived.base_type(), model.find_type("Base"));

    let complex = derived.as_complex().unwrap();
    let names: Vec<_> = complex
        .attribute_uses()
        .iter()
        .map(|u| u.declaration().name())
        .collect();
    assert_eq!(names, ["x", "y"]);
    assert!(complex.attribute_uses()[1].required());
    assert_eq!(
        complex.attribute_uses()[1].value_constraint(),
        Some(&ValueConstraint::Default("3".to_string()))
    );

    // Base content and own content are wrapped in a new sequence.
    let Term::ModelGroup(outer) = complex.particle().unwrap().term() else {
        panic!("Expected model group content");
    };
    let outer = model.model_group(*outer);
    assert_eq!(outer.compositor(), Compositor::Sequence);
    assert_eq!(outer.particles().len(), 2);
}

#[test]
fn test_restriction_drops_prohibited_attributes() {
    let source = schema(
        r#"
        <xs:complexType name="Base">
          <xs:attribute name="keep" type="xs:string"/>
          <xs:attribute name="drop" type="xs:string"/>
        </xs:complexType>
        <xs:complexType name="Narrow">
          <xs:complexContent>
            <xs:restriction base="Base">
              <xs:attribute name="drop" use="prohibited"/>
            </xs:restriction>
          </xs:complexContent>
        </xs:complexType>
        "#,
    );

    let loaded = parse(&source).expect("Failed to parse");
    let model = loaded.model();
    let narrow = model
        .type_definition(model.find_type("Narrow").unwrap())
        .as_complex()
        .unwrap();

    let names: Vec<_> = narrow
        .attribute_uses()
        .iter()
        .map(|u| u.declaration().name())
        .collect();
    assert_eq!(names, ["keep"]);
}

#[test]
fn test_group_and_attribute_group_references() {
    let source = schema(
        r###"
        <xs:group name="Common">
          <xs:sequence><xs:element name="id" type="xs:ID"/></xs:sequence>
        </xs:group>
        <xs:attributeGroup name="Audit">
          <xs:attribute name="created" type="xs:dateTime"/>
          <xs:anyAttribute namespace="##other" processContents="skip"/>
        </xs:attributeGroup>
        <xs:complexType name="Record">
          <xs:group ref="Common"/>
          <xs:attributeGroup ref="Audit"/>
        </xs:complexType>
        "###,
    );

    let loaded = parse(&source).expect("Failed to parse");
    let model = loaded.model();
    assert!(loaded.diagnostics().is_empty());

    let record_id = model.find_type("Record").unwrap();
    assert_eq!(content_names(model, record_id), ["id"]);

    let record = model.type_definition(record_id).as_complex().unwrap();
    assert_eq!(record.attribute_uses()[0].declaration().name(), "created");
    let wildcard = record.attribute_wildcard().expect("wildcard from group");
    assert_eq!(wildcard.process_contents(), ProcessContents::Skip);
}

#[test]
fn test_wildcard_namespace_constraints() {
    let source = r###"
        <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:t">
          <xs:complexType name="Open">
            <xs:sequence>
              <xs:any namespace="##other" processContents="lax"/>
              <xs:any namespace="##targetNamespace ##local urn:x"/>
            </xs:sequence>
          </xs:complexType>
        </xs:schema>
    "###;

    let loaded = parse(source).expect("Failed to parse");
    let model = loaded.model();
    let open = model
        .type_definition(model.find_type("Open").unwrap())
        .as_complex()
        .unwrap();
    let Term::ModelGroup(group) = open.particle().unwrap().term() else {
        panic!("Expected model group content");
    };
    let wildcards: Vec<_> = model
        .model_group(*group)
        .particles()
        .iter()
        .filter_map(|p| match p.term() {
            Term::Wildcard(w) => Some(w.clone()),
            _ => None,
        })
        .collect();

    assert_eq!(
        wildcards[0].constraint(),
        &NamespaceConstraint::Not(vec![Some("urn:t".to_string()), None])
    );
    assert_eq!(wildcards[0].process_contents(), ProcessContents::Lax);
    assert_eq!(
        wildcards[1].constraint(),
        &NamespaceConstraint::Enumeration(vec![
            Some("urn:t".to_string()),
            None,
            Some("urn:x".to_string()),
        ])
    );
    assert_eq!(wildcards[1].process_contents(), ProcessContents::Strict);
}

#[test]
fn test_substitution_member_takes_head_type() {
    let source = schema(
        r#"
        <xs:element name="shape" type="xs:string" abstract="true"/>
        <xs:element name="circle" substitutionGroup="shape"/>
        "#,
    );

    let loaded = parse(&source).expect("Failed to parse");
    let model = loaded.model();
    let shape = model.find_element("shape").unwrap();
    let circle = model.element(model.find_element("circle").unwrap());

    assert!(model.element(shape).is_abstract());
    assert_eq!(circle.substitution_group(), Some(shape));
    assert_eq!(circle.type_id(), element_type(model, "shape"));
}

#[test]
fn test_unresolved_type_is_reported_and_replaced() {
    let source = schema(r#"<xs:element name="broken" type="Missing"/>"#);

    let loaded = parse(&source).expect("unresolved types are not fatal");
    let model = loaded.model();

    assert_eq!(loaded.diagnostics().len(), 1);
    let diagnostic = &loaded.diagnostics()[0];
    assert_eq!(diagnostic.severity(), Severity::Error);
    assert_eq!(diagnostic.code(), Some(ErrorCode::E100));
    assert!(diagnostic.message().contains("Missing"));

    let [label] = diagnostic.labels() else {
        panic!("expected a single label");
    };
    assert!(label.is_primary());
    assert_eq!(label.message(), "referenced here");
    assert_eq!(
        &source[label.span().start()..label.span().end()],
        r#"<xs:element name="broken" type="Missing"/>"#
    );

    let fallback = model.type_definition(element_type(model, "broken"));
    assert_eq!(fallback.name(), Some("anyType"));
}

#[test]
fn test_circular_derivation_is_reported() {
    let source = schema(
        r#"
        <xs:complexType name="A">
          <xs:complexContent><xs:extension base="B"/></xs:complexContent>
        </xs:complexType>
        <xs:complexType name="B">
          <xs:complexContent><xs:extension base="A"/></xs:complexContent>
        </xs:complexType>
        "#,
    );

    let loaded = parse(&source).expect("circular derivation is not fatal");
    assert!(
        loaded
            .diagnostics()
            .iter()
            .any(|d| d.code() == Some(ErrorCode::E201))
    );
}

#[test]
fn test_duplicate_and_invalid_occurs() {
    let source = schema(
        r#"
        <xs:element name="twice" type="xs:string"/>
        <xs:element name="twice" type="xs:int"/>
        <xs:complexType name="Bad">
          <xs:sequence><xs:element name="x" maxOccurs="many"/></xs:sequence>
        </xs:complexType>
        "#,
    );

    let loaded = parse(&source).expect("Failed to parse");
    let codes: Vec<_> = loaded.diagnostics().iter().filter_map(|d| d.code()).collect();

    assert!(codes.contains(&ErrorCode::E200));
    assert!(codes.contains(&ErrorCode::E203));
    assert_eq!(loaded.model().element_declarations().count(), 1);
}

#[test]
fn test_duplicate_points_at_first_definition() {
    let first = r#"<xs:complexType name="Address"><xs:sequence/></xs:complexType>"#;
    let second = r#"<xs:complexType name="Address"/>"#;
    let source = schema(&format!("{first}\n{second}"));

    let loaded = parse(&source).expect("Failed to parse");
    let duplicate = loaded
        .diagnostics()
        .iter()
        .find(|d| d.code() == Some(ErrorCode::E200))
        .expect("duplicate is reported");
    let text = |index: usize| {
        let span = duplicate.labels()[index].span();
        &source[span.start()..span.end()]
    };

    assert_eq!(duplicate.labels().len(), 2);
    assert!(duplicate.labels()[0].is_secondary());
    assert_eq!(duplicate.labels()[0].message(), "first defined here");
    assert_eq!(text(0), first);
    assert!(duplicate.labels()[1].is_primary());
    assert_eq!(duplicate.labels()[1].message(), "duplicate definition");
    assert_eq!(text(1), second);
}

#[test]
fn test_unsupported_construct_is_a_warning() {
    let source = schema(
        r#"
        <xs:element name="a" type="xs:string"/>
        <xs:defaultOpenContent><xs:any/></xs:defaultOpenContent>
        "#,
    );

    let loaded = parse(&source).expect("Failed to parse");
    assert_eq!(loaded.diagnostics().len(), 1);
    assert!(loaded.diagnostics()[0].severity().is_warning());
}

#[test]
fn test_malformed_xml_is_fatal() {
    let err = parse("<xs:schema xmlns:xs=\"http://www.w3.org/2001/XMLSchema\">")
        .expect_err("unclosed root must fail");

    let first = &err.diagnostics()[0];
    assert_eq!(first.severity(), Severity::Fatal);
    assert_eq!(first.code(), Some(ErrorCode::E001));
}

#[test]
fn test_non_schema_root_is_fatal() {
    let err = parse("<root><child/></root>").expect_err("not a schema");
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E002));
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(dir.path().join("absent.xsd")).expect_err("missing file");
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E003));
}

#[test]
fn test_chameleon_include() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("common.xsd"),
        schema(
            r#"
            <xs:complexType name="Address">
              <xs:sequence><xs:element name="street" type="xs:string"/></xs:sequence>
            </xs:complexType>
            "#,
        ),
    )
    .unwrap();
    let main = dir.path().join("main.xsd");
    fs::write(
        &main,
        r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
               xmlns:m="urn:main" targetNamespace="urn:main">
             <xs:include schemaLocation="common.xsd"/>
             <xs:element name="home" type="m:Address"/>
           </xs:schema>"#,
    )
    .unwrap();

    let loaded = load(&main).expect("Failed to load");
    let model = loaded.model();

    assert!(loaded.diagnostics().is_empty(), "{:?}", loaded.diagnostics());
    let address = model.find_type("Address").unwrap();
    assert_eq!(element_type(model, "home"), address);
    assert_eq!(model.type_definition(address).namespace(), Some("urn:main"));
    assert_eq!(model.target_namespace(), Some("urn:main"));
}

#[test]
fn test_unreadable_include_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let main = dir.path().join("main.xsd");
    fs::write(
        &main,
        schema(
            r#"
            <xs:include schemaLocation="missing.xsd"/>
            <xs:element name="a" type="xs:string"/>
            "#,
        ),
    )
    .unwrap();

    let loaded = load(&main).expect("Failed to load");
    assert_eq!(loaded.diagnostics()[0].code(), Some(ErrorCode::E003));
    assert!(loaded.model().find_element("a").is_some());
}

fn occurs_of(min: &str, max: &str) -> (u32, MaxOccurs, usize) {
    let source = schema(&format!(
        r#"
        <xs:element name="root">
          <xs:complexType>
            <xs:sequence>
              <xs:element name="x" type="xs:string" minOccurs="{min}" maxOccurs="{max}"/>
            </xs:sequence>
          </xs:complexType>
        </xs:element>
        "#
    ));
    let loaded = parse(&source).expect("Failed to parse");
    let model = loaded.model();
    let complex = model
        .type_definition(element_type(model, "root"))
        .as_complex()
        .unwrap();
    let Term::ModelGroup(group) = complex.particle().unwrap().term() else {
        panic!("Expected model group content");
    };
    let particle = &model.model_group(*group).particles()[0];
    (
        particle.min_occurs(),
        particle.max_occurs(),
        loaded.diagnostics().len(),
    )
}

proptest::proptest! {
    #[test]
    fn prop_numeric_occurs_are_kept(min in 0u32..10_000, max in 0u32..10_000) {
        let (parsed_min, parsed_max, diagnostics) = occurs_of(&min.to_string(), &max.to_string());

        proptest::prop_assert_eq!(parsed_min, min);
        proptest::prop_assert_eq!(parsed_max, MaxOccurs::Bounded(max));
        proptest::prop_assert_eq!(diagnostics, 0);
    }

    #[test]
    fn prop_invalid_max_occurs_falls_back_to_one(value in "[a-z]{1,8}") {
        proptest::prop_assume!(value != "unbounded");

        let (_, parsed_max, diagnostics) = occurs_of("0", &value);

        proptest::prop_assert_eq!(parsed_max, MaxOccurs::Bounded(1));
        proptest::prop_assert_eq!(diagnostics, 1);
    }
}
