use xsdvi::{
    DiagramBuilder, SymbolTree,
    config::{AppConfig, DiagramOptions, LayoutConfig, RootSelection, StyleConfig},
    schema::ComponentKind,
    symbol::{Symbol, SymbolKind},
};

fn schema(body: &str) -> String {
    format!(
        r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
             xmlns:o="urn:orders" targetNamespace="urn:orders"
             elementFormDefault="qualified">
           {body}
           </xs:schema>"#
    )
}

fn named(name: &str) -> DiagramOptions {
    DiagramOptions::new(RootSelection::Named(name.to_string()))
}

fn build(body: &str, options: &DiagramOptions) -> Option<SymbolTree> {
    let builder = DiagramBuilder::default();
    let loaded = builder.parse(&schema(body)).expect("Failed to parse");
    builder.build_tree(loaded.model(), options)
}

fn element_name(symbol: &Symbol) -> &str {
    match symbol.kind() {
        SymbolKind::Element(element) => &element.name,
        other => panic!("Expected element symbol, got {other:?}"),
    }
}

const ORDER: &str = r#"
    <xs:complexType name="OrderType">
      <xs:sequence>
        <xs:element name="Id" type="xs:string"/>
        <xs:element name="Item" type="xs:string"/>
      </xs:sequence>
    </xs:complexType>
    <xs:element name="Order" type="o:OrderType"/>
"#;

#[test]
fn test_scenario_named_root_with_sequence() {
    let tree = build(ORDER, &named("Order")).expect("Order exists");
    let root = tree.root().unwrap();

    assert_eq!(element_name(root), "Order");
    assert_eq!(root.children().len(), 1);

    let sequence = &root.children()[0];
    assert_eq!(sequence.kind(), &SymbolKind::Sequence { cardinality: None });
    let names: Vec<_> = sequence.children().iter().map(element_name).collect();
    assert_eq!(names, ["Id", "Item"]);
    assert!(sequence.children().iter().all(Symbol::is_leaf));

    assert!(tree.iter().all(|(_, symbol)| !matches!(
        symbol.kind(),
        SymbolKind::Loop | SymbolKind::Key(_) | SymbolKind::Keyref { .. } | SymbolKind::Unique(_)
    )));
}

#[test]
fn test_scenario_recursive_element_ends_in_loop() {
    let tree = build(
        r#"
        <xs:element name="Node">
          <xs:complexType>
            <xs:sequence>
              <xs:element ref="o:Node" minOccurs="0"/>
            </xs:sequence>
          </xs:complexType>
        </xs:element>
        "#,
        &named("Node"),
    )
    .expect("Node exists");

    let root = tree.root().unwrap();
    let nested = &root.children()[0].children()[0];
    let SymbolKind::Element(element) = nested.kind() else {
        panic!("Expected nested element");
    };

    assert_eq!(element.name, "Node");
    assert_eq!(element.cardinality.as_deref(), Some("0..1"));
    assert_eq!(nested.children().len(), 1);
    assert_eq!(nested.children()[0].kind(), &SymbolKind::Loop);
    assert!(nested.children()[0].is_leaf());
}

#[test]
fn test_scenario_key_with_selector_and_fields() {
    let tree = build(
        r#"
        <xs:element name="Person">
          <xs:complexType>
            <xs:attribute name="id" type="xs:ID"/>
            <xs:attribute name="ssn" type="xs:string"/>
          </xs:complexType>
          <xs:key name="PersonKey">
            <xs:selector xpath="."/>
            <xs:field xpath="@id"/>
            <xs:field xpath="@ssn"/>
          </xs:key>
        </xs:element>
        "#,
        &named("Person"),
    )
    .expect("Person exists");

    let root = tree.root().unwrap();
    let key = root.children().last().unwrap();
    let SymbolKind::Key(identity) = key.kind() else {
        panic!("Expected key symbol, got {:?}", key.kind());
    };
    assert_eq!(identity.name, "PersonKey");

    let children: Vec<_> = key.children().iter().map(Symbol::kind).collect();
    assert_eq!(
        children,
        [
            &SymbolKind::Selector {
                xpath: ".".to_string()
            },
            &SymbolKind::Field {
                xpath: "@id".to_string()
            },
            &SymbolKind::Field {
                xpath: "@ssn".to_string()
            },
        ]
    );
}

#[test]
fn test_scenario_all_roots_become_separate_diagrams() {
    let builder = DiagramBuilder::default();
    let loaded = builder
        .parse(&schema(
            r#"
            <xs:element name="a" type="xs:string"/>
            <xs:element name="b" type="xs:int"/>
            <xs:element name="c">
              <xs:complexType><xs:sequence><xs:element name="d" type="xs:string"/></xs:sequence></xs:complexType>
            </xs:element>
            <xs:complexType name="T"/>
            "#,
        ))
        .unwrap();

    let options = DiagramOptions::new(RootSelection::from_name("all"))
        .with_root_kinds(vec![ComponentKind::ElementDeclaration]);
    let diagrams = options.expand(loaded.model());
    assert_eq!(diagrams.len(), 3);

    let roots: Vec<_> = diagrams
        .iter()
        .map(|options| {
            let tree = builder.build_tree(loaded.model(), options).unwrap();
            element_name(tree.root().unwrap()).to_string()
        })
        .collect();
    assert_eq!(roots, ["a", "b", "c"]);
    assert_eq!(
        builder.root_names(loaded.model(), &[ComponentKind::ElementDeclaration]),
        roots
    );
}

#[test]
fn test_walking_twice_is_identical() {
    let builder = DiagramBuilder::default();
    let loaded = builder.parse(&schema(ORDER)).unwrap();

    for options in [named("Order"), DiagramOptions::default()] {
        let first = builder.build_tree(loaded.model(), &options);
        let second = builder.build_tree(loaded.model(), &options);
        assert_eq!(first, second);
    }
}

#[test]
fn test_missing_root_is_nothing_to_draw() {
    assert!(build(ORDER, &named("Invoice")).is_none());
}

#[test]
fn test_schema_root_lists_every_element() {
    let tree = build(ORDER, &DiagramOptions::default()).unwrap();
    let root = tree.root().unwrap();

    assert_eq!(root.kind(), &SymbolKind::Schema);
    assert_eq!(root.children().len(), 1);
    assert_eq!(element_name(&root.children()[0]), "Order");
}

#[test]
fn test_render_svg_embeds_style_and_controls() {
    let builder = DiagramBuilder::default();
    let loaded = builder.parse(&schema(ORDER)).unwrap();
    let options = named("Order");
    let tree = builder.build_tree(loaded.model(), &options).unwrap();

    let svg = builder.render_svg(&tree, &options).expect("Failed to render");

    assert!(svg.contains("<svg"));
    assert!(svg.contains("rect.boxelement"));
    assert!(svg.contains(r#"class="boxcompositor""#));
    assert!(svg.contains("expandAll()"));
}

#[test]
fn test_render_svg_one_node_only_hides_controls() {
    let builder = DiagramBuilder::default();
    let loaded = builder.parse(&schema(ORDER)).unwrap();
    let options = named("Order").with_one_node_only(true);
    let tree = builder.build_tree(loaded.model(), &options).unwrap();

    let svg = builder.render_svg(&tree, &options).unwrap();

    assert!(!svg.contains("<script"));
    assert!(!svg.contains("onclick"));
}

#[test]
fn test_render_svg_links_stylesheet() {
    let config = AppConfig::new(LayoutConfig::default(), StyleConfig::link("xsdvi.css"));
    let builder = DiagramBuilder::new(config);
    let loaded = builder.parse(&schema(ORDER)).unwrap();
    let options = named("Order");
    let tree = builder.build_tree(loaded.model(), &options).unwrap();

    let svg = builder.render_svg(&tree, &options).unwrap();

    assert!(svg.contains(r#"<?xml-stylesheet href="xsdvi.css" type="text/css"?>"#));
    assert!(!svg.contains("rect.boxelement"));
}

#[test]
fn test_parse_error_keeps_source() {
    let builder = DiagramBuilder::default();
    let source = "<xs:schema";

    match builder.parse(source) {
        Err(xsdvi::XsdviError::Parse { src, .. }) => assert_eq!(src, source),
        other => panic!("Expected parse error, got {other:?}"),
    }
}
