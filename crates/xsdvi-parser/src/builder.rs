//! Construction of the schema component graph.
//!
//! The builder runs in two passes over all documents of a schema:
//!
//! 1. **Register** - every top-level element, type and model group gets an
//!    id with a placeholder component, so references resolve regardless of
//!    declaration order. Attribute and attribute-group definitions are kept
//!    as nodes and expanded where they are used.
//! 2. **Resolve** - the placeholders are replaced with the built components.
//!    Types derived by extension need their base content first, so type and
//!    group resolution is on demand and guarded against circular
//!    definitions.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};
use roxmltree::{Document, Node};

use xsdvi_core::schema::{
    AttributeDeclaration, AttributeUse, ComplexTypeDefinition, Compositor, ConstraintCategory,
    ElementDeclaration, ElementId, IdentityConstraint, MaxOccurs, ModelGroup, ModelGroupId,
    NamespaceConstraint, Particle, ProcessContents, SchemaModel, SimpleTypeDefinition, Term,
    TypeId, TypeDefinition, ValueConstraint, Wildcard,
};

use crate::{
    builtins::Builtins,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, Label},
    source::SchemaSource,
    span::Span,
    xsd::{self, QName, XSD_NAMESPACE, annotations, local_name, split_qname, xsd_children},
};

/// The namespace bound to the `xml` prefix.
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Builds the component graph for already collected schema documents.
///
/// The first source is the main document; its target namespace becomes the
/// model's target namespace.
pub(crate) fn build_model(
    sources: &[SchemaSource],
    collector: &mut DiagnosticCollector,
) -> SchemaModel {
    let mut documents = Vec::with_capacity(sources.len());
    let mut infos = Vec::with_capacity(sources.len());
    for (index, source) in sources.iter().enumerate() {
        // Every source was checked while collecting, so parsing succeeds.
        let Ok(document) = xsd::parse_document(&source.text) else {
            continue;
        };
        infos.push(DocumentInfo::new(source, &document, index == 0));
        documents.push(document);
    }

    let builder = ModelBuilder::new(&documents, infos);
    let (model, diagnostics) = builder.build();
    for diagnostic in diagnostics {
        collector.emit(diagnostic);
    }
    model
}

/// Per-document settings that affect how components are named.
#[derive(Debug)]
struct DocumentInfo {
    name: String,
    is_main: bool,
    target_namespace: Option<String>,
    /// `false` for an included document adopting the includer's namespace.
    own_namespace: bool,
    elements_qualified: bool,
    attributes_qualified: bool,
}

impl DocumentInfo {
    fn new(source: &SchemaSource, document: &Document<'_>, is_main: bool) -> Self {
        let root = document.root_element();
        let own = root.attribute("targetNamespace").map(str::to_string);
        Self {
            name: source.name.clone(),
            is_main,
            own_namespace: own.is_some(),
            target_namespace: own.or_else(|| source.inherited_namespace.clone()),
            elements_qualified: root.attribute("elementFormDefault") == Some("qualified"),
            attributes_qualified: root.attribute("attributeFormDefault") == Some("qualified"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    InProgress,
    Done,
}

/// The attribute uses and wildcard of a complex type under construction.
#[derive(Debug, Default)]
struct AttributeSet {
    uses: Vec<AttributeUse>,
    wildcard: Option<Wildcard>,
    /// Names of attributes with `use="prohibited"`.
    prohibited: Vec<String>,
}

impl AttributeSet {
    /// Adds a use; a later use of the same attribute replaces the earlier one.
    fn insert(&mut self, attribute_use: AttributeUse) {
        let declaration = attribute_use.declaration();
        let existing = self.uses.iter_mut().find(|u| {
            u.declaration().name() == declaration.name()
                && u.declaration().namespace() == declaration.namespace()
        });
        match existing {
            Some(slot) => *slot = attribute_use,
            None => self.uses.push(attribute_use),
        }
    }
}

/// The content of a type derived through `simpleContent` or `complexContent`.
struct DerivedContent {
    base: TypeId,
    particle: Option<Particle>,
    attributes: AttributeSet,
}

struct ModelBuilder<'a, 'input> {
    documents: &'a [Document<'input>],
    infos: Vec<DocumentInfo>,
    model: SchemaModel,
    builtins: Builtins,
    diagnostics: Vec<Diagnostic>,

    elements: IndexMap<QName, (ElementId, Node<'a, 'input>)>,
    types: IndexMap<QName, (TypeId, Node<'a, 'input>)>,
    groups: IndexMap<QName, (ModelGroupId, Node<'a, 'input>)>,
    attribute_groups: IndexMap<QName, Node<'a, 'input>>,
    attributes: IndexMap<QName, Node<'a, 'input>>,

    type_nodes: HashMap<TypeId, Node<'a, 'input>>,
    group_nodes: HashMap<ModelGroupId, Node<'a, 'input>>,
    type_resolution: HashMap<TypeId, Resolution>,
    group_resolution: HashMap<ModelGroupId, Resolution>,
    /// Types and groups being resolved without an element declaration in
    /// between. Meeting one of them again is a circular definition.
    type_stack: Vec<TypeId>,
    group_stack: Vec<ModelGroupId>,
    attribute_group_stack: Vec<QName>,
    /// Untyped elements taking the type of their substitution group head.
    pending_substitutions: Vec<(ElementId, ElementId)>,
}

impl<'a, 'input> ModelBuilder<'a, 'input> {
    fn new(documents: &'a [Document<'input>], infos: Vec<DocumentInfo>) -> Self {
        let target_namespace = infos.first().and_then(|info| info.target_namespace.clone());
        let mut model = SchemaModel::new(target_namespace);
        let builtins = Builtins::register(&mut model);
        Self {
            documents,
            infos,
            model,
            builtins,
            diagnostics: Vec::new(),
            elements: IndexMap::new(),
            types: IndexMap::new(),
            groups: IndexMap::new(),
            attribute_groups: IndexMap::new(),
            attributes: IndexMap::new(),
            type_nodes: HashMap::new(),
            group_nodes: HashMap::new(),
            type_resolution: HashMap::new(),
            group_resolution: HashMap::new(),
            type_stack: Vec::new(),
            group_stack: Vec::new(),
            attribute_group_stack: Vec::new(),
            pending_substitutions: Vec::new(),
        }
    }

    fn build(mut self) -> (SchemaModel, Vec<Diagnostic>) {
        self.register_globals();
        self.resolve_globals();
        self.resolve_substitution_types();
        debug!(
            elements = self.elements.len(),
            types = self.types.len(),
            groups = self.groups.len(),
            diagnostics = self.diagnostics.len();
            "Built schema model"
        );
        (self.model, self.diagnostics)
    }

    // =========================================================================
    // Pass 1: registration
    // =========================================================================

    fn register_globals(&mut self) {
        let documents = self.documents;
        for (index, document) in documents.iter().enumerate() {
            let namespace = self.infos[index].target_namespace.clone();
            for child in xsd_children(document.root_element()) {
                self.register_global(child, &namespace);
            }
        }
    }

    fn register_global(&mut self, node: Node<'a, 'input>, namespace: &Option<String>) {
        let kind = local_name(&node);
        match kind {
            "element" | "complexType" | "simpleType" | "group" | "attributeGroup"
            | "attribute" => {}
            "include" | "import" | "annotation" | "notation" => return,
            "redefine" => {
                for redefined in xsd_children(node).filter(|c| local_name(c) != "annotation") {
                    self.warn_unsupported(redefined, "redefinitions are not applied");
                }
                return;
            }
            _ => {
                self.warn_unsupported(node, "skipped");
                return;
            }
        }

        let Some(name) = self.required_attribute(node, "name") else {
            return;
        };
        let key: QName = (namespace.clone(), name.to_string());
        let first = match kind {
            "element" => self.elements.get(&key).map(|(_, n)| *n),
            "complexType" | "simpleType" => self.types.get(&key).map(|(_, n)| *n),
            "group" => self.groups.get(&key).map(|(_, n)| *n),
            "attributeGroup" => self.attribute_groups.get(&key).copied(),
            _ => self.attributes.get(&key).copied(),
        };
        if let Some(first) = first {
            self.report_duplicate(node, first, kind, name);
            return;
        }

        match kind {
            "element" => {
                let declaration =
                    ElementDeclaration::new(name, namespace.clone(), self.builtins.any_type);
                let id = self.model.add_element(declaration);
                self.model.register_global_element(id);
                self.elements.insert(key, (id, node));
            }
            "complexType" | "simpleType" => {
                let placeholder = if kind == "complexType" {
                    TypeDefinition::Complex(ComplexTypeDefinition::new(
                        Some(name.to_string()),
                        namespace.clone(),
                    ))
                } else {
                    TypeDefinition::Simple(SimpleTypeDefinition::new(
                        Some(name.to_string()),
                        namespace.clone(),
                        Some(self.builtins.any_simple_type),
                    ))
                };
                let id = self.model.add_type(placeholder);
                self.model.register_global_type(id);
                self.types.insert(key, (id, node));
                self.type_nodes.insert(id, node);
            }
            "group" => {
                let id = self
                    .model
                    .add_model_group(ModelGroup::new(Compositor::Sequence, Vec::new()));
                self.groups.insert(key, (id, node));
                self.group_nodes.insert(id, node);
            }
            "attributeGroup" => {
                self.attribute_groups.insert(key, node);
            }
            _ => {
                self.attributes.insert(key, node);
            }
        }
    }

    // =========================================================================
    // Pass 2: resolution
    // =========================================================================

    fn resolve_globals(&mut self) {
        let elements: Vec<_> = self.elements.values().copied().collect();
        for (id, node) in elements {
            self.fill_element(id, node);
        }

        let types: Vec<_> = self.types.values().map(|(id, _)| *id).collect();
        for id in types {
            self.ensure_type(id);
        }

        let groups: Vec<_> = self.groups.values().map(|(id, _)| *id).collect();
        for id in groups {
            self.ensure_group(id);
        }
    }

    /// Elements without a type of their own take their head's type. Heads
    /// may be in the same situation, so this repeats until nothing changes.
    fn resolve_substitution_types(&mut self) {
        let pending = std::mem::take(&mut self.pending_substitutions);
        for _ in 0..=pending.len() {
            let mut changed = false;
            for (member, head) in &pending {
                let head_type = self.model.element(*head).type_id();
                if self.model.element(*member).type_id() != head_type {
                    self.model.element_mut(*member).set_type_id(head_type);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
    }

    /// Builds a global type definition if it was not built yet.
    ///
    /// Returns `false` if the type is already being built further up the
    /// current derivation chain, i.e. the derivation is circular.
    fn ensure_type(&mut self, id: TypeId) -> bool {
        if self.type_stack.contains(&id) {
            return false;
        }
        match self.type_resolution.get(&id) {
            Some(Resolution::Done) => return true,
            Some(Resolution::InProgress) => {
                trace!(type_id:? = id; "Base type content not yet available");
                return true;
            }
            None => {}
        }
        let Some(node) = self.type_nodes.get(&id).copied() else {
            // Built-in types are complete from the start.
            return true;
        };

        self.type_resolution.insert(id, Resolution::InProgress);
        self.type_stack.push(id);
        let name = node.attribute("name").map(str::to_string);
        let definition = if local_name(&node) == "complexType" {
            TypeDefinition::Complex(self.complex_type(node, name))
        } else {
            TypeDefinition::Simple(self.simple_type(node, name))
        };
        self.model.set_type_definition(id, definition);
        self.type_stack.pop();
        self.type_resolution.insert(id, Resolution::Done);
        true
    }

    /// Builds a global model group if it was not built yet.
    ///
    /// Returns `false` if the group contains itself without an element
    /// declaration in between.
    fn ensure_group(&mut self, id: ModelGroupId) -> bool {
        if self.group_stack.contains(&id) {
            return false;
        }
        if self.group_resolution.contains_key(&id) {
            return true;
        }
        let Some(node) = self.group_nodes.get(&id).copied() else {
            return true;
        };

        self.group_resolution.insert(id, Resolution::InProgress);
        self.group_stack.push(id);
        let compositor = xsd_children(node).find_map(|child| {
            compositor_of(&child).map(|compositor| (child, compositor))
        });
        if let Some((child, compositor)) = compositor {
            let group = self.model_group(child, compositor);
            self.model.set_model_group(id, group);
        }
        self.group_stack.pop();
        self.group_resolution.insert(id, Resolution::Done);
        true
    }

    // =========================================================================
    // Elements
    // =========================================================================

    fn fill_element(&mut self, id: ElementId, node: Node<'a, 'input>) {
        let type_id = self.element_type(node);
        let substitution_group = node
            .attribute("substitutionGroup")
            .and_then(|value| self.resolve_element(node, value));
        let constraints = self.identity_constraints(node);

        if let (None, Some(head)) = (type_id, substitution_group) {
            self.pending_substitutions.push((id, head));
        }

        let element = self.model.element_mut(id);
        if let Some(type_id) = type_id {
            element.set_type_id(type_id);
        }
        element.set_nillable(boolean_attribute(&node, "nillable"));
        element.set_abstract(boolean_attribute(&node, "abstract"));
        element.set_substitution_group(substitution_group);
        element.set_identity_constraints(constraints);
        element.set_annotations(annotations(node));
    }

    /// Declares a local element.
    ///
    /// The element starts a new scope for circular-definition checks: a type
    /// or group reached again through an element is recursion, not a cycle.
    fn local_element(&mut self, node: Node<'a, 'input>, name: &str) -> ElementId {
        let info = self.document(&node);
        let qualified = match node.attribute("form") {
            Some("qualified") => true,
            Some("unqualified") => false,
            _ => info.elements_qualified,
        };
        let namespace = if qualified {
            info.target_namespace.clone()
        } else {
            None
        };

        let id = self.model.add_element(ElementDeclaration::new(
            name,
            namespace,
            self.builtins.any_type,
        ));
        let type_stack = std::mem::take(&mut self.type_stack);
        let group_stack = std::mem::take(&mut self.group_stack);
        self.fill_element(id, node);
        self.type_stack = type_stack;
        self.group_stack = group_stack;
        id
    }

    /// The type of an element: its `type` attribute or inline definition.
    fn element_type(&mut self, node: Node<'a, 'input>) -> Option<TypeId> {
        if let Some(value) = node.attribute("type") {
            let fallback = self.builtins.any_type;
            return Some(self.resolve_type(node, value, fallback));
        }
        xsd_children(node)
            .find(|child| matches!(local_name(child), "complexType" | "simpleType"))
            .map(|child| self.anonymous_type(child))
    }

    fn identity_constraints(&mut self, node: Node<'a, 'input>) -> Vec<IdentityConstraint> {
        let namespace = self.document(&node).target_namespace.clone();
        let mut constraints = Vec::new();
        for child in xsd_children(node) {
            let category = match local_name(&child) {
                "key" => ConstraintCategory::Key,
                "unique" => ConstraintCategory::Unique,
                "keyref" => {
                    let Some(refer) = self.required_attribute(child, "refer") else {
                        continue;
                    };
                    ConstraintCategory::Keyref {
                        refer: split_qname(refer).1.to_string(),
                    }
                }
                _ => continue,
            };
            let Some(name) = self.required_attribute(child, "name") else {
                continue;
            };
            let selector = xsd_children(child)
                .find(|c| local_name(c) == "selector")
                .and_then(|c| c.attribute("xpath"))
                .unwrap_or_default();
            let fields = xsd_children(child)
                .filter(|c| local_name(c) == "field")
                .filter_map(|c| c.attribute("xpath"))
                .map(str::to_string)
                .collect();
            constraints.push(
                IdentityConstraint::new(category, name, namespace.clone(), selector, fields)
                    .with_annotations(annotations(child)),
            );
        }
        constraints
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn anonymous_type(&mut self, node: Node<'a, 'input>) -> TypeId {
        let definition = if local_name(&node) == "complexType" {
            TypeDefinition::Complex(self.complex_type(node, None))
        } else {
            TypeDefinition::Simple(self.simple_type(node, None))
        };
        self.model.add_type(definition)
    }

    fn complex_type(
        &mut self,
        node: Node<'a, 'input>,
        name: Option<String>,
    ) -> ComplexTypeDefinition {
        let namespace = self.document(&node).target_namespace.clone();
        let mut base = self.builtins.any_type;
        let mut particle = None;
        let mut attributes = AttributeSet::default();

        for child in xsd_children(node) {
            match local_name(&child) {
                "annotation" => {}
                "sequence" | "choice" | "all" | "group" => particle = self.particle(child),
                "simpleContent" | "complexContent" => {
                    let derived = self.derived_content(child);
                    base = derived.base;
                    particle = derived.particle;
                    attributes = derived.attributes;
                }
                _ => {
                    if !self.collect_attribute(child, &mut attributes) {
                        self.warn_unsupported(child, "skipped");
                    }
                }
            }
        }

        ComplexTypeDefinition::new(name, namespace)
            .with_base(Some(base))
            .with_particle(particle)
            .with_attribute_uses(attributes.uses)
            .with_attribute_wildcard(attributes.wildcard)
    }

    /// Effective content of a `simpleContent` or `complexContent` derivation.
    ///
    /// An extension appends its own content model to the base content in a
    /// new sequence and adds its attributes to the base attributes. A
    /// restriction restates the content model and keeps the base attributes
    /// it does not prohibit.
    fn derived_content(&mut self, node: Node<'a, 'input>) -> DerivedContent {
        let simple = local_name(&node) == "simpleContent";
        let mut derived = DerivedContent {
            base: self.builtins.any_type,
            particle: None,
            attributes: AttributeSet::default(),
        };

        let Some(derivation) =
            xsd_children(node).find(|c| matches!(local_name(c), "extension" | "restriction"))
        else {
            self.report(
                node,
                Diagnostic::error(format!(
                    "`xs:{}` has neither `xs:extension` nor `xs:restriction`",
                    local_name(&node)
                ))
                .with_code(ErrorCode::E204),
                "empty derivation",
            );
            return derived;
        };
        let extension = local_name(&derivation) == "extension";

        if let Some(value) = self.required_attribute(derivation, "base") {
            let fallback = self.builtins.any_type;
            derived.base = self.resolve_type(derivation, value, fallback);
        }
        let base_content = if self.ensure_type(derived.base) {
            self.model
                .type_definition(derived.base)
                .as_complex()
                .cloned()
        } else {
            let base_name = self.model.type_definition(derived.base).name().unwrap_or("");
            let message = format!("derivation from `{base_name}` is circular");
            self.report(
                derivation,
                Diagnostic::error(message)
                    .with_code(ErrorCode::E201)
                    .with_help("a type cannot be derived from itself"),
                "derived here",
            );
            None
        };

        let mut own_particle = None;
        let mut own = AttributeSet::default();
        for child in xsd_children(derivation) {
            match local_name(&child) {
                "annotation" => {}
                "sequence" | "choice" | "all" | "group" if !simple => {
                    own_particle = self.particle(child);
                }
                _ => {
                    // Facets of a simple content restriction are not components.
                    if !self.collect_attribute(child, &mut own) && !simple {
                        self.warn_unsupported(child, "skipped");
                    }
                }
            }
        }

        if let Some(base) = &base_content {
            for attribute_use in base.attribute_uses() {
                let name = attribute_use.declaration().name();
                if extension || !own.prohibited.iter().any(|p| p == name) {
                    derived.attributes.insert(attribute_use.clone());
                }
            }
        }
        for attribute_use in own.uses {
            derived.attributes.insert(attribute_use);
        }

        if extension {
            derived.attributes.wildcard = own.wildcard.or_else(|| {
                base_content
                    .as_ref()
                    .and_then(|base| base.attribute_wildcard().cloned())
            });
            if !simple {
                let base_particle = base_content.and_then(|base| base.particle().cloned());
                derived.particle = self.extend_particle(base_particle, own_particle);
            }
        } else {
            derived.attributes.wildcard = own.wildcard;
            derived.particle = own_particle;
        }
        derived
    }

    fn extend_particle(
        &mut self,
        base: Option<Particle>,
        own: Option<Particle>,
    ) -> Option<Particle> {
        match (base, own) {
            (None, own) => own,
            (base, None) => base,
            (Some(base), Some(own)) => {
                let group = ModelGroup::new(Compositor::Sequence, vec![base, own]);
                let id = self.model.add_model_group(group);
                Some(Particle::once(Term::ModelGroup(id)))
            }
        }
    }

    fn simple_type(&mut self, node: Node<'a, 'input>, name: Option<String>) -> SimpleTypeDefinition {
        let namespace = self.document(&node).target_namespace.clone();
        let any_simple_type = self.builtins.any_simple_type;
        let mut base = any_simple_type;

        for child in xsd_children(node) {
            match local_name(&child) {
                "annotation" => {}
                "restriction" => {
                    base = match child.attribute("base") {
                        Some(value) => self.resolve_type(child, value, any_simple_type),
                        None => xsd_children(child)
                            .find(|c| local_name(c) == "simpleType")
                            .map_or(any_simple_type, |inline| self.anonymous_type(inline)),
                    };
                }
                "list" | "union" => base = any_simple_type,
                _ => self.warn_unsupported(child, "skipped"),
            }
        }

        SimpleTypeDefinition::new(name, namespace, Some(base))
    }

    // =========================================================================
    // Particles
    // =========================================================================

    fn particle(&mut self, node: Node<'a, 'input>) -> Option<Particle> {
        let term = match local_name(&node) {
            "element" => Term::Element(self.element_term(node)?),
            "group" => Term::ModelGroup(self.group_reference(node)?),
            "any" => Term::Wildcard(self.wildcard(node)),
            _ => match compositor_of(&node) {
                Some(compositor) => {
                    let group = self.model_group(node, compositor);
                    Term::ModelGroup(self.model.add_model_group(group))
                }
                None => {
                    self.warn_unsupported(node, "skipped");
                    return None;
                }
            },
        };
        let (min_occurs, max_occurs) = self.occurs(node);
        Some(Particle::new(min_occurs, max_occurs, term))
    }

    fn model_group(&mut self, node: Node<'a, 'input>, compositor: Compositor) -> ModelGroup {
        let particles = xsd_children(node)
            .filter(|child| local_name(child) != "annotation")
            .filter_map(|child| self.particle(child))
            .collect();
        ModelGroup::new(compositor, particles).with_annotations(annotations(node))
    }

    fn element_term(&mut self, node: Node<'a, 'input>) -> Option<ElementId> {
        if let Some(value) = node.attribute("ref") {
            return self.resolve_element(node, value);
        }
        let name = self.required_attribute(node, "name")?;
        Some(self.local_element(node, name))
    }

    fn group_reference(&mut self, node: Node<'a, 'input>) -> Option<ModelGroupId> {
        let value = self.required_attribute(node, "ref")?;
        let qname = self.resolve_qname(node, value)?;
        let Some((id, _)) = self.groups.get(&qname).copied() else {
            self.report_reference(
                node,
                Diagnostic::error(format!("model group `{value}` is not defined"))
                    .with_code(ErrorCode::E103),
            );
            return None;
        };
        if !self.ensure_group(id) {
            self.report(
                node,
                Diagnostic::error(format!("model group `{value}` contains itself"))
                    .with_code(ErrorCode::E202)
                    .with_help("wrap the recursive part in an element declaration"),
                "circular reference",
            );
            return None;
        }
        Some(id)
    }

    fn wildcard(&mut self, node: Node<'a, 'input>) -> Wildcard {
        let target_namespace = self.document(&node).target_namespace.clone();
        let namespace_list = |list: &str| -> Vec<Option<String>> {
            list.split_whitespace()
                .map(|token| match token {
                    "##targetNamespace" => target_namespace.clone(),
                    "##local" => None,
                    uri => Some(uri.to_string()),
                })
                .collect()
        };

        let constraint = if let Some(list) = node.attribute("notNamespace") {
            NamespaceConstraint::Not(namespace_list(list))
        } else {
            match node.attribute("namespace").map(str::trim) {
                None | Some("##any") => NamespaceConstraint::Any,
                // Unqualified names are excluded as well.
                Some("##other") => {
                    NamespaceConstraint::Not(vec![target_namespace.clone(), None])
                }
                Some(list) => NamespaceConstraint::Enumeration(namespace_list(list)),
            }
        };
        let process_contents = match node.attribute("processContents").map(str::trim) {
            Some("lax") => ProcessContents::Lax,
            Some("skip") => ProcessContents::Skip,
            _ => ProcessContents::Strict,
        };

        Wildcard::new(constraint, process_contents).with_annotations(annotations(node))
    }

    fn occurs(&mut self, node: Node<'a, 'input>) -> (u32, MaxOccurs) {
        let min_occurs = match node.attribute("minOccurs") {
            None => 1,
            Some(value) => match value.trim().parse::<u32>() {
                Ok(min) => min,
                Err(_) => {
                    self.report_invalid_occurs(node, "minOccurs", value);
                    1
                }
            },
        };
        let max_occurs = match node.attribute("maxOccurs").map(str::trim) {
            None => MaxOccurs::Bounded(1),
            Some("unbounded") => MaxOccurs::Unbounded,
            Some(value) => match value.parse::<u32>() {
                Ok(max) => MaxOccurs::Bounded(max),
                Err(_) => {
                    self.report_invalid_occurs(node, "maxOccurs", value);
                    MaxOccurs::Bounded(1)
                }
            },
        };
        (min_occurs, max_occurs)
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Adds an attribute-related child of a complex type to `set`.
    ///
    /// Returns `false` if `node` is not an attribute, attribute group
    /// reference or attribute wildcard.
    fn collect_attribute(&mut self, node: Node<'a, 'input>, set: &mut AttributeSet) -> bool {
        match local_name(&node) {
            "attribute" => {
                if node.attribute("use").map(str::trim) == Some("prohibited") {
                    let name = node
                        .attribute("name")
                        .or_else(|| node.attribute("ref").map(|r| split_qname(r).1));
                    set.prohibited.extend(name.map(str::to_string));
                } else if let Some(attribute_use) = self.attribute_use(node) {
                    set.insert(attribute_use);
                }
            }
            "attributeGroup" => self.expand_attribute_group(node, set),
            "anyAttribute" => set.wildcard = Some(self.wildcard(node)),
            _ => return false,
        }
        true
    }

    fn expand_attribute_group(&mut self, node: Node<'a, 'input>, set: &mut AttributeSet) {
        let Some(value) = self.required_attribute(node, "ref") else {
            return;
        };
        let Some(qname) = self.resolve_qname(node, value) else {
            return;
        };
        let Some(group) = self.attribute_groups.get(&qname).copied() else {
            self.report_reference(
                node,
                Diagnostic::error(format!("attribute group `{value}` is not defined"))
                    .with_code(ErrorCode::E104),
            );
            return;
        };
        if self.attribute_group_stack.contains(&qname) {
            self.report(
                node,
                Diagnostic::error(format!("attribute group `{value}` contains itself"))
                    .with_code(ErrorCode::E202),
                "circular reference",
            );
            return;
        }

        self.attribute_group_stack.push(qname);
        for child in xsd_children(group) {
            if local_name(&child) != "annotation" && !self.collect_attribute(child, set) {
                self.warn_unsupported(child, "skipped");
            }
        }
        self.attribute_group_stack.pop();
    }

    fn attribute_use(&mut self, node: Node<'a, 'input>) -> Option<AttributeUse> {
        let required = node.attribute("use").map(str::trim) == Some("required");
        let (declaration, declaring_node) = match node.attribute("ref") {
            Some(value) => self.referenced_attribute(node, value)?,
            None => {
                let name = self.required_attribute(node, "name")?;
                let info = self.document(&node);
                let qualified = match node.attribute("form") {
                    Some("qualified") => true,
                    Some("unqualified") => false,
                    _ => info.attributes_qualified,
                };
                let namespace = if qualified {
                    info.target_namespace.clone()
                } else {
                    None
                };
                let type_id = self.attribute_type(node);
                (AttributeDeclaration::new(name, namespace, type_id), Some(node))
            }
        };

        let value_constraint =
            value_constraint(&node).or_else(|| declaring_node.and_then(|n| value_constraint(&n)));
        let mut documentation = annotations(node);
        if documentation.is_empty() {
            documentation = declaring_node.map(annotations).unwrap_or_default();
        }

        Some(
            AttributeUse::new(declaration, required)
                .with_value_constraint(value_constraint)
                .with_annotations(documentation),
        )
    }

    /// Declaration of a global attribute referenced by `ref`, with the node
    /// declaring it. Attributes of the XML namespace need no declaration.
    fn referenced_attribute(
        &mut self,
        node: Node<'a, 'input>,
        value: &str,
    ) -> Option<(AttributeDeclaration, Option<Node<'a, 'input>>)> {
        let qname = self.resolve_qname(node, value)?;
        if let Some(global) = self.attributes.get(&qname).copied() {
            let type_id = self.attribute_type(global);
            let declaration = AttributeDeclaration::new(qname.1, qname.0, type_id);
            return Some((declaration, Some(global)));
        }
        if qname.0.as_deref() == Some(XML_NAMESPACE) {
            let declaration =
                AttributeDeclaration::new(qname.1, qname.0, self.builtins.any_simple_type);
            return Some((declaration, None));
        }
        self.report_reference(
            node,
            Diagnostic::error(format!("attribute `{value}` is not defined"))
                .with_code(ErrorCode::E102),
        );
        None
    }

    fn attribute_type(&mut self, node: Node<'a, 'input>) -> TypeId {
        let any_simple_type = self.builtins.any_simple_type;
        if let Some(value) = node.attribute("type") {
            return self.resolve_type(node, value, any_simple_type);
        }
        xsd_children(node)
            .find(|child| local_name(child) == "simpleType")
            .map_or(any_simple_type, |inline| self.anonymous_type(inline))
    }

    // =========================================================================
    // Name resolution
    // =========================================================================

    /// Resolves a QName attribute value in the scope of `node`.
    fn resolve_qname(&mut self, node: Node<'a, 'input>, value: &str) -> Option<QName> {
        let (prefix, local) = split_qname(value);
        let namespace = match (prefix, node.lookup_namespace_uri(prefix)) {
            (_, Some(uri)) => Some(uri.to_string()),
            (Some(prefix), None) => {
                self.report(
                    node,
                    Diagnostic::error(format!("namespace prefix `{prefix}` is not declared"))
                        .with_code(ErrorCode::E105)
                        .with_help(format!("declare it with `xmlns:{prefix}=\"...\"`")),
                    "used here",
                );
                return None;
            }
            (None, None) => {
                // Unqualified names in an included document without its own
                // namespace belong to the including document's namespace.
                let info = self.document(&node);
                if info.own_namespace {
                    None
                } else {
                    info.target_namespace.clone()
                }
            }
        };
        Some((namespace, local.to_string()))
    }

    fn resolve_type(&mut self, node: Node<'a, 'input>, value: &str, fallback: TypeId) -> TypeId {
        let Some(qname) = self.resolve_qname(node, value) else {
            return fallback;
        };
        let builtin = if qname.0.as_deref() == Some(XSD_NAMESPACE) {
            self.builtins.by_name.get(&qname.1).copied()
        } else {
            None
        };
        if let Some(id) = builtin.or_else(|| self.types.get(&qname).map(|(id, _)| *id)) {
            return id;
        }
        self.report_reference(
            node,
            Diagnostic::error(format!("type `{value}` is not defined"))
                .with_code(ErrorCode::E100)
                .with_help("declare the type or import the schema defining it"),
        );
        fallback
    }

    fn resolve_element(&mut self, node: Node<'a, 'input>, value: &str) -> Option<ElementId> {
        let qname = self.resolve_qname(node, value)?;
        if let Some((id, _)) = self.elements.get(&qname) {
            return Some(*id);
        }
        self.report_reference(
            node,
            Diagnostic::error(format!("element `{value}` is not declared"))
                .with_code(ErrorCode::E101),
        );
        None
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    fn document(&self, node: &Node<'a, 'input>) -> &DocumentInfo {
        let index = self
            .documents
            .iter()
            .position(|document| std::ptr::eq(document, node.document()))
            .unwrap_or(0);
        &self.infos[index]
    }

    fn report(&mut self, node: Node<'a, 'input>, diagnostic: Diagnostic, label: &str) {
        self.report_labeled(node, diagnostic, Label::primary(Span::new(node.range()), label));
    }

    fn report_reference(&mut self, node: Node<'a, 'input>, diagnostic: Diagnostic) {
        self.report_labeled(node, diagnostic, Label::reference(Span::new(node.range())));
    }

    fn report_labeled(&mut self, node: Node<'a, 'input>, diagnostic: Diagnostic, label: Label) {
        let info = self.document(&node);
        let document = (!info.is_main).then(|| info.name.clone());
        let mut diagnostic = diagnostic.attach(label);
        if let Some(document) = document {
            diagnostic = diagnostic.in_document(document);
        }
        debug!(diagnostic:% = diagnostic; "Schema diagnostic");
        self.diagnostics.push(diagnostic);
    }

    fn report_duplicate(
        &mut self,
        node: Node<'a, 'input>,
        first: Node<'a, 'input>,
        kind: &str,
        name: &str,
    ) {
        let mut diagnostic = Diagnostic::error(format!("{kind} `{name}` is defined multiple times"))
            .with_code(ErrorCode::E200)
            .with_help("rename one of the definitions");
        // Both spans must refer to the same document to be shown together.
        if std::ptr::eq(node.document(), first.document()) {
            diagnostic = diagnostic.attach(Label::first_definition(Span::new(first.range())));
        }
        self.report_labeled(
            node,
            diagnostic,
            Label::duplicate_definition(Span::new(node.range())),
        );
    }

    fn report_invalid_occurs(&mut self, node: Node<'a, 'input>, attribute: &str, value: &str) {
        self.report(
            node,
            Diagnostic::error(format!("invalid `{attribute}` value `{value}`"))
                .with_code(ErrorCode::E203)
                .with_help("use a non-negative integer, or `unbounded` for `maxOccurs`"),
            "invalid occurrence",
        );
    }

    fn required_attribute(&mut self, node: Node<'a, 'input>, attribute: &str) -> Option<&'a str> {
        let value = node.attribute(attribute);
        if value.is_none() {
            self.report(
                node,
                Diagnostic::error(format!(
                    "`xs:{}` is missing the `{attribute}` attribute",
                    local_name(&node)
                ))
                .with_code(ErrorCode::E204),
                "declared here",
            );
        }
        value
    }

    fn warn_unsupported(&mut self, node: Node<'a, 'input>, label: &str) {
        trace!(construct = local_name(&node); "Skipping unsupported construct");
        self.report(
            node,
            Diagnostic::warning(format!(
                "unsupported schema construct `xs:{}`",
                local_name(&node)
            ))
            .with_code(ErrorCode::E300),
            label,
        );
    }
}

fn compositor_of(node: &Node<'_, '_>) -> Option<Compositor> {
    match local_name(node) {
        "sequence" => Some(Compositor::Sequence),
        "choice" => Some(Compositor::Choice),
        "all" => Some(Compositor::All),
        _ => None,
    }
}

fn boolean_attribute(node: &Node<'_, '_>, attribute: &str) -> bool {
    matches!(node.attribute(attribute).map(str::trim), Some("true" | "1"))
}

fn value_constraint(node: &Node<'_, '_>) -> Option<ValueConstraint> {
    if let Some(value) = node.attribute("fixed") {
        return Some(ValueConstraint::Fixed(value.to_string()));
    }
    node.attribute("default")
        .map(|value| ValueConstraint::Default(value.to_string()))
}
