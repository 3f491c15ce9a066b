//! Conversion of a schema component graph into a symbol tree.
//!
//! The walker descends depth-first from the diagram root through element
//! declarations, their complex types and the content models of those types.
//! The component graph may be cyclic, so the walker keeps the element
//! declarations of the current path on a stack: meeting one of them again
//! ends the path with a [`SymbolKind::Loop`] instead of descending.
//!
//! Every function returns its finished subtree; the caller attaches it to
//! its own symbol.

use log::{debug, trace, warn};

use xsdvi_core::{
    schema::{
        Annotation, AttributeUse, ComplexTypeDefinition, ComponentKind, Compositor,
        ConstraintCategory, ElementId, IdentityConstraint, MaxOccurs, ModelGroupId, NamespaceConstraint, Particle,
        SchemaModel, Term, TypeDefinition, TypeId, ValueConstraint, Wildcard,
    },
    symbol::{AttributeSymbol, ElementSymbol, IdentitySymbol, Symbol, SymbolKind, WildcardSymbol},
};

use crate::{
    config::{DiagramOptions, RootSelection},
    tree::SymbolTree,
};

/// Walks `model` from the root selected in `options`.
///
/// Returns an empty tree when the named root does not exist, or names a
/// simple type, which has no structure to draw.
pub fn build_tree(model: &SchemaModel, options: &DiagramOptions) -> SymbolTree {
    let walker = SchemaWalker {
        model,
        one_node_only: options.one_node_only(),
        namespace: None,
        stack: Vec::new(),
    };
    let tree = walker.walk(options);
    debug!(root:? = options.root(), symbols = tree.len(); "Symbol tree built");
    tree
}

struct SchemaWalker<'a> {
    model: &'a SchemaModel,
    one_node_only: bool,
    /// Namespaces equal to this one are not shown.
    namespace: Option<&'a str>,
    /// Element declarations on the path from the root to the current symbol.
    stack: Vec<ElementId>,
}

impl<'a> SchemaWalker<'a> {
    fn walk(mut self, options: &DiagramOptions) -> SymbolTree {
        let model = self.model;
        match options.root() {
            RootSelection::Schema => {
                let mut root = Symbol::new(SymbolKind::Schema);
                for id in model.element_declarations() {
                    root.append_child(self.element(id, None));
                }
                if options.root_kinds().contains(&ComponentKind::TypeDefinition) {
                    for id in model.complex_type_definitions() {
                        root.append_child(self.type_root(id));
                    }
                }
                SymbolTree::with_root(root)
            }
            RootSelection::Named(name) => {
                if let Some(id) = model.find_element(name) {
                    self.namespace = model.element(id).namespace();
                    return SymbolTree::with_root(self.element(id, None));
                }
                match model.find_type(name) {
                    Some(id) if model.type_definition(id).as_complex().is_some() => {
                        self.namespace = model.type_definition(id).namespace();
                        SymbolTree::with_root(self.type_root(id))
                    }
                    Some(_) => {
                        debug!(root = name; "Root is a simple type, nothing to draw");
                        SymbolTree::new()
                    }
                    None => {
                        debug!(root = name; "Root not found in schema");
                        SymbolTree::new()
                    }
                }
            }
            RootSelection::All => {
                warn!("Root selection `all` must be expanded into named roots before walking");
                SymbolTree::new()
            }
        }
    }

    /// An element declaration occupying a particle with `cardinality`, or
    /// the diagram root.
    fn element(&mut self, id: ElementId, cardinality: Option<String>) -> Symbol {
        let model = self.model;
        let declaration = model.element(id);
        let mut symbol = Symbol::new(SymbolKind::Element(ElementSymbol {
            name: declaration.name().to_string(),
            namespace: self.foreign_namespace(declaration.namespace()),
            type_ref: self.type_ref(declaration.type_id()),
            cardinality,
            nillable: declaration.nillable(),
            is_abstract: declaration.is_abstract(),
            substitution: declaration
                .substitution_group()
                .map(|head| model.element(head).name().to_string()),
        }))
        .with_description(documentation(declaration.annotations()));

        if self.stack.contains(&id) {
            trace!(element = declaration.name(); "Recursive element reference");
            symbol.append_child(Symbol::new(SymbolKind::Loop));
            return symbol;
        }
        self.stack.push(id);

        if self.one_node_only && self.stack.len() > 1 {
            trace!(element = declaration.name(); "Type not expanded in one-node-only mode");
        } else if let Some(complex) = model.type_definition(declaration.type_id()).as_complex() {
            self.complex_content(complex, &mut symbol);
        }

        for constraint in declaration.identity_constraints() {
            symbol.append_child(self.identity_constraint(constraint));
        }

        self.stack.pop();
        symbol
    }

    /// A complex type drawn as a diagram root, labeled with its type reference.
    fn type_root(&mut self, id: TypeId) -> Symbol {
        let definition = self.model.type_definition(id);
        let mut symbol = Symbol::new(SymbolKind::Element(ElementSymbol {
            name: self.type_ref(id).unwrap_or_default(),
            namespace: self.foreign_namespace(definition.namespace()),
            ..ElementSymbol::default()
        }));
        if let Some(complex) = definition.as_complex() {
            self.complex_content(complex, &mut symbol);
        }
        symbol
    }

    /// Appends the content model, attribute uses and attribute wildcard of
    /// a complex type to `parent`.
    fn complex_content(&mut self, complex: &ComplexTypeDefinition, parent: &mut Symbol) {
        if let Some(particle) = complex.particle() {
            parent.append_child(self.particle(particle));
        }
        for attribute_use in complex.attribute_uses() {
            parent.append_child(self.attribute(attribute_use));
        }
        if let Some(wildcard) = complex.attribute_wildcard() {
            parent.append_child(self.wildcard(wildcard, None, true));
        }
    }

    fn particle(&mut self, particle: &Particle) -> Symbol {
        let cardinality = cardinality(particle.min_occurs(), particle.max_occurs());
        match particle.term() {
            Term::ModelGroup(id) => self.model_group(*id, cardinality),
            Term::Element(id) => self.element(*id, cardinality),
            Term::Wildcard(wildcard) => self.wildcard(wildcard, cardinality, false),
        }
    }

    fn model_group(&mut self, id: ModelGroupId, cardinality: Option<String>) -> Symbol {
        let group = self.model.model_group(id);
        let kind = match group.compositor() {
            Compositor::Sequence => SymbolKind::Sequence { cardinality },
            Compositor::Choice => SymbolKind::Choice { cardinality },
            Compositor::All => SymbolKind::All { cardinality },
        };
        let mut symbol = Symbol::new(kind).with_description(documentation(group.annotations()));
        for particle in group.particles() {
            symbol.append_child(self.particle(particle));
        }
        symbol
    }

    /// An `any` symbol, or an `anyAttribute` symbol for attribute wildcards.
    fn wildcard(
        &self,
        wildcard: &Wildcard,
        cardinality: Option<String>,
        attribute: bool,
    ) -> Symbol {
        let attributes = WildcardSymbol {
            namespace: Some(namespace_summary(wildcard.constraint())),
            process_contents: wildcard.process_contents(),
            cardinality,
        };
        let kind = if attribute {
            SymbolKind::AnyAttribute(attributes)
        } else {
            SymbolKind::Any(attributes)
        };
        Symbol::new(kind).with_description(documentation(wildcard.annotations()))
    }

    fn attribute(&self, attribute_use: &AttributeUse) -> Symbol {
        let declaration = attribute_use.declaration();
        let constraint = attribute_use.value_constraint().map(|constraint| match constraint {
            ValueConstraint::Default(value) => format!("default: {value}"),
            ValueConstraint::Fixed(value) => format!("fixed: {value}"),
        });
        Symbol::new(SymbolKind::Attribute(AttributeSymbol {
            name: declaration.name().to_string(),
            namespace: self.foreign_namespace(declaration.namespace()),
            type_ref: self.type_ref(declaration.type_id()),
            required: attribute_use.required(),
            constraint,
        }))
        .with_description(documentation(attribute_use.annotations()))
    }

    /// A key, keyref or unique symbol with its selector followed by its fields.
    fn identity_constraint(&self, constraint: &IdentityConstraint) -> Symbol {
        let identity = IdentitySymbol {
            name: constraint.name().to_string(),
            namespace: self.foreign_namespace(constraint.namespace()),
        };
        let kind = match constraint.category() {
            ConstraintCategory::Key => SymbolKind::Key(identity),
            ConstraintCategory::Unique => SymbolKind::Unique(identity),
            ConstraintCategory::Keyref { refer } => SymbolKind::Keyref {
                identity,
                refer: refer.clone(),
            },
        };

        let mut symbol = Symbol::new(kind).with_description(documentation(constraint.annotations()));
        symbol.append_child(Symbol::new(SymbolKind::Selector {
            xpath: constraint.selector().to_string(),
        }));
        for field in constraint.fields() {
            symbol.append_child(Symbol::new(SymbolKind::Field {
                xpath: field.clone(),
            }));
        }
        symbol
    }

    /// `namespace`, unless it is the namespace of the diagram root.
    fn foreign_namespace(&self, namespace: Option<&str>) -> Option<String> {
        namespace
            .filter(|namespace| Some(*namespace) != self.namespace)
            .map(str::to_string)
    }

    /// `"type: T"` for a named type and `"base: B"` for an anonymous simple
    /// type, where `B` is the closest named ancestor. Anonymous complex types
    /// have no reference; their content is drawn instead.
    fn type_ref(&self, id: TypeId) -> Option<String> {
        let definition = self.model.type_definition(id);
        if let Some(name) = definition.name() {
            return Some(format!("type: {name}"));
        }
        let TypeDefinition::Simple(_) = definition else {
            return None;
        };

        let mut base = definition.base_type();
        while let Some(id) = base {
            let base_definition = self.model.type_definition(id);
            if let Some(name) = base_definition.name() {
                return Some(format!("base: {name}"));
            }
            base = base_definition.base_type();
        }
        None
    }
}

/// Formats an occurrence range; `None` for exactly once.
pub fn cardinality(min_occurs: u32, max_occurs: MaxOccurs) -> Option<String> {
    match max_occurs {
        MaxOccurs::Unbounded => Some(format!("{min_occurs}..∞")),
        MaxOccurs::Bounded(1) if min_occurs == 1 => None,
        MaxOccurs::Bounded(max) => Some(format!("{min_occurs}..{max}")),
    }
}

/// Summarizes a wildcard's namespace constraint, e.g. `"any NS"` or
/// `"not NS: urn:a [absent] "`.
///
/// Each listed namespace is followed by a space; the no-namespace entry is
/// shown once as `[absent]` however often it is listed.
pub fn namespace_summary(constraint: &NamespaceConstraint) -> String {
    let (mut summary, list) = match constraint {
        NamespaceConstraint::Any => return "any NS".to_string(),
        NamespaceConstraint::Not(list) => (String::from("not NS: "), list),
        NamespaceConstraint::Enumeration(list) => (String::from("NS: "), list),
    };
    let mut absent = false;
    for namespace in list {
        match namespace {
            Some(namespace) => {
                summary.push_str(namespace);
                summary.push(' ');
            }
            None if !absent => {
                summary.push_str("[absent] ");
                absent = true;
            }
            None => {}
        }
    }
    summary
}

/// The documentation lines of all annotations, in document order.
fn documentation(annotations: &[Annotation]) -> Vec<String> {
    annotations
        .iter()
        .flat_map(|annotation| annotation.documentation().iter().cloned())
        .collect()
}
