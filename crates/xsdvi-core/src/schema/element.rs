//! Element declarations and their identity constraints.

use crate::schema::{Annotation, ElementId, TypeId};

/// The category of an identity constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintCategory {
    /// `xs:unique`
    Unique,
    /// `xs:key`
    Key,
    /// `xs:keyref`, with the local name of the key it refers to.
    Keyref { refer: String },
}

/// An identity constraint (`xs:unique`, `xs:key` or `xs:keyref`) scoped to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConstraint {
    category: ConstraintCategory,
    name: String,
    namespace: Option<String>,
    selector: String,
    fields: Vec<String>,
    annotations: Vec<Annotation>,
}

impl IdentityConstraint {
    pub fn new(
        category: ConstraintCategory,
        name: impl Into<String>,
        namespace: Option<String>,
        selector: impl Into<String>,
        fields: Vec<String>,
    ) -> Self {
        Self {
            category,
            name: name.into(),
            namespace,
            selector: selector.into(),
            fields,
            annotations: Vec::new(),
        }
    }

    /// Sets the annotations (builder style).
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn category(&self) -> &ConstraintCategory {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The selector XPath.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The field XPaths, in declared order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// An element declaration, global or local.
///
/// Global declarations referenced from several content models are one
/// component: every `ref` resolves to the same [`ElementId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDeclaration {
    name: String,
    namespace: Option<String>,
    type_id: TypeId,
    nillable: bool,
    is_abstract: bool,
    substitution_group: Option<ElementId>,
    identity_constraints: Vec<IdentityConstraint>,
    annotations: Vec<Annotation>,
}

impl ElementDeclaration {
    pub fn new(name: impl Into<String>, namespace: Option<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            namespace,
            type_id,
            nillable: false,
            is_abstract: false,
            substitution_group: None,
            identity_constraints: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn nillable(&self) -> bool {
        self.nillable
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// The head of the substitution group this element belongs to.
    pub fn substitution_group(&self) -> Option<ElementId> {
        self.substitution_group
    }

    pub fn identity_constraints(&self) -> &[IdentityConstraint] {
        &self.identity_constraints
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn set_type_id(&mut self, type_id: TypeId) {
        self.type_id = type_id;
    }

    pub fn set_nillable(&mut self, nillable: bool) {
        self.nillable = nillable;
    }

    pub fn set_abstract(&mut self, is_abstract: bool) {
        self.is_abstract = is_abstract;
    }

    pub fn set_substitution_group(&mut self, head: Option<ElementId>) {
        self.substitution_group = head;
    }

    pub fn set_identity_constraints(&mut self, constraints: Vec<IdentityConstraint>) {
        self.identity_constraints = constraints;
    }

    pub fn set_annotations(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
    }
}
