//! Attribute declarations and uses.

use crate::schema::{Annotation, TypeId};

/// An attribute declaration, either global or local to a complex type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDeclaration {
    name: String,
    namespace: Option<String>,
    type_id: TypeId,
}

impl AttributeDeclaration {
    pub fn new(name: impl Into<String>, namespace: Option<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            namespace,
            type_id,
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
}

/// A value constraint on an attribute use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueConstraint {
    /// `default="..."`
    Default(String),
    /// `fixed="..."`
    Fixed(String),
}

/// The use of an attribute declaration inside a complex type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeUse {
    declaration: AttributeDeclaration,
    required: bool,
    value_constraint: Option<ValueConstraint>,
    annotations: Vec<Annotation>,
}

impl AttributeUse {
    pub fn new(declaration: AttributeDeclaration, required: bool) -> Self {
        Self {
            declaration,
            required,
            value_constraint: None,
            annotations: Vec::new(),
        }
    }

    /// Sets the value constraint (builder style).
    pub fn with_value_constraint(mut self, constraint: Option<ValueConstraint>) -> Self {
        self.value_constraint = constraint;
        self
    }

    /// Sets the annotations (builder style).
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn declaration(&self) -> &AttributeDeclaration {
        &self.declaration
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn value_constraint(&self) -> Option<&ValueConstraint> {
        self.value_constraint.as_ref()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
