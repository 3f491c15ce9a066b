//! The XML Schema component graph.
//!
//! A [`SchemaModel`] is an arena of schema components produced by a loader
//! (see the `xsdvi-parser` crate) and consumed read-only by the diagram
//! pipeline. Components refer to each other through copyable ids, so the
//! graph may contain cycles (a type whose content refers back to the element
//! declaring it) without any reference counting.
//!
//! Two declarations with the same name are still different components: the
//! identity of a declaration is its id, never its name.
//!
//! # Example
//!
//! ```
//! # use xsdvi_core::schema::{
//! #     ComplexTypeDefinition, ElementDeclaration, SchemaModel, TypeDefinition,
//! # };
//! let mut model = SchemaModel::new(Some("urn:orders".to_string()));
//! let order_type = model.add_type(TypeDefinition::Complex(
//!     ComplexTypeDefinition::new(Some("OrderType".to_string()), Some("urn:orders".to_string())),
//! ));
//! model.register_global_type(order_type);
//!
//! let order = model.add_element(ElementDeclaration::new(
//!     "Order",
//!     Some("urn:orders".to_string()),
//!     order_type,
//! ));
//! model.register_global_element(order);
//!
//! assert_eq!(model.find_element("Order"), Some(order));
//! assert_eq!(model.root_names(&[xsdvi_core::schema::ComponentKind::ElementDeclaration]), vec!["Order"]);
//! ```

mod annotation;
mod attribute;
mod element;
mod particle;
mod types;

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

pub use annotation::Annotation;
pub use attribute::{AttributeDeclaration, AttributeUse, ValueConstraint};
pub use element::{ConstraintCategory, ElementDeclaration, IdentityConstraint};
pub use particle::{
    Compositor, MaxOccurs, ModelGroup, NamespaceConstraint, Particle, ProcessContents, Term,
    Wildcard,
};
pub use types::{ComplexTypeDefinition, SimpleTypeDefinition, TypeCategory, TypeDefinition};

/// Identifies an element declaration inside a [`SchemaModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// Identifies a type definition inside a [`SchemaModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

/// Identifies a model group inside a [`SchemaModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelGroupId(usize);

/// The kinds of top-level components that may act as diagram roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ComponentKind {
    /// Top-level element declarations.
    #[serde(rename = "element")]
    ElementDeclaration,
    /// Top-level type definitions.
    #[serde(rename = "type")]
    TypeDefinition,
}

/// Error returned when parsing an unknown [`ComponentKind`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid root type: {0} (expected `element` or `type`)")]
pub struct UnknownComponentKind(String);

impl FromStr for ComponentKind {
    type Err = UnknownComponentKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "element" => Ok(Self::ElementDeclaration),
            "type" => Ok(Self::TypeDefinition),
            _ => Err(UnknownComponentKind(s.to_string())),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElementDeclaration => write!(f, "element"),
            Self::TypeDefinition => write!(f, "type"),
        }
    }
}

/// An arena-backed, fully resolved schema component graph.
#[derive(Debug, Clone, Default)]
pub struct SchemaModel {
    target_namespace: Option<String>,
    elements: Vec<ElementDeclaration>,
    types: Vec<TypeDefinition>,
    model_groups: Vec<ModelGroup>,
    global_elements: Vec<ElementId>,
    global_types: Vec<TypeId>,
}

impl SchemaModel {
    /// Creates an empty model for a schema with the given target namespace.
    pub fn new(target_namespace: Option<String>) -> Self {
        Self {
            target_namespace,
            ..Self::default()
        }
    }

    /// Returns the target namespace of the main schema document.
    pub fn target_namespace(&self) -> Option<&str> {
        self.target_namespace.as_deref()
    }

    /// Returns the element declaration with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not issued by this model.
    pub fn element(&self, id: ElementId) -> &ElementDeclaration {
        &self.elements[id.0]
    }

    /// Returns the type definition with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not issued by this model.
    pub fn type_definition(&self, id: TypeId) -> &TypeDefinition {
        &self.types[id.0]
    }

    /// Returns the model group with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not issued by this model.
    pub fn model_group(&self, id: ModelGroupId) -> &ModelGroup {
        &self.model_groups[id.0]
    }

    /// Top-level element declarations, in document order.
    pub fn element_declarations(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.global_elements.iter().copied()
    }

    /// Top-level named type definitions, in document order. Built-in types are not listed.
    pub fn type_definitions(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.global_types.iter().copied()
    }

    /// Top-level complex type definitions, in document order.
    pub fn complex_type_definitions(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.type_definitions()
            .filter(|id| self.type_definition(*id).category() == TypeCategory::Complex)
    }

    /// Finds a top-level element declaration by local name.
    pub fn find_element(&self, name: &str) -> Option<ElementId> {
        self.element_declarations()
            .find(|id| self.element(*id).name() == name)
    }

    /// Finds a top-level type definition by local name.
    pub fn find_type(&self, name: &str) -> Option<TypeId> {
        self.type_definitions()
            .find(|id| self.type_definition(*id).name() == Some(name))
    }

    /// Returns the names of all top-level components of the requested kinds.
    ///
    /// Names are grouped by kind in the order the kinds are given, and keep
    /// document order within each kind.
    pub fn root_names(&self, kinds: &[ComponentKind]) -> Vec<String> {
        let mut names = Vec::new();
        for kind in kinds {
            match kind {
                ComponentKind::ElementDeclaration => names.extend(
                    self.element_declarations()
                        .map(|id| self.element(id).name().to_string()),
                ),
                ComponentKind::TypeDefinition => names.extend(
                    self.type_definitions()
                        .filter_map(|id| self.type_definition(id).name().map(str::to_string)),
                ),
            }
        }
        names
    }

    /// Adds an element declaration to the arena and returns its id.
    pub fn add_element(&mut self, element: ElementDeclaration) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    /// Returns a mutable element declaration, for loaders filling in placeholders.
    pub fn element_mut(&mut self, id: ElementId) -> &mut ElementDeclaration {
        &mut self.elements[id.0]
    }

    /// Adds a type definition to the arena and returns its id.
    pub fn add_type(&mut self, definition: TypeDefinition) -> TypeId {
        self.types.push(definition);
        TypeId(self.types.len() - 1)
    }

    /// Replaces a type definition, for loaders filling in placeholders.
    pub fn set_type_definition(&mut self, id: TypeId, definition: TypeDefinition) {
        self.types[id.0] = definition;
    }

    /// Adds a model group to the arena and returns its id.
    pub fn add_model_group(&mut self, group: ModelGroup) -> ModelGroupId {
        self.model_groups.push(group);
        ModelGroupId(self.model_groups.len() - 1)
    }

    /// Replaces a model group, for loaders filling in placeholders.
    pub fn set_model_group(&mut self, id: ModelGroupId, group: ModelGroup) {
        self.model_groups[id.0] = group;
    }

    /// Lists an element declaration as a top-level component.
    pub fn register_global_element(&mut self, id: ElementId) {
        self.global_elements.push(id);
    }

    /// Lists a type definition as a top-level component.
    pub fn register_global_type(&mut self, id: TypeId) {
        self.global_types.push(id);
    }
}
