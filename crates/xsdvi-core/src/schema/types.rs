//! Simple and complex type definitions.

use crate::schema::{AttributeUse, Particle, TypeId, Wildcard};

/// Whether a type definition is simple or complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Simple,
    Complex,
}

/// A simple type definition: built-in, named or anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleTypeDefinition {
    name: Option<String>,
    namespace: Option<String>,
    base: Option<TypeId>,
}

impl SimpleTypeDefinition {
    pub fn new(name: Option<String>, namespace: Option<String>, base: Option<TypeId>) -> Self {
        Self {
            name,
            namespace,
            base,
        }
    }
}

/// A complex type definition with its effective content model.
///
/// For types derived by extension the loader stores the effective content:
/// the base content followed by the type's own content, and the union of
/// both attribute use lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexTypeDefinition {
    name: Option<String>,
    namespace: Option<String>,
    base: Option<TypeId>,
    particle: Option<Particle>,
    attribute_uses: Vec<AttributeUse>,
    attribute_wildcard: Option<Wildcard>,
}

impl ComplexTypeDefinition {
    pub fn new(name: Option<String>, namespace: Option<String>) -> Self {
        Self {
            name,
            namespace,
            base: None,
            particle: None,
            attribute_uses: Vec::new(),
            attribute_wildcard: None,
        }
    }

    /// Sets the base type (builder style).
    pub fn with_base(mut self, base: Option<TypeId>) -> Self {
        self.base = base;
        self
    }

    /// Sets the content particle (builder style).
    pub fn with_particle(mut self, particle: Option<Particle>) -> Self {
        self.particle = particle;
        self
    }

    /// Sets the attribute uses (builder style).
    pub fn with_attribute_uses(mut self, attribute_uses: Vec<AttributeUse>) -> Self {
        self.attribute_uses = attribute_uses;
        self
    }

    /// Sets the attribute wildcard (builder style).
    pub fn with_attribute_wildcard(mut self, wildcard: Option<Wildcard>) -> Self {
        self.attribute_wildcard = wildcard;
        self
    }

    /// The content particle, absent for empty and simple content.
    pub fn particle(&self) -> Option<&Particle> {
        self.particle.as_ref()
    }

    pub fn attribute_uses(&self) -> &[AttributeUse] {
        &self.attribute_uses
    }

    pub fn attribute_wildcard(&self) -> Option<&Wildcard> {
        self.attribute_wildcard.as_ref()
    }
}

/// A type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefinition {
    Simple(SimpleTypeDefinition),
    Complex(ComplexTypeDefinition),
}

impl TypeDefinition {
    /// The type's local name, `None` for anonymous types.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Simple(def) => def.name.as_deref(),
            Self::Complex(def) => def.name.as_deref(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Simple(def) => def.namespace.as_deref(),
            Self::Complex(def) => def.namespace.as_deref(),
        }
    }

    /// The base type definition, if any.
    pub fn base_type(&self) -> Option<TypeId> {
        match self {
            Self::Simple(def) => def.base,
            Self::Complex(def) => def.base,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.name().is_none()
    }

    pub fn category(&self) -> TypeCategory {
        match self {
            Self::Simple(_) => TypeCategory::Simple,
            Self::Complex(_) => TypeCategory::Complex,
        }
    }

    /// Returns the complex definition, or `None` for simple types.
    pub fn as_complex(&self) -> Option<&ComplexTypeDefinition> {
        match self {
            Self::Complex(def) => Some(def),
            Self::Simple(_) => None,
        }
    }
}
