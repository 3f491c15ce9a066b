//! Particles, model groups and wildcards: the building blocks of content models.

use crate::schema::{Annotation, ElementId, ModelGroupId};

/// The upper occurrence bound of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxOccurs {
    Bounded(u32),
    Unbounded,
}

impl Default for MaxOccurs {
    fn default() -> Self {
        Self::Bounded(1)
    }
}

/// The term held by a particle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    ModelGroup(ModelGroupId),
    Element(ElementId),
    Wildcard(Wildcard),
}

/// An occurrence-range-annotated slot in a content model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Particle {
    min_occurs: u32,
    max_occurs: MaxOccurs,
    term: Term,
}

impl Particle {
    pub fn new(min_occurs: u32, max_occurs: MaxOccurs, term: Term) -> Self {
        Self {
            min_occurs,
            max_occurs,
            term,
        }
    }

    /// A particle occurring exactly once.
    pub fn once(term: Term) -> Self {
        Self::new(1, MaxOccurs::Bounded(1), term)
    }

    pub fn min_occurs(&self) -> u32 {
        self.min_occurs
    }

    pub fn max_occurs(&self) -> MaxOccurs {
        self.max_occurs
    }

    pub fn term(&self) -> &Term {
        &self.term
    }
}

/// How the particles of a model group combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compositor {
    Sequence,
    Choice,
    All,
}

/// A model group: a compositor over an ordered list of particles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelGroup {
    compositor: Compositor,
    particles: Vec<Particle>,
    annotations: Vec<Annotation>,
}

impl ModelGroup {
    pub fn new(compositor: Compositor, particles: Vec<Particle>) -> Self {
        Self {
            compositor,
            particles,
            annotations: Vec::new(),
        }
    }

    /// Sets the annotations (builder style).
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn compositor(&self) -> Compositor {
        self.compositor
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// The namespace constraint of a wildcard.
///
/// List entries of `None` stand for "absent", i.e. no namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceConstraint {
    /// `##any`
    Any,
    /// Any namespace except the listed ones (`##other`).
    Not(Vec<Option<String>>),
    /// Exactly the listed namespaces.
    Enumeration(Vec<Option<String>>),
}

/// How strictly a wildcard's matched content is validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProcessContents {
    #[default]
    Strict,
    Lax,
    Skip,
}

/// An element or attribute wildcard (`xs:any`, `xs:anyAttribute`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wildcard {
    constraint: NamespaceConstraint,
    process_contents: ProcessContents,
    annotations: Vec<Annotation>,
}

impl Wildcard {
    pub fn new(constraint: NamespaceConstraint, process_contents: ProcessContents) -> Self {
        Self {
            constraint,
            process_contents,
            annotations: Vec::new(),
        }
    }

    /// Sets the annotations (builder style).
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn constraint(&self) -> &NamespaceConstraint {
        &self.constraint
    }

    pub fn process_contents(&self) -> ProcessContents {
        self.process_contents
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
