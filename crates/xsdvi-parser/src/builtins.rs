//! Built-in XML Schema types.

use indexmap::IndexMap;

use xsdvi_core::schema::{
    ComplexTypeDefinition, Compositor, MaxOccurs, ModelGroup, NamespaceConstraint, Particle,
    ProcessContents, SchemaModel, SimpleTypeDefinition, Term, TypeDefinition, TypeId, Wildcard,
};

use crate::xsd::XSD_NAMESPACE;

/// Built-in simple types derived from `anySimpleType`, each listed with its
/// base. Bases always appear before the types derived from them.
const SIMPLE_TYPES: &[(&str, &str)] = &[
    ("string", "anySimpleType"),
    ("boolean", "anySimpleType"),
    ("decimal", "anySimpleType"),
    ("float", "anySimpleType"),
    ("double", "anySimpleType"),
    ("duration", "anySimpleType"),
    ("dateTime", "anySimpleType"),
    ("time", "anySimpleType"),
    ("date", "anySimpleType"),
    ("gYearMonth", "anySimpleType"),
    ("gYear", "anySimpleType"),
    ("gMonthDay", "anySimpleType"),
    ("gDay", "anySimpleType"),
    ("gMonth", "anySimpleType"),
    ("hexBinary", "anySimpleType"),
    ("base64Binary", "anySimpleType"),
    ("anyURI", "anySimpleType"),
    ("QName", "anySimpleType"),
    ("NOTATION", "anySimpleType"),
    ("normalizedString", "string"),
    ("token", "normalizedString"),
    ("language", "token"),
    ("NMTOKEN", "token"),
    ("NMTOKENS", "anySimpleType"),
    ("Name", "token"),
    ("NCName", "Name"),
    ("ID", "NCName"),
    ("IDREF", "NCName"),
    ("IDREFS", "anySimpleType"),
    ("ENTITY", "NCName"),
    ("ENTITIES", "anySimpleType"),
    ("integer", "decimal"),
    ("nonPositiveInteger", "integer"),
    ("negativeInteger", "nonPositiveInteger"),
    ("long", "integer"),
    ("int", "long"),
    ("short", "int"),
    ("byte", "short"),
    ("nonNegativeInteger", "integer"),
    ("unsignedLong", "nonNegativeInteger"),
    ("unsignedInt", "unsignedLong"),
    ("unsignedShort", "unsignedInt"),
    ("unsignedByte", "unsignedShort"),
    ("positiveInteger", "nonNegativeInteger"),
    ("dateTimeStamp", "dateTime"),
    ("dayTimeDuration", "duration"),
    ("yearMonthDuration", "duration"),
];

/// Ids of the built-in types a loader needs directly.
#[derive(Debug, Clone)]
pub(crate) struct Builtins {
    pub any_type: TypeId,
    pub any_simple_type: TypeId,
    /// Every built-in type, by local name.
    pub by_name: IndexMap<String, TypeId>,
}

impl Builtins {
    /// Adds the built-in types to `model`. They are not listed as top-level
    /// components of the schema.
    pub fn register(model: &mut SchemaModel) -> Self {
        let namespace = Some(XSD_NAMESPACE.to_string());
        let mut by_name = IndexMap::new();

        // anyType accepts any content: a lax wildcard sequence plus a lax
        // attribute wildcard.
        let any_content = model.add_model_group(ModelGroup::new(
            Compositor::Sequence,
            vec![Particle::new(
                0,
                MaxOccurs::Unbounded,
                Term::Wildcard(Wildcard::new(NamespaceConstraint::Any, ProcessContents::Lax)),
            )],
        ));
        let any_type = model.add_type(TypeDefinition::Complex(
            ComplexTypeDefinition::new(Some("anyType".to_string()), namespace.clone())
                .with_particle(Some(Particle::once(Term::ModelGroup(any_content))))
                .with_attribute_wildcard(Some(Wildcard::new(
                    NamespaceConstraint::Any,
                    ProcessContents::Lax,
                ))),
        ));
        by_name.insert("anyType".to_string(), any_type);

        let any_simple_type = model.add_type(TypeDefinition::Simple(SimpleTypeDefinition::new(
            Some("anySimpleType".to_string()),
            namespace.clone(),
            Some(any_type),
        )));
        by_name.insert("anySimpleType".to_string(), any_simple_type);

        for (name, base) in SIMPLE_TYPES {
            let base = by_name.get(*base).copied();
            let id = model.add_type(TypeDefinition::Simple(SimpleTypeDefinition::new(
                Some((*name).to_string()),
                namespace.clone(),
                base,
            )));
            by_name.insert((*name).to_string(), id);
        }

        Self {
            any_type,
            any_simple_type,
            by_name,
        }
    }
}
