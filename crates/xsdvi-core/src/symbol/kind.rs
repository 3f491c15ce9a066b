//! Kind-specific symbol attributes.

use crate::schema::ProcessContents;

/// Attributes of an element box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSymbol {
    pub name: String,
    pub namespace: Option<String>,
    /// `"type: T"`, `"base: B"` or absent for anonymous complex types.
    pub type_ref: Option<String>,
    pub cardinality: Option<String>,
    pub nillable: bool,
    pub is_abstract: bool,
    /// Name of the substitution group head.
    pub substitution: Option<String>,
}

impl ElementSymbol {
    /// Comma-joined cardinality, substitution reference and flags.
    pub fn properties(&self) -> String {
        let mut properties = Vec::new();
        if let Some(cardinality) = &self.cardinality {
            properties.push(cardinality.clone());
        }
        if let Some(substitution) = &self.substitution {
            properties.push(format!("subst.: {substitution}"));
        }
        if self.nillable {
            properties.push("nillable: true".to_string());
        }
        if self.is_abstract {
            properties.push("abstract: true".to_string());
        }
        properties.join(", ")
    }
}

/// Attributes of an attribute box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSymbol {
    pub name: String,
    pub namespace: Option<String>,
    pub type_ref: Option<String>,
    pub required: bool,
    /// `"default: v"` or `"fixed: v"`.
    pub constraint: Option<String>,
}

impl AttributeSymbol {
    /// Comma-joined use and value constraint.
    pub fn properties(&self) -> String {
        let mut properties = vec![if self.required { "required" } else { "optional" }.to_string()];
        if let Some(constraint) = &self.constraint {
            properties.push(constraint.clone());
        }
        properties.join(", ")
    }
}

/// Attributes of an `any` / `anyAttribute` box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WildcardSymbol {
    /// Namespace-constraint summary such as `"any NS"` or `"NS: urn:a [absent]"`.
    pub namespace: Option<String>,
    pub process_contents: ProcessContents,
    /// Only element wildcards carry a cardinality.
    pub cardinality: Option<String>,
}

impl WildcardSymbol {
    /// Comma-joined process-contents mode and cardinality.
    pub fn properties(&self) -> String {
        let mode = match self.process_contents {
            ProcessContents::Strict => "strict",
            ProcessContents::Lax => "lax",
            ProcessContents::Skip => "skip",
        };
        match &self.cardinality {
            Some(cardinality) => format!("{mode}, {cardinality}"),
            None => mode.to_string(),
        }
    }
}

/// Attributes of a key, keyref or unique box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentitySymbol {
    pub name: String,
    pub namespace: Option<String>,
}
