//! Error codes for loader diagnostics.
//!
//! Codes are organized by phase:
//! - `E0xx` - Document errors (fatal)
//! - `E1xx` - Reference resolution errors
//! - `E2xx` - Structural errors
//! - `E3xx` - Skipped content (warnings)

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E0xx)
    // =========================================================================
    /// Malformed XML.
    ///
    /// The document is not well-formed XML.
    E001,

    /// Not a schema document.
    ///
    /// The root element is not `xs:schema` in the XML Schema namespace.
    E002,

    /// Unreadable schema file.
    ///
    /// A schema file, or a document it includes, could not be read.
    E003,

    // =========================================================================
    // Reference Errors (E1xx)
    // =========================================================================
    /// Undefined type reference.
    ///
    /// A `type` or `base` attribute names a type that is not defined.
    /// The `anyType` (or `anySimpleType`) built-in is used instead.
    E100,

    /// Undefined element reference.
    ///
    /// A `ref` or `substitutionGroup` attribute names an element that is not
    /// declared at top level.
    E101,

    /// Undefined attribute reference.
    E102,

    /// Undefined model group reference.
    E103,

    /// Undefined attribute group reference.
    E104,

    /// Unknown namespace prefix.
    ///
    /// A qualified name uses a prefix with no namespace declaration in scope.
    E105,

    // =========================================================================
    // Structural Errors (E2xx)
    // =========================================================================
    /// Duplicate global definition.
    ///
    /// Two top-level components of the same kind share a name.
    E200,

    /// Circular type derivation.
    ///
    /// A complex type extends or restricts itself, directly or transitively.
    E201,

    /// Circular group definition.
    ///
    /// A model group or attribute group refers to itself, directly or
    /// transitively.
    E202,

    /// Invalid occurrence value.
    ///
    /// `minOccurs`/`maxOccurs` is not a non-negative integer (or `unbounded`).
    E203,

    /// Missing required attribute.
    ///
    /// A schema component lacks an attribute it cannot do without, such as
    /// an element with neither `name` nor `ref`.
    E204,

    // =========================================================================
    // Skipped Content (E3xx)
    // =========================================================================
    /// Unsupported schema construct.
    ///
    /// The construct is not visualized and was skipped.
    E300,

    /// Unresolvable schema location.
    ///
    /// An `xs:import` or `xs:include` was not followed.
    E301,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Document errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            // Reference errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            // Structural errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            // Skipped content
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed XML",
            ErrorCode::E002 => "not a schema document",
            ErrorCode::E003 => "unreadable schema file",
            ErrorCode::E100 => "undefined type",
            ErrorCode::E101 => "undefined element",
            ErrorCode::E102 => "undefined attribute",
            ErrorCode::E103 => "undefined model group",
            ErrorCode::E104 => "undefined attribute group",
            ErrorCode::E105 => "unknown namespace prefix",
            ErrorCode::E200 => "duplicate global definition",
            ErrorCode::E201 => "circular type derivation",
            ErrorCode::E202 => "circular group definition",
            ErrorCode::E203 => "invalid occurrence value",
            ErrorCode::E204 => "missing required attribute",
            ErrorCode::E300 => "unsupported schema construct",
            ErrorCode::E301 => "unresolvable schema location",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E105.to_string(), "E105");
        assert_eq!(ErrorCode::E301.to_string(), "E301");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E002.description(), "not a schema document");
        assert_eq!(ErrorCode::E201.description(), "circular type derivation");
    }
}
