//! The ParseError type returned when no schema model can be built.

use thiserror::Error;

use crate::error::Diagnostic;

/// Error type for schema loading.
///
/// Wraps every diagnostic collected before loading had to stop, at least
/// one of which is fatal.
#[derive(Debug, Error)]
#[error("{}", summary(.diagnostics))]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Create a new parse error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Leads with the diagnostic that stopped the load.
fn summary(diagnostics: &[Diagnostic]) -> String {
    let first = diagnostics
        .iter()
        .find(|d| d.severity().is_fatal())
        .or_else(|| diagnostics.first());
    match first {
        Some(first) if diagnostics.len() > 1 => {
            format!("{first} (+{} more)", diagnostics.len() - 1)
        }
        Some(first) => first.to_string(),
        None => String::new(),
    }
}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}
