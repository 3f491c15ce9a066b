//! Collector for accumulating diagnostics while loading a schema.

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics so loading can report every problem at once.
///
/// # Example
///
/// ```text
/// let mut collector = DiagnosticCollector::new();
/// collector.emit(Diagnostic::warning("skipped `xs:notation`"));
/// collector.emit(Diagnostic::error("type `A` is not defined"));
///
/// // Non-fatal diagnostics are handed back with the result.
/// let diagnostics = collector.finish()?;
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_fatal: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_fatal() {
            self.has_fatal = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` once a fatal diagnostic was emitted.
    pub fn has_fatal(&self) -> bool {
        self.has_fatal
    }

    /// Finish collection.
    ///
    /// - With a fatal diagnostic, returns `Err(ParseError)` with all diagnostics.
    /// - Otherwise returns the warnings and errors in emission order.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_fatal {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
