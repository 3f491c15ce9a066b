//! Severity levels for diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// A recoverable issue; the construct was skipped.
    Warning,

    /// A broken component. The loader substitutes or drops it and continues,
    /// so a best-effort model is still produced.
    Error,

    /// No model can be produced for the input.
    Fatal,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` for [`Severity::Warning`].
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    /// Returns `true` for [`Severity::Fatal`].
    pub fn is_fatal(&self) -> bool {
        matches!(self, Severity::Fatal)
    }

    /// The matching `log` level, for reporting diagnostics through the logger.
    pub fn log_level(&self) -> log::Level {
        match self {
            Severity::Warning => log::Level::Warn,
            Severity::Error | Severity::Fatal => log::Level::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}
