//! The core diagnostic type of the loader.

use std::fmt;

use crate::{
    error::{ErrorCode, Label, Severity},
    span::Span,
};

/// A diagnostic message with source location information.
///
/// Labels refer to byte ranges of the schema document the loader was
/// started on, unless [`Diagnostic::document`] names an included or
/// imported document instead.
///
/// # Example
///
/// ```text
/// error[E100]: type `OrderType` is not defined
///   --> order.xsd:4:3
///    |
///  4 |   <xs:element name="Order" type="OrderType"/>
///    |   ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ referenced here
///    |
///    = help: declare the type or import the schema defining it
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
    document: Option<String>,
}

impl Diagnostic {
    /// Create a fatal diagnostic.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, message)
    }

    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Name of the included or imported document the labels refer to,
    /// `None` for the document loading started from.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(self, span: Span, message: impl Into<String>) -> Self {
        self.attach(Label::primary(span, message))
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(self, span: Span, message: impl Into<String>) -> Self {
        self.attach(Label::secondary(span, message))
    }

    /// Add a prepared label, such as [`Label::reference`].
    pub fn attach(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Set the document the labels refer to.
    pub fn in_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
            document: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E100]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(document) = &self.document {
            write!(f, " (in `{document}`)")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}
