//! The diagnostic record itself.

use crate::code::DiagnosticCode;
use crate::label::Label;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use strobe_source::Span;

/// A single reported problem or advisory.
///
/// The message is already formatted (type names and identifiers are spliced
/// in by the code that creates it); `labels` and `notes` add context.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How serious the problem is.
    pub severity: Severity,
    /// Stable code identifying the kind of problem.
    pub code: DiagnosticCode,
    /// Primary message.
    pub message: String,
    /// Where the problem was detected.
    pub primary_span: Span,
    /// Secondary annotated locations.
    pub labels: Vec<Label>,
    /// Trailing explanatory notes.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Creates a diagnostic with an explicit severity.
    pub fn new(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            primary_span: span,
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Creates an error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Error, code, message, span)
    }

    /// Creates a warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Warning, code, message, span)
    }

    /// Adds a label.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Returns `true` if this diagnostic has error severity.
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn error_constructor() {
        let code = DiagnosticCode::new(Category::Error, 301);
        let diag = Diagnostic::error(code, "delay value must be numeric", Span::DUMMY);
        assert!(diag.is_error());
        assert_eq!(diag.code.to_string(), "E301");
        assert!(diag.labels.is_empty());
    }

    #[test]
    fn warning_constructor() {
        let code = DiagnosticCode::new(Category::Warning, 300);
        let diag = Diagnostic::warning(code, "event expression is constant", Span::DUMMY);
        assert_eq!(diag.severity, Severity::Warning);
        assert!(!diag.is_error());
    }

    #[test]
    fn builder_methods_accumulate() {
        let code = DiagnosticCode::new(Category::Error, 307);
        let diag = Diagnostic::error(code, "repeat control requires an event", Span::DUMMY)
            .with_label(Label::secondary(Span::DUMMY, "repeat count here"))
            .with_note("only event controls can be repeated");
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.notes.len(), 1);
    }
}
