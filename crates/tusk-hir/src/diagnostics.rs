//! Diagnostic types for syntax and semantic findings.

use text_size::TextRange;
use tusk_syntax::ParseError;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticSeverity {
    /// Error.
    Error,
    /// Warning.
    Warning,
    /// Informational message.
    Info,
    /// Style hint.
    Hint,
}

/// A diagnostic attached to a source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the finding.
    pub severity: DiagnosticSeverity,
    /// The source range the diagnostic covers.
    pub range: TextRange,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            range,
            message: message.into(),
        }
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(error: &ParseError) -> Self {
        Self::error(error.range, error.message.clone())
    }
}
