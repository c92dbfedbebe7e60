//! Core diagnostic types for structured error reporting.
//!
//! Defines [`Diagnostic`], [`Label`], and [`Severity`], the values the lexer
//! and parser hand back alongside their output. Diagnostics are data: they
//! are returned with the tree, never written to a shared log.

use purist_ir::{format_name_list, Span};
use std::fmt;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A labeled span with a message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    /// Whether this is the primary error location.
    pub is_primary: bool,
}

impl Label {
    /// Create a primary label (the main error location).
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a secondary label (related context).
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A diagnostic with everything needed to render it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Get the primary span (first primary label's span).
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {} {:?}: {}", marker, label.span, label.message)?;
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        Ok(())
    }
}

/// Create an "expected one of" diagnostic.
///
/// `expected` is the list of human-readable descriptions of what could have
/// appeared at `span`; it is rendered in the given order.
pub fn unexpected_token<S: AsRef<str>>(span: Span, expected: &[S], found: &str) -> Diagnostic {
    let expected = format_name_list(expected);
    Diagnostic::error(ErrorCode::E1001)
        .with_message(format!("unexpected {found}, expected {expected}"))
        .with_label(span, format!("expected {expected}"))
}

/// Create a "missing syntax" diagnostic, reported where recovery inserted nothing.
pub fn missing_syntax<S: AsRef<str>>(span: Span, message: &str, expected: &[S]) -> Diagnostic {
    let diag = Diagnostic::error(ErrorCode::E1002)
        .with_message(message.to_string())
        .with_label(span, message.to_string());
    if expected.is_empty() {
        diag
    } else {
        diag.with_note(format!("expected {}", format_name_list(expected)))
    }
}

/// Create a "skipped input" diagnostic covering the tokens recovery discarded.
pub fn skipped_input(span: Span, message: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1003)
        .with_message(message.to_string())
        .with_label(span, "skipped while recovering")
}

/// Create a grammar construction diagnostic (a bug in the grammar, not the input).
pub fn grammar_error(span: Span, message: impl Into<String>) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9001)
        .with_message(message)
        .with_label(span, "while parsing here")
}
