//! Lexical problems and their diagnostics.

use purist_diagnostic::{Diagnostic, ErrorCode};
use purist_ir::Span;

/// What went wrong inside a single token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    UnterminatedString,
    InvalidCharacter(char),
    UnterminatedBlockComment,
    InvalidCharLiteral,
}

impl LexErrorKind {
    pub fn into_diagnostic(self, span: Span) -> Diagnostic {
        match self {
            LexErrorKind::UnterminatedString => Diagnostic::error(ErrorCode::E0001)
                .with_message("unterminated string literal")
                .with_label(span, "string starts here and is never closed"),
            LexErrorKind::InvalidCharacter(c) => Diagnostic::error(ErrorCode::E0002)
                .with_message(format!("invalid character `{}`", c.escape_default()))
                .with_label(span, "not valid here"),
            LexErrorKind::UnterminatedBlockComment => Diagnostic::error(ErrorCode::E0003)
                .with_message("unterminated block comment")
                .with_label(span, "comment starts here")
                .with_note("block comments are closed with `-}`"),
            LexErrorKind::InvalidCharLiteral => Diagnostic::error(ErrorCode::E0004)
                .with_message("invalid character literal")
                .with_label(span, "expected exactly one character between `'` quotes"),
        }
    }
}
