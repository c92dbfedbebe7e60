//! Error codes for all front-end diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the phase that produced it.

use std::fmt;

/// Error codes for all front-end diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E9xxx: Internal errors (grammar construction bugs)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Unterminated block comment
    E0003,
    /// Unterminated or empty character literal
    E0004,

    // Parser Errors (E1xxx)
    /// Unexpected token; expected one of a set
    E1001,
    /// Missing syntax, recovered by inserting nothing
    E1002,
    /// Malformed input skipped up to a synchronization point
    E1003,
    /// Structurally valid match rejected by a contextual check
    E1004,

    // Internal Errors (E9xxx)
    /// Grammar construction error (zero-progress repetition)
    E9001,
}

impl ErrorCode {
    /// Every error code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E9001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line explanation, shown by `purist explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character in source",
            ErrorCode::E0003 => "unterminated block comment",
            ErrorCode::E0004 => "invalid character literal",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "missing syntax",
            ErrorCode::E1003 => "malformed input was skipped",
            ErrorCode::E1004 => "construct not allowed here",
            ErrorCode::E9001 => "grammar construction error",
        }
    }

    /// Check if this is a lexer error (E0xxx range).
    pub fn is_lexer_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E0001 | ErrorCode::E0002 | ErrorCode::E0003 | ErrorCode::E0004
        )
    }

    /// Check if this is a parser error (E1xxx range).
    pub fn is_parser_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003 | ErrorCode::E1004
        )
    }

    /// Check if this is an internal error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E1001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
