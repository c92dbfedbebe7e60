//! Diagnostic system for the Purist front end.
//!
//! Every diagnostic carries:
//! - An error code for searchability
//! - A clear message (what went wrong)
//! - A primary span (where it went wrong)
//! - Optional notes (what was expected instead)
//!
//! Diagnostics are plain values returned with the lexer and parser output.
//! Rendering happens at the edge, through an [`emitter::DiagnosticEmitter`].

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{
    grammar_error, missing_syntax, skipped_input, unexpected_token, Diagnostic, Label, Severity,
};
pub use error_code::ErrorCode;
