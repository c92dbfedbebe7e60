//! Lossless tokenizer for Purist source text.
//!
//! [`lex`] turns source text into a flat [`RawToken`] sequence that covers
//! every byte of the input: whitespace, newlines, and comments are tokens
//! too. The layout pass skips trivia when it reasons about indentation, and
//! the tree builder reattaches it so the syntax tree round-trips the source.
//!
//! Lexing never fails. Malformed input becomes an [`TokenKind::Unknown`]
//! token (or a best-effort literal) plus a diagnostic.

mod cursor;
mod lex_error;
mod scanner;

pub use lex_error::LexErrorKind;

use purist_diagnostic::Diagnostic;
use purist_ir::{RawToken, SourcePos, TokenKind};
use scanner::Scanner;
use tracing::debug;

/// Tokens and lexical diagnostics for one source file.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    pub tokens: Vec<RawToken>,
    pub diagnostics: Vec<Diagnostic>,
    /// Position just past the last character.
    pub eof: SourcePos,
}

impl LexOutput {
    /// Tokens the layout pass and parser look at.
    pub fn significant(&self) -> impl Iterator<Item = &RawToken> {
        self.tokens.iter().filter(|t| !t.kind.is_trivia())
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Tokenize `source`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> LexOutput {
    let mut scanner = Scanner::new(source);
    let mut output = LexOutput::default();

    while let Some(scanned) = scanner.next_token() {
        let token = RawToken::new(scanned.kind, scanned.start, scanner.pos());
        if let Some(error) = scanned.error {
            output.diagnostics.push(error.into_diagnostic(token.span));
        }
        output.tokens.push(token);
    }
    output.eof = scanner.pos();

    debug!(
        tokens = output.tokens.len(),
        errors = output.diagnostics.len(),
        "lexed"
    );
    output
}

/// Kinds of all tokens, handy for tests and the `lex` command.
pub fn token_kinds(source: &str) -> Vec<TokenKind> {
    lex(source).tokens.iter().map(|t| t.kind).collect()
}
