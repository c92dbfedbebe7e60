//! Committed-choice parser combinators for the Purist front end.
//!
//! A grammar is a graph of immutable [`Parser`] values. [`parse`] runs an
//! entry parser over a layout token stream and always returns a complete,
//! lossless [`SyntaxTree`] plus the diagnostics recorded along the way.
//!
//! # Architecture
//!
//! - [`cursor`]: significant-token cursor over the layout stream
//! - [`context`]: transactions, markers and the attempt flag
//! - [`combinator`]: grammar nodes, FIRST sets, dispatch tables, evaluation
//! - [`outcome`]: failures as values, merged by furthest position
//! - `recovery`: `relax` and `relax_to`
//! - [`tree`]: event replay into the syntax tree
//!
//! # Commitment
//!
//! A choice commits to the first alternative that succeeds or consumes a
//! token. Backtracking past consumed input only happens inside an explicit
//! [`Parser::attempt`] (or [`Parser::heal`]), so parse time stays linear in
//! grammar size times input size.

pub mod combinator;
pub mod context;
pub mod cursor;
mod event;
pub mod outcome;
mod progress;
mod recovery;
pub mod tree;

pub use combinator::{
    braces, capture, choice, continuation, fold, literal, lookahead, parens, reference, seq,
    sequence, squares, succeed, token, FirstSet, Parser, DISPATCH_THRESHOLD,
};
pub use context::{CompletedMarker, Marker, ParseContext, Transaction};
pub use outcome::{FailureMessage, ParseOutcome};
pub use progress::Progress;
pub use tree::{SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree};

use purist_diagnostic::{unexpected_token, Diagnostic};
use purist_ir::{Span, SyntaxKind, TokenKind};
use purist_layout::LayoutToken;

/// Result of a parse: always a tree, plus zero or more diagnostics.
#[derive(Clone, Debug)]
pub struct Parse {
    pub tree: SyntaxTree,
    pub diagnostics: Vec<Diagnostic>,
}

impl Parse {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parse `tokens` (the layout output for `source`) with `entry`.
///
/// The tree's root is a `Root` node holding the entry's node and, if the
/// entry stopped early, an `Error` node with the unconsumed input.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(entry: &Parser, source: &str, tokens: &[LayoutToken]) -> Parse {
    let mut ctx = ParseContext::new(source, tokens);
    let root = ctx.mark();

    let outcome = entry.parse(&mut ctx);
    if outcome.is_failure() {
        let diagnostic = failure_diagnostic(&ctx, &outcome);
        ctx.error(diagnostic);
    }

    if !ctx.eof() {
        if outcome.is_success() {
            let diagnostic = leftover_diagnostic(&ctx, &outcome);
            ctx.error(diagnostic);
        }
        let leftover = ctx.mark();
        while !ctx.eof() {
            ctx.advance();
        }
        leftover.complete(&mut ctx, SyntaxKind::Error);
    }
    root.complete(&mut ctx, SyntaxKind::Root);
    debug_assert_eq!(ctx.open_transactions(), 0);

    let (cursor, events) = ctx.finish();
    let (root, diagnostics) = tree::build(events, &cursor);
    tracing::debug!(
        significant = cursor.len(),
        diagnostics = diagnostics.len(),
        "parse finished"
    );
    Parse {
        tree: SyntaxTree::new(root, source),
        diagnostics,
    }
}

fn span_at(ctx: &ParseContext<'_>, pos: usize) -> Span {
    let cursor = ctx.cursor();
    cursor
        .get(pos)
        .map_or_else(|| Span::point(cursor.end_offset()), LayoutToken::span)
}

/// How the token at `pos` reads in "unexpected ..." messages.
fn describe_at(ctx: &ParseContext<'_>, pos: usize) -> String {
    let cursor = ctx.cursor();
    match cursor.get(pos) {
        None => TokenKind::Eof.display_name().to_string(),
        Some(token) if token.is_virtual() => token.kind().display_name().to_string(),
        Some(token) => format!("`{}`", token.text(cursor.source())),
    }
}

fn failure_diagnostic(ctx: &ParseContext<'_>, outcome: &ParseOutcome) -> Diagnostic {
    let span = span_at(ctx, outcome.position);
    let expected = outcome.expected_descriptions();
    match &outcome.message {
        Some(message) => {
            let diagnostic = Diagnostic::error(message.code)
                .with_message(&*message.text)
                .with_label(span, &*message.text);
            if expected.is_empty() {
                diagnostic
            } else {
                diagnostic.with_note(format!(
                    "expected {}",
                    purist_ir::format_name_list(&expected)
                ))
            }
        }
        None => unexpected_token(span, &expected, &describe_at(ctx, outcome.position)),
    }
}

fn leftover_diagnostic(ctx: &ParseContext<'_>, outcome: &ParseOutcome) -> Diagnostic {
    let pos = ctx.position();
    let mut expected: Vec<&str> = if outcome.position == pos {
        outcome.expected_descriptions()
    } else {
        Vec::new()
    };
    expected.push(TokenKind::Eof.display_name());
    expected.sort_unstable();
    expected.dedup();
    unexpected_token(span_at(ctx, pos), &expected, &describe_at(ctx, pos))
}
