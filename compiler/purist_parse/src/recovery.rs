//! Error recovery.
//!
//! Two strategies on top of committed choice:
//! - `relax`: the child is missing. Record it and carry on as if it matched.
//! - `relax_to`: the child is malformed. Skip input up to a synchronization
//!   point inside an `Error` node and carry on.
//!
//! Neither recovers while the context is inside an `attempt`: a speculative
//! branch must fail cleanly so its caller can roll it back.

use purist_diagnostic::{missing_syntax, skipped_input};
use purist_ir::{Span, SyntaxKind, TokenKind};

use crate::context::ParseContext;
use crate::outcome::ParseOutcome;
use crate::Parser;

pub(crate) fn relax(child: &Parser, message: &str, ctx: &mut ParseContext<'_>) -> ParseOutcome {
    if ctx.in_attempt() {
        return child.parse(ctx);
    }
    let start = ctx.position();
    let tx = ctx.start();
    let outcome = child.parse(ctx);
    if outcome.is_success() {
        tx.commit(ctx);
        return outcome;
    }
    tx.rollback(ctx);

    let at = Span::point(ctx.current_span().start);
    tracing::trace!(position = start, message, "relax: inserting nothing");
    ctx.error(missing_syntax(at, message, child.expected_descriptions()));
    ParseOutcome::success(start)
}

pub(crate) fn relax_to(
    child: &Parser,
    sync: &Parser,
    message: &str,
    ctx: &mut ParseContext<'_>,
) -> ParseOutcome {
    if ctx.in_attempt() {
        return child.parse(ctx);
    }
    let start = ctx.position();
    let tx = ctx.start();
    let outcome = child.parse(ctx);
    if outcome.is_success() {
        tx.commit(ctx);
        return outcome;
    }
    tx.rollback(ctx);

    // An unmatched block end belongs to an enclosing block.
    if ctx.eof() || ctx.at(TokenKind::LayoutEnd) {
        let at = Span::point(ctx.current_span().start);
        ctx.error(skipped_input(at, message));
        return ParseOutcome::success(start);
    }

    let marker = ctx.mark();
    ctx.skip_token_tree();
    while !ctx.eof() && !ctx.at(TokenKind::LayoutEnd) && !sync_matches(sync, ctx) {
        ctx.skip_token_tree();
    }
    marker.complete(ctx, SyntaxKind::Error);

    let end = ctx.position();
    tracing::trace!(from = start, to = end, message, "relax_to: skipped input");
    ctx.error(skipped_input(ctx.span_between(start, end), message));
    ParseOutcome::success(end)
}

/// Whether `sync` would match here. Never consumes.
fn sync_matches(sync: &Parser, ctx: &mut ParseContext<'_>) -> bool {
    let tx = ctx.start();
    let was_in_attempt = ctx.set_in_attempt(true);
    let matched = sync.parse(ctx).is_success();
    ctx.set_in_attempt(was_in_attempt);
    tx.rollback(ctx);
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, token};
    use pretty_assertions::assert_eq;
    use purist_diagnostic::ErrorCode;
    use purist_layout::LayoutToken;
    use purist_lexer::lex;

    fn raw(source: &str) -> Vec<LayoutToken> {
        lex(source).tokens.into_iter().map(LayoutToken::Raw).collect()
    }

    #[test]
    fn test_relax_inserts_nothing() {
        let source = "x";
        let tokens = raw(source);
        let grammar = token(TokenKind::Lower) + token(TokenKind::Equals).relax("missing `=`");
        let result = parse(&grammar, source, &tokens);
        let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![ErrorCode::E1002]);
        assert_eq!(result.diagnostics[0].primary_span(), Some(Span::point(1)));
        assert_eq!(result.tree.text(), source);
    }

    #[test]
    fn test_relax_is_inert_inside_attempt() {
        let source = "x";
        let tokens = raw(source);
        let grammar = (token(TokenKind::Lower) + token(TokenKind::Equals).relax("missing `=`"))
            .attempt()
            .optional();
        let result = parse(&grammar, source, &tokens);
        // The attempt fails and rolls back, leaving `x` as leftover input.
        let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![ErrorCode::E1001]);
    }

    #[test]
    fn test_relax_to_stops_before_block_end() {
        // `{ x ; 1 }` with a body parser that only accepts `x`.
        let source = "x 1";
        let lexed = lex(source).tokens;
        let tokens = vec![
            LayoutToken::Start(lexed[0].start),
            LayoutToken::Raw(lexed[0]),
            LayoutToken::Raw(lexed[1]),
            LayoutToken::Raw(lexed[2]),
            LayoutToken::End(lexed[2].end),
        ];
        let item = token(TokenKind::Lower).relax_to(token(TokenKind::Lower), "bad item");
        let grammar = token(TokenKind::LayoutStart)
            + token(TokenKind::Lower)
            + item
            + token(TokenKind::LayoutEnd);
        let result = parse(&grammar, source, &tokens);
        let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![ErrorCode::E1003]);
        assert_eq!(result.diagnostics[0].primary_span(), Some(Span::new(2, 3)));
    }

    #[test]
    fn test_relax_to_at_block_end_skips_nothing() {
        let source = "x";
        let lexed = lex(source).tokens;
        let tokens = vec![
            LayoutToken::Start(lexed[0].start),
            LayoutToken::Raw(lexed[0]),
            LayoutToken::End(lexed[0].end),
        ];
        let item = token(TokenKind::Lower).relax_to(token(TokenKind::Lower), "bad item");
        let grammar = token(TokenKind::LayoutStart)
            + token(TokenKind::Lower)
            + item
            + token(TokenKind::LayoutEnd);
        let result = parse(&grammar, source, &tokens);
        let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![ErrorCode::E1003]);
        assert_eq!(result.diagnostics[0].primary_span(), Some(Span::point(1)));
        let errors = result
            .tree
            .root()
            .descendants()
            .iter()
            .filter(|n| n.kind == SyntaxKind::Error)
            .count();
        assert_eq!(errors, 0);
    }
}
