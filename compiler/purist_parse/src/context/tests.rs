use super::*;
use pretty_assertions::assert_eq;
use purist_lexer::lex;

fn raw_tokens(source: &str) -> Vec<LayoutToken> {
    lex(source).tokens.into_iter().map(LayoutToken::Raw).collect()
}

#[test]
fn test_eat_only_matching_kind() {
    let source = "f x";
    let tokens = raw_tokens(source);
    let mut ctx = ParseContext::new(source, &tokens);
    assert!(!ctx.eat(TokenKind::Upper));
    assert_eq!(ctx.position(), 0);
    assert!(ctx.eat(TokenKind::Lower));
    assert_eq!(ctx.text(), "x");
    assert_eq!(ctx.position(), 1);
    assert_eq!(ctx.events(), &[Event::Token { pos: 0 }]);
}

#[test]
fn test_rollback_restores_position_and_events() {
    let source = "a b c";
    let tokens = raw_tokens(source);
    let mut ctx = ParseContext::new(source, &tokens);
    ctx.advance();

    let tx = ctx.start();
    let marker = ctx.mark();
    ctx.advance();
    ctx.error(Diagnostic::error(purist_diagnostic::ErrorCode::E1002));
    ctx.advance();
    marker.complete(&mut ctx, SyntaxKind::ExprApp);
    assert_eq!(ctx.position(), 3);
    tx.rollback(&mut ctx);

    assert_eq!(ctx.position(), 1);
    assert_eq!(ctx.events(), &[Event::Token { pos: 0 }]);
    assert_eq!(ctx.open_transactions(), 0);
}

#[test]
fn test_commit_keeps_progress() {
    let source = "a b";
    let tokens = raw_tokens(source);
    let mut ctx = ParseContext::new(source, &tokens);
    let outer = ctx.start();
    let inner = ctx.start();
    ctx.advance();
    inner.commit(&mut ctx);
    ctx.advance();
    outer.commit(&mut ctx);
    assert_eq!(ctx.position(), 2);
    assert!(ctx.eof());
    assert_eq!(ctx.events().len(), 2);
}

#[test]
#[should_panic(expected = "LIFO")]
#[cfg(debug_assertions)]
fn test_out_of_order_close_panics() {
    let source = "a";
    let tokens = raw_tokens(source);
    let mut ctx = ParseContext::new(source, &tokens);
    let outer = ctx.start();
    let inner = ctx.start();
    outer.commit(&mut ctx);
    inner.commit(&mut ctx);
}

#[test]
fn test_abandon_last_marker_removes_it() {
    let source = "a";
    let tokens = raw_tokens(source);
    let mut ctx = ParseContext::new(source, &tokens);
    let marker = ctx.mark();
    marker.abandon(&mut ctx);
    assert!(ctx.events().is_empty());

    let marker = ctx.mark();
    ctx.advance();
    marker.abandon(&mut ctx);
    assert_eq!(ctx.events(), &[Event::TOMBSTONE, Event::Token { pos: 0 }]);
}

#[test]
fn test_precede_links_forward_parent() {
    let source = "a b";
    let tokens = raw_tokens(source);
    let mut ctx = ParseContext::new(source, &tokens);
    let marker = ctx.mark();
    ctx.advance();
    let done = marker.complete(&mut ctx, SyntaxKind::ExprVar);
    ctx.advance();
    let parent = done.precede(&mut ctx);
    parent.complete(&mut ctx, SyntaxKind::ExprApp);
    assert_eq!(
        ctx.events(),
        &[
            Event::Start {
                kind: Some(SyntaxKind::ExprVar),
                forward_parent: Some(4),
            },
            Event::Token { pos: 0 },
            Event::Finish,
            Event::Token { pos: 1 },
            Event::Start {
                kind: Some(SyntaxKind::ExprApp),
                forward_parent: None,
            },
            Event::Finish,
        ]
    );
}

#[test]
fn test_skip_token_tree_skips_whole_block() {
    let source = "a b c";
    let lexed = lex(source).tokens;
    let tokens = vec![
        LayoutToken::Start(lexed[0].start),
        LayoutToken::Raw(lexed[0]),
        LayoutToken::Raw(lexed[1]),
        LayoutToken::Raw(lexed[2]),
        LayoutToken::End(lexed[2].end),
        LayoutToken::Raw(lexed[3]),
        LayoutToken::Raw(lexed[4]),
    ];
    let mut ctx = ParseContext::new(source, &tokens);
    assert!(ctx.skip_token_tree());
    assert_eq!(ctx.text(), "c");
    assert!(ctx.skip_token_tree());
    assert!(ctx.eof());
    assert!(!ctx.skip_token_tree());
}

#[test]
fn test_span_between() {
    let source = "ab  cd";
    let tokens = raw_tokens(source);
    let ctx = ParseContext::new(source, &tokens);
    assert_eq!(ctx.span_between(0, 2), Span::new(0, 6));
    assert_eq!(ctx.span_between(1, 1), Span::point(0));
}
