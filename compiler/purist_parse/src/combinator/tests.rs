use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;
use crate::{parse, Parse, SyntaxElement, SyntaxNode, SyntaxTree};
use pretty_assertions::assert_eq;
use purist_diagnostic::ErrorCode;
use purist_layout::LayoutToken;
use purist_lexer::lex;

fn run(grammar: &Parser, source: &str) -> Parse {
    let tokens: Vec<LayoutToken> = lex(source).tokens.into_iter().map(LayoutToken::Raw).collect();
    parse(grammar, source, &tokens)
}

/// `Kind(child child ...)` with significant token texts as leaves.
fn shape(tree: &SyntaxTree) -> String {
    fn go(tree: &SyntaxTree, node: &SyntaxNode, out: &mut String) {
        out.push_str(&format!("{:?}(", node.kind));
        let mut first = true;
        for child in &node.children {
            match child {
                SyntaxElement::Token(token) if token.kind.is_trivia() => continue,
                SyntaxElement::Token(token) => {
                    if !first {
                        out.push(' ');
                    }
                    out.push_str(tree.token_text(token));
                }
                SyntaxElement::Node(child) => {
                    if !first {
                        out.push(' ');
                    }
                    go(tree, child, out);
                }
            }
            first = false;
        }
        out.push(')');
    }
    let mut out = String::new();
    go(tree, tree.root(), &mut out);
    out
}

fn codes(result: &Parse) -> Vec<ErrorCode> {
    result.diagnostics.iter().map(|d| d.code).collect()
}

fn lower() -> Parser {
    token(TokenKind::Lower)
}

// --- Derived properties ---

#[test]
fn test_first_sets() {
    let eq = token(TokenKind::Equals);
    assert_eq!(
        lower().first_set(),
        FirstSet::Tokens(TokenSet::single(TokenKind::Lower))
    );
    assert_eq!(literal("as").first_set(), FirstSet::Any);

    let seq_first = (lower().optional() + eq.clone()).first_set();
    assert_eq!(
        seq_first,
        FirstSet::Tokens(TokenSet::of(&[TokenKind::Lower, TokenKind::Equals]))
    );
    assert_eq!(
        (lower() + eq.clone()).first_set(),
        FirstSet::Tokens(TokenSet::single(TokenKind::Lower))
    );
    assert_eq!((lower() | literal("x")).first_set(), FirstSet::Any);
    assert_eq!(reference("r", |_| token(TokenKind::Int)).first_set(), FirstSet::Any);
}

#[test]
fn test_nullability() {
    assert!(!lower().is_nullable());
    assert!(lower().many().is_nullable());
    assert!(!lower().many1().is_nullable());
    assert!(lower().optional().is_nullable());
    assert!(succeed().is_nullable());
    assert!((lower().optional() + succeed()).is_nullable());
    assert!(!(lower().optional() + lower()).is_nullable());
    assert!((lower() | succeed()).is_nullable());
    assert!(lower().relax("missing").is_nullable());
    assert!(!reference("r", |_| succeed()).is_nullable());
}

#[test]
fn test_expected_descriptions() {
    let p = lower().optional() + token(TokenKind::Equals) + token(TokenKind::Int);
    assert_eq!(
        p.expected_descriptions()
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>(),
        vec!["=", "identifier"]
    );
    assert_eq!(&*lower().labeled("binder").expected_descriptions()[0], "binder");
}

#[test]
fn test_sequences_and_choices_flatten() {
    let s = lower() + lower() + lower();
    assert!(matches!(s.kind(), Kind::Seq(children) if children.len() == 3));

    let c = lower() | token(TokenKind::Upper) | token(TokenKind::Int);
    assert!(matches!(c.kind(), Kind::Choice { alternatives, .. } if alternatives.len() == 3));
    assert!(!c.has_dispatch_table());

    let wide = c | token(TokenKind::String);
    assert!(wide.has_dispatch_table());
}

#[test]
fn test_dispatch_slots() {
    let wide = choice([
        lower(),
        token(TokenKind::Upper),
        literal("x"),
        token(TokenKind::Int).optional(),
    ]);
    let Kind::Choice {
        dispatch: Some(table),
        ..
    } = wide.kind()
    else {
        panic!("expected a dispatch table");
    };
    let slot = |kind: TokenKind| table[usize::from(kind.discriminant_index())].to_vec();
    assert_eq!(slot(TokenKind::Lower), vec![0, 2, 3]);
    assert_eq!(slot(TokenKind::Upper), vec![1, 2, 3]);
    assert_eq!(slot(TokenKind::Comma), vec![2, 3]);
}

#[test]
fn test_names() {
    assert_eq!(lower().name(), "Lower");
    assert_eq!((lower() + token(TokenKind::Equals)).name(), "(Lower + Equals)");
    assert_eq!(lower().many().name(), "many(Lower)");
    assert_eq!(format!("{:?}", literal("as")), "\"as\"");
}

#[test]
fn test_grammar_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Parser>();
}

// --- Evaluation ---

#[test]
fn test_literal_matches_text() {
    let grammar = literal("as") + lower();
    let result = run(&grammar, "as x");
    assert!(!result.has_errors());

    let result = run(&grammar, "is x");
    assert_eq!(codes(&result), vec![ErrorCode::E1001]);
    assert_eq!(result.diagnostics[0].message, "unexpected `is`, expected `as`");
}

#[test]
fn test_optional_absorbs_only_clean_failure() {
    let pair = lower() + token(TokenKind::Equals);
    let grammar = pair.optional() + token(TokenKind::Int);

    assert!(!run(&grammar, "1").has_errors());
    assert!(!run(&grammar, "x = 1").has_errors());

    // `x` commits the optional pair; the missing `=` is reported.
    let result = run(&grammar, "x 1");
    assert_eq!(codes(&result), vec![ErrorCode::E1001]);
    assert_eq!(result.diagnostics[0].message, "unexpected `1`, expected `=`");
}

#[test]
fn test_optional_failure_contributes_expectations() {
    let grammar = token(TokenKind::Comma).optional() + token(TokenKind::Int);
    let result = run(&grammar, "x");
    assert_eq!(result.diagnostics[0].message, "unexpected `x`, expected `,` or `integer`");
}

#[test]
fn test_many_stops_at_first_clean_failure() {
    let grammar = lower().many().node(SyntaxKind::ExprApp);
    let result = run(&grammar, "a b c");
    assert!(!result.has_errors());
    assert_eq!(shape(&result.tree), "Root(ExprApp(a b c))");
}

#[test]
fn test_many1_requires_one() {
    let grammar = lower().many1();
    let result = run(&grammar, "1");
    assert_eq!(codes(&result), vec![ErrorCode::E1001]);
}

#[test]
fn test_many_rejects_zero_progress() {
    let grammar = succeed().many();
    let result = run(&grammar, "a");
    assert_eq!(codes(&result), vec![ErrorCode::E9001]);
    // Still a complete tree.
    assert_eq!(result.tree.text(), "a");
}

#[test]
fn test_guard_rejects_and_rolls_back() {
    let not_reserved = lower().guard("`foo` is reserved here", |text| text != "foo");
    let grammar = not_reserved | token(TokenKind::Lower).node(SyntaxKind::Error);

    let result = run(&grammar, "bar");
    assert_eq!(shape(&result.tree), "Root(bar)");

    // The guard rejects without consuming, so the second alternative runs.
    let result = run(&grammar, "foo");
    assert_eq!(shape(&result.tree), "Root(Error(foo))");
    assert!(!result.has_errors());
}

#[test]
fn test_guard_message_reaches_top_level() {
    let grammar = lower().guard("`foo` is reserved here", |text| text != "foo");
    let result = run(&grammar, "foo");
    assert_eq!(codes(&result), vec![ErrorCode::E1004]);
    assert_eq!(result.diagnostics[0].message, "`foo` is reserved here");
}

#[test]
fn test_fold_is_left_associative() {
    let var = lower().node(SyntaxKind::ExprVar);
    let grammar = fold(SyntaxKind::ExprApp, var.clone(), var);

    let result = run(&grammar, "f x y");
    assert_eq!(
        shape(&result.tree),
        "Root(ExprApp(ExprApp(ExprVar(f) ExprVar(x)) ExprVar(y)))"
    );

    let result = run(&grammar, "f");
    assert_eq!(shape(&result.tree), "Root(ExprVar(f))");
}

#[test]
fn test_fold_heals_failed_step() {
    // `, 1` cannot complete a step; it rolls back and stays unconsumed.
    let item = lower().node(SyntaxKind::ExprVar);
    let step = token(TokenKind::Comma) + item.clone();
    let grammar = fold(SyntaxKind::ExprArray, item, step);
    let result = run(&grammar, "a , b , 1");
    assert_eq!(
        shape(&result.tree),
        "Root(ExprArray(ExprVar(a) , ExprVar(b)) Error(, 1))"
    );
}

#[test]
fn test_continuation_wraps_only_when_extended() {
    let var = lower().node(SyntaxKind::ExprVar);
    let annotation = token(TokenKind::DoubleColon) + token(TokenKind::Upper);
    let grammar = continuation(SyntaxKind::ExprTyped, var, annotation);

    let result = run(&grammar, "x :: Int");
    assert_eq!(shape(&result.tree), "Root(ExprTyped(ExprVar(x) :: Int))");

    let result = run(&grammar, "x");
    assert_eq!(shape(&result.tree), "Root(ExprVar(x))");
}

#[test]
fn test_reference_builds_once() {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&builds);
    let nested = reference("nested", move |this| {
        counter.fetch_add(1, Ordering::SeqCst);
        parens(this.optional()).node(SyntaxKind::ExprParens)
    });

    let result = run(&nested, "((()))");
    assert!(!result.has_errors());
    assert_eq!(
        shape(&result.tree),
        "Root(ExprParens(( ExprParens(( ExprParens(( )) )) )))"
    );
    assert!(!run(&nested, "()").has_errors());
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dangling_rule_fails_with_grammar_error() {
    let handle = {
        let rule = reference("gone", |_| lower());
        rule.downgrade("gone")
    };
    let result = run(&handle, "x");
    assert_eq!(codes(&result), vec![ErrorCode::E9001]);
}

#[test]
fn test_lookahead_filter() {
    let grammar = lookahead(lower(), |ctx| ctx.nth_kind(1) == TokenKind::Equals)
        .node(SyntaxKind::ValueDecl)
        .optional()
        + lower().many();
    let result = run(&grammar, "x = ");
    assert_eq!(shape(&result.tree), "Root(ValueDecl(x) Error(=))");
    let result = run(&grammar, "x y");
    assert_eq!(shape(&result.tree), "Root(x y)");
}

#[test]
fn test_capture_builds_from_token_text() {
    let closing = capture("opening word", |text| {
        let text = text.to_string();
        lower() + literal(&text)
    });
    assert!(!run(&closing, "begin begin").has_errors());
    let result = run(&closing, "begin end");
    assert_eq!(codes(&result), vec![ErrorCode::E1001]);
}

#[test]
fn test_labeled_replaces_expectations() {
    let grammar = (lower() | token(TokenKind::Int)).labeled("atom");
    let result = run(&grammar, ",");
    assert_eq!(result.diagnostics[0].message, "unexpected `,`, expected `atom`");
}

#[test]
fn test_sep_by_leaves_trailing_separator() {
    let grammar = lower().comma_sep().node(SyntaxKind::ExportList);
    let result = run(&grammar, "a, b,");
    assert_eq!(shape(&result.tree), "Root(ExportList(a , b) Error(,))");

    let result = run(&grammar, "");
    assert!(!result.has_errors());
}

#[test]
fn test_bracket_helpers() {
    let grammar = squares(lower().comma_sep()) + braces(succeed()) + parens(lower());
    assert!(!run(&grammar, "[a, b] {} (c)").has_errors());
}
