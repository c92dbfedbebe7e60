//! End-to-end lexer behavior: losslessness, coordinates, diagnostics.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use purist_diagnostic::ErrorCode;
use purist_ir::{SourcePos, TokenKind};
use purist_lexer::{lex, token_kinds};

fn rebuild(source: &str) -> String {
    lex(source)
        .tokens
        .iter()
        .map(|t| t.text(source))
        .collect()
}

#[test]
fn test_positions_are_one_based_and_count_chars() {
    let source = "module Main where\n\nλx = 1\n  y";
    let output = lex(source);
    let significant: Vec<_> = output
        .significant()
        .map(|t| (t.text(source), t.start.line, t.start.column))
        .collect();
    assert_eq!(
        significant,
        vec![
            ("module", 1, 1),
            ("Main", 1, 8),
            ("where", 1, 13),
            ("λx", 3, 1),
            ("=", 3, 4),
            ("1", 3, 6),
            ("y", 4, 3),
        ]
    );
    assert_eq!(output.eof, SourcePos::new(4, 4, 30));
}

#[test]
fn test_tokens_are_contiguous() {
    let source = "f x = case x of\n  Just y -> y -- done\n  _ -> 0\n";
    let output = lex(source);
    let mut expected_start = 0;
    for token in &output.tokens {
        assert_eq!(token.span.start, expected_start, "{token:?}");
        expected_start = token.span.end;
    }
    assert_eq!(expected_start as usize, source.len());
}

#[test]
fn test_lexical_errors_become_diagnostics() {
    let output = lex("x = \"open\ny = {- never closed");
    let codes: Vec<_> = output.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E0001, ErrorCode::E0003]);
    assert!(output.has_errors());
}

#[test]
fn test_invalid_character_is_kept() {
    assert_eq!(
        token_kinds("a;b"),
        vec![TokenKind::Lower, TokenKind::Unknown, TokenKind::Lower]
    );
}

#[test]
fn test_empty_source() {
    let output = lex("");
    assert!(output.tokens.is_empty());
    assert_eq!(output.eof, SourcePos::START);
}

proptest! {
    #[test]
    fn prop_lexing_is_lossless(source in "\\PC*") {
        prop_assert_eq!(rebuild(&source), source);
    }

    #[test]
    fn prop_lexing_is_lossless_on_code_like_input(
        source in "[a-zA-Z0-9 \\n\\t=(){}\\[\\],.:|\\\\'\"`<>+-]{0,64}"
    ) {
        prop_assert_eq!(rebuild(&source), source);
    }
}
