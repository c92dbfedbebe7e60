//! Structural properties of the layout stream on arbitrary input.

use proptest::prelude::*;
use purist_ir::{SourcePos, TokenKind};
use purist_layout::{layout, LayoutAction, LayoutOutput, LayoutRules, LayoutToken};
use purist_lexer::lex;

fn rules() -> LayoutRules {
    use LayoutAction as A;
    use TokenKind as T;
    LayoutRules::new()
        .with(T::Lower, A::Label)
        .with(T::KwData, A::DeclHead)
        .with(T::KwClass, A::DeclHead)
        .with(T::KwWhere, A::Where)
        .with(T::KwIn, A::In)
        .with(T::KwLet, A::Let)
        .with(T::KwDo, A::Do)
        .with(T::KwAdo, A::Ado)
        .with(T::KwCase, A::Case)
        .with(T::KwOf, A::Of)
        .with(T::KwIf, A::If)
        .with(T::KwThen, A::Then)
        .with(T::KwElse, A::Else)
        .with(T::KwForall, A::Forall)
        .with(T::Backslash, A::Backslash)
        .with(T::Arrow, A::Arrow)
        .with(T::Equals, A::Equals)
        .with(T::Pipe, A::Pipe)
        .with(T::Backtick, A::Tick)
        .with(T::Comma, A::Comma)
        .with(T::Dot, A::Dot)
        .with(T::LeftParen, A::OpenParen)
        .with(T::LeftBrace, A::OpenBrace)
        .with(T::RightParen, A::CloseParen)
        .with(T::RightBrace, A::CloseBrace)
        .with(T::Operator, A::Operator)
}

/// Tokens that only close blocks they are offside of. `in`, closing
/// brackets, `then`/`else`/`of`, commas, arrows, `where` and end of input
/// close blocks regardless of column.
fn closes_by_indentation(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Lower | TokenKind::Upper | TokenKind::Int | TokenKind::Operator | TokenKind::Pipe
    )
}

fn run(source: &str) -> LayoutOutput {
    let lexed = lex(source);
    layout(&lexed.tokens, lexed.eof, &rules())
}

/// Words and symbols that drive layout, glued with spaces and newlines.
fn layout_heavy_source() -> impl Strategy<Value = String> {
    let piece = prop::sample::select(vec![
        "module M where", "do", "ado", "let", "in", "where", "case", "of",
        "if", "then", "else", "forall", ".", "\\", "->", "=", "|", "`", ",",
        "(", ")", "{", "}", "x", "y", "Just", "1", "<>", "data", "class",
        "\n", "\n  ", "\n    ", "\n      ", " ",
    ]);
    prop::collection::vec(piece, 0..48).prop_map(|pieces| pieces.join(" "))
}

proptest! {
    #[test]
    fn prop_blocks_are_balanced(source in layout_heavy_source()) {
        let output = run(&source);
        let mut depth = 0i64;
        for token in &output.tokens {
            match token {
                LayoutToken::Start(_) => depth += 1,
                LayoutToken::End(_) => {
                    depth -= 1;
                    prop_assert!(depth >= 0, "unmatched end in {source:?}");
                }
                _ => {}
            }
        }
        prop_assert_eq!(depth, 0);
    }

    #[test]
    fn prop_dedent_closes_left_of_block(source in layout_heavy_source()) {
        let output = run(&source);
        let mut open: Vec<SourcePos> = Vec::new();
        let mut closing: Vec<(SourcePos, SourcePos)> = Vec::new();
        for token in output.significant() {
            match token {
                LayoutToken::Start(pos) => open.push(*pos),
                LayoutToken::End(pos) => {
                    if let Some(start) = open.pop() {
                        closing.push((start, *pos));
                    }
                }
                LayoutToken::Sep(_) => {}
                LayoutToken::Raw(raw) => {
                    if closes_by_indentation(raw.kind) {
                        for (start, end) in &closing {
                            prop_assert!(
                                end.column <= start.column,
                                "block at {start} closed at {end} by {:?} in {source:?}",
                                raw.kind
                            );
                        }
                    }
                    closing.clear();
                }
            }
        }
    }

    #[test]
    fn prop_layout_keeps_every_byte(source in layout_heavy_source()) {
        let output = run(&source);
        let text: String = output.tokens.iter().map(|t| t.text(&source)).collect();
        prop_assert_eq!(text, source);
    }

    #[test]
    fn prop_layout_is_stable_under_relexing(source in layout_heavy_source()) {
        let first = run(&source);
        let text: String = first.tokens.iter().map(|t| t.text(&source)).collect();
        let second = run(&text);
        prop_assert_eq!(first.tokens, second.tokens);
    }
}
