use super::*;
use pretty_assertions::assert_eq;
use purist_lexer::lex;

fn raw_tokens(source: &str) -> Vec<LayoutToken> {
    lex(source).tokens.into_iter().map(LayoutToken::Raw).collect()
}

#[test]
fn test_skips_trivia() {
    let source = "f  x -- c\n= 1";
    let tokens = raw_tokens(source);
    let mut cursor = Cursor::new(source, &tokens);
    let mut seen = Vec::new();
    while !cursor.is_at_end() {
        seen.push((cursor.current_kind(), cursor.text()));
        cursor.advance();
    }
    assert_eq!(
        seen,
        vec![
            (TokenKind::Lower, "f"),
            (TokenKind::Lower, "x"),
            (TokenKind::Equals, "="),
            (TokenKind::Int, "1"),
        ]
    );
    assert_eq!(cursor.len(), 4);
}

#[test]
fn test_end_of_input() {
    let source = "a";
    let tokens = raw_tokens(source);
    let mut cursor = Cursor::new(source, &tokens);
    cursor.advance();
    assert!(cursor.is_at_end());
    assert_eq!(cursor.current_kind(), TokenKind::Eof);
    assert_eq!(cursor.text(), "");
    assert_eq!(cursor.current_span(), Span::point(1));
    cursor.advance();
    assert_eq!(cursor.position(), 1);
}

#[test]
fn test_virtual_tokens_are_significant() {
    let source = "x";
    let mut tokens = raw_tokens(source);
    tokens.insert(0, LayoutToken::Start(SourcePos::START));
    let cursor = Cursor::new(source, &tokens);
    assert_eq!(cursor.current_kind(), TokenKind::LayoutStart);
    assert_eq!(cursor.text(), "");
    assert_eq!(cursor.peek_kind_at(1), TokenKind::Lower);
    assert_eq!(cursor.peek_kind_at(2), TokenKind::Eof);
}

#[test]
fn test_text_between_covers_inner_trivia() {
    let source = "a  +  b c";
    let tokens = raw_tokens(source);
    let cursor = Cursor::new(source, &tokens);
    assert_eq!(cursor.text_between(0, 3), "a  +  b");
    assert_eq!(cursor.text_between(1, 1), "");
    assert_eq!(cursor.raw_index(1), Some(2));
}
