use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_all_is_indexed_by_discriminant() {
    for (index, kind) in TokenKind::ALL.iter().enumerate() {
        assert_eq!(kind.discriminant_index() as usize, index, "{kind:?}");
        assert_eq!(
            TokenKind::from_discriminant_index(kind.discriminant_index()),
            Some(*kind)
        );
    }
    assert_eq!(TokenKind::from_discriminant_index(TokenKind::COUNT as u8), None);
}

#[test]
fn test_categories() {
    assert!(TokenKind::LineComment.is_trivia());
    assert!(!TokenKind::LayoutSep.is_trivia());
    assert!(TokenKind::LayoutEnd.is_layout());
    assert!(TokenKind::KwModule.is_keyword());
    assert!(TokenKind::KwFalse.is_keyword());
    assert!(!TokenKind::Lower.is_keyword());
    assert!(!TokenKind::LeftParen.is_keyword());
}

#[test]
fn test_keyword_lookup() {
    assert_eq!(TokenKind::keyword("where"), Some(TokenKind::KwWhere));
    assert_eq!(TokenKind::keyword("ado"), Some(TokenKind::KwAdo));
    assert_eq!(TokenKind::keyword("as"), None);
    assert_eq!(TokenKind::keyword("hiding"), None);
}

#[test]
fn test_reserved_symbols() {
    assert_eq!(TokenKind::reserved_symbol("->"), Some(TokenKind::Arrow));
    assert_eq!(TokenKind::reserved_symbol("∷"), Some(TokenKind::DoubleColon));
    assert_eq!(TokenKind::reserved_symbol(".."), Some(TokenKind::DotDot));
    assert_eq!(TokenKind::reserved_symbol("<>"), None);
}

#[test]
fn test_raw_token_text() {
    let source = "foo = 1";
    let token = RawToken::new(
        TokenKind::Lower,
        SourcePos::new(1, 1, 0),
        SourcePos::new(1, 4, 3),
    );
    assert_eq!(token.span, Span::new(0, 3));
    assert_eq!(token.text(source), "foo");
}

#[test]
fn test_token_set_membership() {
    const SET: TokenSet = TokenSet::new()
        .with(TokenKind::Comma)
        .with(TokenKind::RightParen);

    assert!(SET.contains(TokenKind::Comma));
    assert!(SET.contains(TokenKind::RightParen));
    assert!(!SET.contains(TokenKind::LeftParen));
    assert_eq!(SET.count(), 2);
    assert_eq!(SET, TokenSet::of(&[TokenKind::RightParen, TokenKind::Comma]));
}

#[test]
fn test_token_set_union_and_intersection() {
    let a = TokenSet::of(&[TokenKind::Lower, TokenKind::Upper]);
    let b = TokenSet::of(&[TokenKind::Upper, TokenKind::Int]);
    assert_eq!(a.union(b).count(), 3);
    assert_eq!(a.intersection(b), TokenSet::single(TokenKind::Upper));
    assert!(TokenSet::EMPTY.is_empty());
}

#[test]
fn test_token_set_iterates_in_discriminant_order() {
    let set: TokenSet = [TokenKind::Eof, TokenKind::Whitespace, TokenKind::KwLet]
        .into_iter()
        .collect();
    let kinds: Vec<_> = set.iter().collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Whitespace, TokenKind::KwLet, TokenKind::Eof]
    );
    assert_eq!(set.iter_indices().len(), 3);
}

#[test]
fn test_format_expected() {
    assert_eq!(TokenSet::new().format_expected(), "nothing");
    assert_eq!(TokenSet::single(TokenKind::LeftParen).format_expected(), "`(`");
    assert_eq!(
        TokenSet::of(&[TokenKind::KwIn, TokenKind::Comma]).format_expected(),
        "`in` or `,`"
    );
    assert_eq!(
        TokenSet::of(&[TokenKind::RightBrace, TokenKind::Comma, TokenKind::RightParen])
            .format_expected(),
        "`)`, `}`, or `,`"
    );
}

#[test]
fn test_format_expected_merges_same_names() {
    let set = TokenSet::of(&[TokenKind::String, TokenKind::RawString]);
    assert_eq!(set.format_expected(), "`string`");
}
