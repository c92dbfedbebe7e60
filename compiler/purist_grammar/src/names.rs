//! Names, literals and layout blocks.

use purist_ir::{SyntaxKind, TokenKind};
use purist_parse::{choice, lookahead, parens, succeed, token, Parser};

/// A possibly qualified lowercase name.
pub(crate) fn var() -> Parser {
    token(TokenKind::Lower) | token(TokenKind::QualifiedLower)
}

/// A possibly qualified proper name.
pub(crate) fn proper() -> Parser {
    token(TokenKind::Upper) | token(TokenKind::QualifiedUpper)
}

pub(crate) fn module_name() -> Parser {
    proper().node(SyntaxKind::ModuleName).labeled("module name")
}

/// A record label. Strings may be labels too.
pub(crate) fn label() -> Parser {
    choice([
        token(TokenKind::Lower),
        token(TokenKind::String),
        token(TokenKind::RawString),
    ])
    .labeled("label")
}

/// Any literal token, booleans included.
pub(crate) fn literal_token() -> Parser {
    choice([
        token(TokenKind::Int),
        token(TokenKind::Number),
        token(TokenKind::String),
        token(TokenKind::RawString),
        token(TokenKind::Char),
        token(TokenKind::KwTrue),
        token(TokenKind::KwFalse),
    ])
}

/// `(+)`: an operator used as a name.
pub(crate) fn operator_name() -> Parser {
    parens(token(TokenKind::Operator))
}

/// `(..)` or `(A, B)` after a type name in import and export lists.
pub(crate) fn members() -> Parser {
    parens(token(TokenKind::DotDot) | token(TokenKind::Upper).comma_sep())
}

/// `item`s separated by layout separators. An item that fails, or leaves
/// input before the next separator, is skipped up to that separator.
/// Fails without consuming in an empty block.
pub(crate) fn items(item: Parser, what: &str) -> Parser {
    let sync = token(TokenKind::LayoutSep) | token(TokenKind::LayoutEnd);
    let item_end = lookahead(succeed(), |ctx| {
        ctx.eof() || ctx.at(TokenKind::LayoutSep) || ctx.at(TokenKind::LayoutEnd)
    });
    let recovering = (item + item_end).relax_to(sync, &format!("malformed {what}"));
    lookahead(recovering, |ctx| !ctx.at(TokenKind::LayoutEnd) && !ctx.eof())
        .sep_by1(token(TokenKind::LayoutSep))
}

/// A layout block of `item`s after a block keyword.
///
/// A body indented too little opens no block at all, and a keyword at the
/// end of input opens an empty one. Both read as "missing {what}" and
/// parse as nothing, so the enclosing construct still completes.
pub(crate) fn block(item: Parser, what: &str) -> Parser {
    let missing = format!("missing {what}");
    (token(TokenKind::LayoutStart) + items(item, what).relax(&missing) + token(TokenKind::LayoutEnd))
        .relax(&missing)
}
