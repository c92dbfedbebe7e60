//! Type expressions.
//!
//! Precedence, loosest first: `forall`, constraints (`=>`), arrows (`->`,
//! right associative), application, atoms.

use purist_ir::{SyntaxKind, TokenKind};
use purist_parse::{braces, choice, continuation, fold, lookahead, parens, token, ParseContext, Parser};

use crate::names;
use crate::Rules;

pub(crate) fn ty(rules: &Rules) -> Parser {
    let forall = (token(TokenKind::KwForall)
        + var_binding(rules).many1()
        + token(TokenKind::Dot)
        + rules.ty.clone())
    .node(SyntaxKind::TypeForall);
    let arrow = continuation(
        SyntaxKind::TypeArrow,
        type_app(rules),
        token(TokenKind::Arrow) + rules.ty.clone(),
    );
    let constrained = continuation(
        SyntaxKind::TypeConstrained,
        arrow,
        token(TokenKind::FatArrow) + rules.ty.clone(),
    );
    (forall | constrained).labeled("type")
}

/// `Map k v`: an atom applied to atoms.
pub(crate) fn type_app(rules: &Rules) -> Parser {
    let atom = type_atom(rules);
    fold(SyntaxKind::TypeApp, atom.clone(), atom)
}

pub(crate) fn type_atom(rules: &Rules) -> Parser {
    let kinded = continuation(
        SyntaxKind::TypeKinded,
        rules.ty.clone(),
        token(TokenKind::DoubleColon) + rules.ty.clone(),
    );
    choice([
        token(TokenKind::Lower).node(SyntaxKind::TypeVar),
        names::proper().node(SyntaxKind::TypeConstructor),
        token(TokenKind::Underscore).node(SyntaxKind::TypeWildcard),
        token(TokenKind::Hole).node(SyntaxKind::TypeHole),
        (token(TokenKind::String) | token(TokenKind::RawString)).node(SyntaxKind::TypeStringLiteral),
        lookahead(parens(row(rules)), starts_row).node(SyntaxKind::TypeRow),
        parens(kinded.comma_sep1()).node(SyntaxKind::TypeParens),
        braces(row(rules)).node(SyntaxKind::TypeRecord),
    ])
}

/// `(a :: Int | r)` is a row, `(Maybe a)` is not.
fn starts_row(ctx: &ParseContext<'_>) -> bool {
    match ctx.nth_kind(1) {
        TokenKind::Pipe | TokenKind::RightParen => true,
        TokenKind::Lower | TokenKind::String | TokenKind::RawString => {
            ctx.nth_kind(2) == TokenKind::DoubleColon
        }
        _ => false,
    }
}

/// Labelled fields with an optional `| tail`.
fn row(rules: &Rules) -> Parser {
    let field = (names::label() + token(TokenKind::DoubleColon) + rules.ty.clone())
        .node(SyntaxKind::RowField);
    let tail = token(TokenKind::Pipe) + rules.ty.clone();
    field.comma_sep() + tail.optional()
}

/// A type variable introduced by `forall` or a declaration head.
pub(crate) fn var_binding(rules: &Rules) -> Parser {
    choice([
        token(TokenKind::Lower),
        parens(token(TokenKind::Lower) + token(TokenKind::DoubleColon) + rules.ty.clone()),
    ])
    .node(SyntaxKind::TypeVarBinding)
}

/// Constraints in front of `=>` or `<=`: one application or a
/// parenthesised list.
pub(crate) fn constraints(rules: &Rules) -> Parser {
    parens(type_app(rules).comma_sep1()) | type_app(rules)
}
