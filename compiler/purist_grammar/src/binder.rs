//! Binders (patterns).

use purist_ir::{SyntaxKind, TokenKind};
use purist_parse::{braces, choice, continuation, literal, parens, squares, token, Parser};

use crate::names;
use crate::Rules;

/// A full binder: a constructor with arguments, or an atom.
pub(crate) fn binder(rules: &Rules) -> Parser {
    let constructor = (names::proper() + binder_atom(rules).many()).node(SyntaxKind::BinderConstructor);
    (constructor | binder_atom(rules)).labeled("binder")
}

/// A binder that needs no parentheses in argument position.
pub(crate) fn binder_atom(rules: &Rules) -> Parser {
    let named = continuation(
        SyntaxKind::BinderNamed,
        token(TokenKind::Lower).node(SyntaxKind::BinderVar),
        token(TokenKind::At) + choice(closed(rules)),
    );
    choice(std::iter::once(named).chain(closed(rules)))
}

/// Atoms other than variables.
fn closed(rules: &Rules) -> Vec<Parser> {
    let negative = literal("-") + (token(TokenKind::Int) | token(TokenKind::Number));
    let field = (names::label() + (literal(":") + rules.binder.clone()).optional())
        .node(SyntaxKind::RecordField);
    let typed = continuation(
        SyntaxKind::BinderTyped,
        rules.binder.clone(),
        token(TokenKind::DoubleColon) + rules.ty.clone(),
    );
    vec![
        token(TokenKind::Underscore).node(SyntaxKind::BinderWildcard),
        (names::literal_token() | negative).node(SyntaxKind::BinderLiteral),
        names::proper().node(SyntaxKind::BinderConstructor),
        braces(field.comma_sep()).node(SyntaxKind::BinderRecord),
        squares(rules.binder.clone().comma_sep()).node(SyntaxKind::BinderArray),
        parens(typed).node(SyntaxKind::BinderParens),
    ]
}
