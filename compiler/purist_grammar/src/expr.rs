//! Expressions.
//!
//! Precedence, loosest first: type annotation (`::`), operator chains,
//! negation, application, record access and update, atoms. Keyword forms
//! (`\`, `if`, `case`, `let`, `do`, `ado`) are atoms that extend as far
//! right as they can.

use purist_ir::{SyntaxKind, TokenKind};
use purist_parse::{
    braces, choice, continuation, fold, literal, lookahead, parens, squares, token, Parser,
};

use crate::binder::binder_atom;
use crate::names::{self, block};
use crate::types::type_atom;
use crate::Rules;

pub(crate) fn expression(rules: &Rules) -> Parser {
    let operand = negation(rules) | application(rules);
    let backtick = (token(TokenKind::Backtick)
        + (names::var() | names::proper())
        + token(TokenKind::Backtick))
    .node(SyntaxKind::ExprBacktick);
    let operator = token(TokenKind::Operator) | backtick;
    let chain = fold(
        SyntaxKind::ExprOperatorChain,
        operand.clone(),
        operator + operand,
    );
    continuation(
        SyntaxKind::ExprTyped,
        chain,
        token(TokenKind::DoubleColon) + rules.ty.clone(),
    )
    .labeled("expression")
}

fn negation(rules: &Rules) -> Parser {
    (literal("-") + application(rules)).node(SyntaxKind::ExprNegate)
}

/// `f x @T y`: left-nested applications, including visible type arguments.
fn application(rules: &Rules) -> Parser {
    let argument = record_postfix(rules);
    let type_argument = (token(TokenKind::At) + type_atom(rules)).node(SyntaxKind::ExprTypeApp);
    fold(SyntaxKind::ExprApp, argument.clone(), argument | type_argument)
}

/// `r.a.b` and `r { a = 1 }`.
fn record_postfix(rules: &Rules) -> Parser {
    let access = fold(
        SyntaxKind::ExprRecordAccess,
        atom(rules),
        token(TokenKind::Dot) + names::label(),
    );
    let assignment = (names::label() + token(TokenKind::Equals) + rules.expr.clone())
        .node(SyntaxKind::RecordField);
    // `{ a = ...` updates; `{ a: ...` is a record literal argument.
    let update = lookahead(braces(assignment.comma_sep1()), |ctx| {
        ctx.at(TokenKind::LeftBrace) && ctx.nth_kind(2) == TokenKind::Equals
    });
    fold(SyntaxKind::ExprRecordUpdate, access, update)
}

fn atom(rules: &Rules) -> Parser {
    let expr = &rules.expr;
    let field = (names::label() + (literal(":") + expr.clone()).optional())
        .node(SyntaxKind::RecordField);
    let operator_name = lookahead(names::operator_name(), |ctx| {
        ctx.nth_kind(1) == TokenKind::Operator && ctx.nth_kind(2) == TokenKind::RightParen
    });
    choice([
        names::var().node(SyntaxKind::ExprVar),
        names::proper().node(SyntaxKind::ExprConstructor),
        names::literal_token().node(SyntaxKind::ExprLiteral),
        token(TokenKind::Hole).node(SyntaxKind::ExprHole),
        token(TokenKind::Underscore).node(SyntaxKind::ExprSection),
        operator_name.node(SyntaxKind::ExprOperatorName),
        parens(expr.clone()).node(SyntaxKind::ExprParens),
        squares(expr.clone().comma_sep()).node(SyntaxKind::ExprArray),
        braces(field.comma_sep()).node(SyntaxKind::ExprRecord),
        lambda(rules),
        if_then_else(rules),
        case_of(rules),
        let_in(rules),
        do_block(rules),
        ado_block(rules),
    ])
}

fn lambda(rules: &Rules) -> Parser {
    (token(TokenKind::Backslash)
        + binder_atom(rules).many1()
        + token(TokenKind::Arrow)
        + rules.expr.clone())
    .node(SyntaxKind::ExprLambda)
}

fn if_then_else(rules: &Rules) -> Parser {
    (token(TokenKind::KwIf)
        + rules.expr.clone()
        + token(TokenKind::KwThen)
        + rules.expr.clone()
        + token(TokenKind::KwElse)
        + rules.expr.clone())
    .node(SyntaxKind::ExprIf)
}

fn case_of(rules: &Rules) -> Parser {
    let branch = (rules.binder.clone().comma_sep1() + guarded(rules, TokenKind::Arrow))
        .node(SyntaxKind::CaseBranch);
    (token(TokenKind::KwCase)
        + rules.expr.clone().comma_sep1()
        + token(TokenKind::KwOf)
        + block(branch, "case branch"))
    .node(SyntaxKind::ExprCase)
}

fn let_in(rules: &Rules) -> Parser {
    (token(TokenKind::KwLet)
        + let_bindings(rules)
        + token(TokenKind::KwIn)
        + rules.expr.clone())
    .node(SyntaxKind::ExprLet)
}

fn let_bindings(rules: &Rules) -> Parser {
    block(rules.local.clone(), "let binding").node(SyntaxKind::LetBindings)
}

fn do_block(rules: &Rules) -> Parser {
    (token(TokenKind::KwDo) + block(statement(rules), "do statement")).node(SyntaxKind::ExprDo)
}

fn ado_block(rules: &Rules) -> Parser {
    (token(TokenKind::KwAdo)
        + block(statement(rules), "ado statement")
        + token(TokenKind::KwIn)
        + rules.expr.clone())
    .node(SyntaxKind::ExprAdo)
}

/// A `do`/`ado` statement. A bind is only recognised once its `<-` is seen.
fn statement(rules: &Rules) -> Parser {
    let bind = (rules.binder.clone() + token(TokenKind::LeftArrow)).attempt() + rules.expr.clone();
    choice([
        (token(TokenKind::KwLet) + let_bindings(rules)).node(SyntaxKind::DoLet),
        bind.node(SyntaxKind::DoBind),
        rules.expr.clone().node(SyntaxKind::DoDiscard),
    ])
}

/// `sep expr`, or one or more `| guards sep expr` alternatives.
///
/// `sep` is `=` in declarations and `->` in case branches.
pub(crate) fn guarded(rules: &Rules, sep: TokenKind) -> Parser {
    let pattern_guard =
        (rules.binder.clone() + token(TokenKind::LeftArrow)).attempt() + rules.expr.clone();
    let guard = (pattern_guard | rules.expr.clone()).node(SyntaxKind::Guard);
    let alternative = (token(TokenKind::Pipe)
        + guard.comma_sep1()
        + token(sep)
        + rules.expr.clone())
    .node(SyntaxKind::GuardedExpr);
    (token(sep) + rules.expr.clone()) | alternative.many1()
}
