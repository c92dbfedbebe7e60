//! Declarations, imports and the module.

use purist_ir::{SyntaxKind, TokenKind};
use purist_parse::{choice, literal, lookahead, parens, token, Parser};

use crate::binder::binder_atom;
use crate::expr::guarded;
use crate::names::{self, block, items};
use crate::types::{constraints, type_atom, var_binding};
use crate::Rules;

/// `module M (exports) where` followed by a block of imports and
/// declarations. Each item that fails to parse is skipped up to the next
/// item, so one malformed declaration never hides the rest.
pub(crate) fn module(declaration: &Parser, import: &Parser) -> Parser {
    let export = choice([
        token(TokenKind::Lower),
        names::operator_name(),
        token(TokenKind::Upper) + names::members().optional(),
        token(TokenKind::KwType) + names::operator_name(),
        token(TokenKind::KwClass) + token(TokenKind::Upper),
        token(TokenKind::KwModule) + names::module_name(),
    ])
    .node(SyntaxKind::Export);
    let exports = parens(export.comma_sep()).node(SyntaxKind::ExportList);
    let header = (token(TokenKind::KwModule)
        + names::module_name()
        + exports.optional()
        + token(TokenKind::KwWhere))
    .node(SyntaxKind::ModuleHeader);
    let body = items(import.clone() | declaration.clone(), "declaration");
    (header
        + token(TokenKind::LayoutStart)
        + body.optional()
        + token(TokenKind::LayoutEnd))
    .node(SyntaxKind::Module)
}

pub(crate) fn import_declaration() -> Parser {
    let item = choice([
        token(TokenKind::Lower),
        names::operator_name(),
        token(TokenKind::Upper) + names::members().optional(),
        token(TokenKind::KwType) + names::operator_name(),
        token(TokenKind::KwClass) + token(TokenKind::Upper),
    ])
    .node(SyntaxKind::ImportItem);
    let list = (literal("hiding").optional() + parens(item.comma_sep())).node(SyntaxKind::ImportList);
    let alias = (literal("as") + names::module_name()).node(SyntaxKind::ImportAlias);
    (token(TokenKind::KwImport) + names::module_name() + list.optional() + alias.optional())
        .node(SyntaxKind::ImportDecl)
}

/// A top-level declaration.
pub(crate) fn declaration(rules: &Rules) -> Parser {
    choice([
        data(rules),
        newtype(rules),
        type_synonym(rules),
        class(rules),
        instance(rules).sep_by1(token(TokenKind::KwElse)),
        derive(rules),
        foreign_import(rules),
        fixity(),
        signature(rules),
        value(rules),
    ])
    .labeled("declaration")
}

/// A binding in a `let`, `where` or instance body.
pub(crate) fn local_declaration(rules: &Rules) -> Parser {
    signature(rules) | value(rules)
}

/// `name :: Type`.
fn signature(rules: &Rules) -> Parser {
    let signature = (token(TokenKind::Lower) + token(TokenKind::DoubleColon) + rules.ty.clone())
        .node(SyntaxKind::Signature);
    lookahead(signature, |ctx| ctx.nth_kind(1) == TokenKind::DoubleColon)
}

/// `name binders = body` or `name binders | guard = body ...`, with an
/// optional `where` block.
fn value(rules: &Rules) -> Parser {
    let bindings = (token(TokenKind::KwWhere) + block(rules.local.clone(), "where binding"))
        .node(SyntaxKind::WhereBlock);
    (token(TokenKind::Lower)
        + binder_atom(rules).many()
        + guarded(rules, TokenKind::Equals)
        + bindings.optional())
    .node(SyntaxKind::ValueDecl)
}

/// Type name and variables after `data`, `newtype` or `type`.
fn type_head(rules: &Rules) -> Parser {
    token(TokenKind::Upper) + var_binding(rules).many()
}

fn data(rules: &Rules) -> Parser {
    let constructor =
        (token(TokenKind::Upper) + type_atom(rules).many()).node(SyntaxKind::DataCtor);
    let constructors = token(TokenKind::Equals) + constructor.sep_by1(token(TokenKind::Pipe));
    (token(TokenKind::KwData) + type_head(rules) + constructors.optional())
        .node(SyntaxKind::DataDecl)
}

fn newtype(rules: &Rules) -> Parser {
    (token(TokenKind::KwNewtype)
        + type_head(rules)
        + token(TokenKind::Equals)
        + token(TokenKind::Upper)
        + type_atom(rules))
    .node(SyntaxKind::NewtypeDecl)
}

fn type_synonym(rules: &Rules) -> Parser {
    (token(TokenKind::KwType) + type_head(rules) + token(TokenKind::Equals) + rules.ty.clone())
        .node(SyntaxKind::TypeSynonymDecl)
}

fn class(rules: &Rules) -> Parser {
    let superclasses = (constraints(rules) + literal("<=")).attempt();
    let dependency = token(TokenKind::Lower).many()
        + token(TokenKind::Arrow)
        + token(TokenKind::Lower).many();
    let dependencies = token(TokenKind::Pipe) + dependency.comma_sep1();
    let member = (token(TokenKind::Lower) + token(TokenKind::DoubleColon) + rules.ty.clone())
        .node(SyntaxKind::Signature);
    let members = (token(TokenKind::KwWhere) + block(member, "class member"))
        .node(SyntaxKind::ClassMembers);
    (token(TokenKind::KwClass)
        + superclasses.optional()
        + type_head(rules)
        + dependencies.optional()
        + members.optional())
    .node(SyntaxKind::ClassDecl)
}

/// `name :: Constraints => Class Types`, the name optional.
fn instance_head(rules: &Rules) -> Parser {
    let name = token(TokenKind::Lower) + token(TokenKind::DoubleColon);
    let context = (constraints(rules) + token(TokenKind::FatArrow)).attempt();
    name.optional() + context.optional() + names::proper() + type_atom(rules).many()
}

fn instance(rules: &Rules) -> Parser {
    let members = (token(TokenKind::KwWhere) + block(rules.local.clone(), "instance member"))
        .node(SyntaxKind::InstanceMembers);
    (token(TokenKind::KwInstance) + instance_head(rules) + members.optional())
        .node(SyntaxKind::InstanceDecl)
}

fn derive(rules: &Rules) -> Parser {
    (token(TokenKind::KwDerive)
        + token(TokenKind::KwNewtype).optional()
        + token(TokenKind::KwInstance)
        + instance_head(rules))
    .node(SyntaxKind::DeriveDecl)
}

fn foreign_import(rules: &Rules) -> Parser {
    let foreign_data = token(TokenKind::KwData)
        + token(TokenKind::Upper)
        + token(TokenKind::DoubleColon)
        + rules.ty.clone();
    let foreign_value =
        token(TokenKind::Lower) + token(TokenKind::DoubleColon) + rules.ty.clone();
    (token(TokenKind::KwForeign) + token(TokenKind::KwImport) + (foreign_data | foreign_value))
        .node(SyntaxKind::ForeignImportDecl)
}

/// `infixl 6 add as +`.
fn fixity() -> Parser {
    let keyword = choice([
        token(TokenKind::KwInfixl),
        token(TokenKind::KwInfixr),
        token(TokenKind::KwInfix),
    ]);
    (keyword
        + token(TokenKind::Int)
        + token(TokenKind::KwType).optional()
        + (names::var() | names::proper())
        + literal("as")
        + token(TokenKind::Operator))
    .node(SyntaxKind::FixityDecl)
}
