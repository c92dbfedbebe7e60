//! Which tokens drive layout.

use purist_ir::TokenKind;
use purist_layout::{LayoutAction, LayoutRules};

/// The layout table for Purist.
///
/// Names and strings are `Label`s because any of them may sit in a record
/// label position. `data` and `class` heads mask `|` and `where` until
/// their body starts.
pub fn layout_rules() -> LayoutRules {
    use LayoutAction as A;
    use TokenKind as T;
    LayoutRules::new()
        .with(T::Lower, A::Label)
        .with(T::String, A::Label)
        .with(T::RawString, A::Label)
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
        .with(T::LeftSquare, A::OpenSquare)
        .with(T::RightParen, A::CloseParen)
        .with(T::RightBrace, A::CloseBrace)
        .with(T::RightSquare, A::CloseSquare)
        .with(T::Operator, A::Operator)
}
