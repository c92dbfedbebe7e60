//! Token-to-action table driving the layout pass.
//!
//! The engine knows how to open, separate, and close contexts; the grammar
//! decides which tokens do what. A table entry is looked up per significant
//! token, so which words are keywords is entirely the grammar's business.

use purist_ir::TokenKind;

/// What the layout pass does when it meets a token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum LayoutAction {
    /// Close offside blocks, separate if aligned, emit.
    #[default]
    Default,
    /// Like `Default`, then close a pending record-label context. Used for
    /// identifiers and strings that may be labels.
    Label,
    /// A declaration head that masks `|` (`data`, `class`).
    DeclHead,
    /// Opens a `Where` block, closing `do` blocks and aligned blocks first.
    Where,
    /// Closes the nearest `let`/`ado` block.
    In,
    /// Opens a `Let` block, or a `LetStmt` block directly inside `do`/`ado`.
    Let,
    Do,
    Ado,
    Case,
    Of,
    If,
    Then,
    Else,
    Forall,
    Backslash,
    /// `->`: ends case binders, guards, and lambda binders.
    Arrow,
    /// `=`: ends a declaration guard.
    Equals,
    /// `|`: opens a guard context.
    Pipe,
    /// Backtick: opens or closes an infix section.
    Tick,
    Comma,
    /// `.`: ends `forall` binders or starts a record access label.
    Dot,
    OpenParen,
    OpenBrace,
    OpenSquare,
    CloseParen,
    CloseBrace,
    CloseSquare,
    /// Binary operator: closes blocks at or past its column before it.
    Operator,
}

/// A total map from [`TokenKind`] to [`LayoutAction`].
///
/// Kinds without an explicit entry use [`LayoutAction::Default`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LayoutRules {
    actions: [LayoutAction; TokenKind::COUNT],
}

impl LayoutRules {
    pub const fn new() -> Self {
        LayoutRules {
            actions: [LayoutAction::Default; TokenKind::COUNT],
        }
    }

    /// Builder form of [`LayoutRules::set`].
    #[must_use]
    pub const fn with(mut self, kind: TokenKind, action: LayoutAction) -> Self {
        self.actions[kind.discriminant_index() as usize] = action;
        self
    }

    pub fn set(&mut self, kind: TokenKind, action: LayoutAction) {
        self.actions[kind.discriminant_index() as usize] = action;
    }

    #[inline]
    pub fn action(&self, kind: TokenKind) -> LayoutAction {
        self.actions[kind.discriminant_index() as usize]
    }

    /// Kinds with a non-default action, in discriminant order.
    pub fn entries(&self) -> impl Iterator<Item = (TokenKind, LayoutAction)> + '_ {
        TokenKind::ALL
            .iter()
            .map(|&kind| (kind, self.action(kind)))
            .filter(|&(_, action)| action != LayoutAction::Default)
    }
}

impl Default for LayoutRules {
    fn default() -> Self {
        LayoutRules::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unlisted_kinds_default() {
        let rules = LayoutRules::new().with(TokenKind::KwDo, LayoutAction::Do);
        assert_eq!(rules.action(TokenKind::KwDo), LayoutAction::Do);
        assert_eq!(rules.action(TokenKind::KwAdo), LayoutAction::Default);
        assert_eq!(
            rules.entries().collect::<Vec<_>>(),
            vec![(TokenKind::KwDo, LayoutAction::Do)]
        );
    }

    #[test]
    fn test_set_overrides() {
        let mut rules = LayoutRules::default();
        rules.set(TokenKind::Lower, LayoutAction::Label);
        rules.set(TokenKind::Lower, LayoutAction::Default);
        assert_eq!(rules.entries().count(), 0);
    }
}
