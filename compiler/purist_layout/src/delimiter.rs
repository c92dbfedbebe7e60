//! Why a layout context was opened.

/// The reason a frame sits on the layout stack.
///
/// Indent contexts (`is_indent() == true`) are blocks whose reference column
/// governs alignment: they are closed by dedenting and receive separators.
/// The rest are masks that change how particular tokens behave while they
/// are open (for example `|` inside a `case` alternative, or `.` inside a
/// `forall`) and are closed by specific tokens, never by column.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LayoutDelimiter {
    /// Bottom sentinel; never popped.
    Root,
    /// A top-level declaration.
    TopDecl,
    /// A top-level `data` or `class` head, up to its `where` or `=`.
    TopDeclHead,
    /// A guard in a `let`/`where` binding, up to its `=`.
    DeclGuard,
    /// `case` head, up to `of`.
    Case,
    /// Binders of a `case` alternative, up to `->` or `|`.
    CaseBinders,
    /// Guard of a `case` alternative, up to `->`.
    CaseGuard,
    /// Lambda binders, up to `->`.
    LambdaBinders,
    Paren,
    Brace,
    Square,
    If,
    Then,
    /// A record label position, where keywords are plain labels.
    Property,
    /// `forall` binders, up to `.`.
    Forall,
    /// Backtick operator section, up to the closing backtick.
    Tick,
    Let,
    /// `let` block directly inside a `do` or `ado` block.
    LetStmt,
    Where,
    Of,
    Do,
    Ado,
}

impl LayoutDelimiter {
    /// Whether this context's column governs alignment.
    #[inline]
    pub const fn is_indent(self) -> bool {
        matches!(
            self,
            LayoutDelimiter::Let
                | LayoutDelimiter::LetStmt
                | LayoutDelimiter::Where
                | LayoutDelimiter::Of
                | LayoutDelimiter::Do
                | LayoutDelimiter::Ado
        )
    }
}
