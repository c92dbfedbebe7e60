//! Tags for syntax tree nodes.

/// The kind of an interior syntax tree node.
///
/// Leaves are tagged with [`TokenKind`](crate::TokenKind); every node
/// opened by the grammar carries one of these.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    /// Root of every tree: the entry node plus any leftover input.
    Root,
    /// A module header followed by its declarations.
    Module,
    /// Skipped or unparseable input.
    Error,

    // === Module structure ===
    ModuleHeader,
    ModuleName,
    ExportList,
    Export,
    ImportDecl,
    ImportList,
    ImportItem,
    ImportAlias,
    QualifiedName,

    // === Declarations ===
    ValueDecl,
    Signature,
    DataDecl,
    DataCtor,
    NewtypeDecl,
    TypeSynonymDecl,
    ClassDecl,
    ClassMembers,
    InstanceDecl,
    InstanceMembers,
    DeriveDecl,
    ForeignImportDecl,
    FixityDecl,
    GuardedExpr,
    Guard,
    WhereBlock,

    // === Expressions ===
    ExprVar,
    ExprConstructor,
    ExprOperatorName,
    ExprLiteral,
    ExprHole,
    ExprSection,
    ExprParens,
    ExprArray,
    ExprRecord,
    RecordField,
    ExprRecordAccess,
    ExprRecordUpdate,
    ExprApp,
    ExprTypeApp,
    ExprNegate,
    ExprOperatorChain,
    ExprBacktick,
    ExprTyped,
    ExprLambda,
    ExprIf,
    ExprCase,
    CaseBranch,
    ExprLet,
    LetBindings,
    ExprDo,
    ExprAdo,
    DoBind,
    DoLet,
    DoDiscard,

    // === Binders ===
    BinderVar,
    BinderWildcard,
    BinderLiteral,
    BinderConstructor,
    BinderNamed,
    BinderRecord,
    BinderArray,
    BinderParens,
    BinderTyped,

    // === Types ===
    TypeVar,
    TypeConstructor,
    TypeWildcard,
    TypeHole,
    TypeParens,
    TypeApp,
    TypeArrow,
    TypeConstrained,
    TypeForall,
    TypeVarBinding,
    TypeRecord,
    TypeRow,
    RowField,
    TypeKinded,
    TypeStringLiteral,
}

impl SyntaxKind {
    /// Nodes produced by the expression grammar.
    pub fn is_expr(self) -> bool {
        (self as u16) >= (SyntaxKind::ExprVar as u16) && (self as u16) <= (SyntaxKind::DoDiscard as u16)
    }

    /// Nodes produced by the type grammar.
    pub fn is_type(self) -> bool {
        (self as u16) >= (SyntaxKind::TypeVar as u16)
    }
}
