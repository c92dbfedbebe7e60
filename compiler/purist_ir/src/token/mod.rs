//! Token kinds and raw tokens.
//!
//! `TokenKind` is a fieldless tag. The lexer never copies payload text into a
//! token: a [`RawToken`] carries its span and line/column coordinates, and
//! anything that needs identifier or literal text slices the source.

mod set;

pub use set::{format_name_list, TokenSet, TokenSetIterator};

use crate::{SourcePos, Span};

/// Discriminant tag for every token the front end knows about.
///
/// Values are dense and grouped by category:
///
/// | Range | Category |
/// |-------|----------|
/// | 0-3   | Trivia (never seen by layout or the parser) |
/// | 4-6   | Virtual layout tokens |
/// | 7-11  | Literals |
/// | 12-18 | Names, operators, holes |
/// | 19-43 | Keywords |
/// | 44-51 | Brackets and punctuation |
/// | 52-61 | Reserved symbols |
/// | 62-63 | Special |
///
/// # Invariant
///
/// All discriminants must be < 128 so a [`TokenSet`] fits in a `u128`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    // === Trivia ===
    Whitespace = 0,
    Newline = 1,
    LineComment = 2,
    BlockComment = 3,

    // === Layout ===
    LayoutStart = 4,
    LayoutSep = 5,
    LayoutEnd = 6,

    // === Literals ===
    Int = 7,
    Number = 8,
    String = 9,
    RawString = 10,
    Char = 11,

    // === Names ===
    Lower = 12,
    Upper = 13,
    QualifiedLower = 14,
    QualifiedUpper = 15,
    Operator = 16,
    Hole = 17,
    Underscore = 18,

    // === Keywords ===
    KwModule = 19,
    KwWhere = 20,
    KwImport = 21,
    KwData = 22,
    KwNewtype = 23,
    KwType = 24,
    KwClass = 25,
    KwInstance = 26,
    KwDerive = 27,
    KwForeign = 28,
    KwInfix = 29,
    KwInfixl = 30,
    KwInfixr = 31,
    KwLet = 32,
    KwIn = 33,
    KwDo = 34,
    KwAdo = 35,
    KwCase = 36,
    KwOf = 37,
    KwIf = 38,
    KwThen = 39,
    KwElse = 40,
    KwForall = 41,
    KwTrue = 42,
    KwFalse = 43,

    // === Brackets and punctuation ===
    LeftParen = 44,
    RightParen = 45,
    LeftBrace = 46,
    RightBrace = 47,
    LeftSquare = 48,
    RightSquare = 49,
    Comma = 50,
    Backtick = 51,

    // === Reserved symbols ===
    Equals = 52,
    DoubleColon = 53,
    Arrow = 54,
    LeftArrow = 55,
    FatArrow = 56,
    Pipe = 57,
    Backslash = 58,
    At = 59,
    Dot = 60,
    DotDot = 61,

    // === Special ===
    /// Lexically invalid input, kept so the token stream stays lossless.
    Unknown = 62,
    /// Never produced by the lexer; reported by the parser past the last token.
    Eof = 63,
}

const _: () = assert!(
    (TokenKind::Eof as u8) < 128,
    "TokenSet uses u128 bitset; all discriminant indices must be < 128"
);

impl TokenKind {
    /// Number of token kinds.
    pub const COUNT: usize = TokenKind::Eof as usize + 1;

    /// Every token kind, indexed by discriminant.
    pub const ALL: [TokenKind; Self::COUNT] = [
        TokenKind::Whitespace,
        TokenKind::Newline,
        TokenKind::LineComment,
        TokenKind::BlockComment,
        TokenKind::LayoutStart,
        TokenKind::LayoutSep,
        TokenKind::LayoutEnd,
        TokenKind::Int,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::RawString,
        TokenKind::Char,
        TokenKind::Lower,
        TokenKind::Upper,
        TokenKind::QualifiedLower,
        TokenKind::QualifiedUpper,
        TokenKind::Operator,
        TokenKind::Hole,
        TokenKind::Underscore,
        TokenKind::KwModule,
        TokenKind::KwWhere,
        TokenKind::KwImport,
        TokenKind::KwData,
        TokenKind::KwNewtype,
        TokenKind::KwType,
        TokenKind::KwClass,
        TokenKind::KwInstance,
        TokenKind::KwDerive,
        TokenKind::KwForeign,
        TokenKind::KwInfix,
        TokenKind::KwInfixl,
        TokenKind::KwInfixr,
        TokenKind::KwLet,
        TokenKind::KwIn,
        TokenKind::KwDo,
        TokenKind::KwAdo,
        TokenKind::KwCase,
        TokenKind::KwOf,
        TokenKind::KwIf,
        TokenKind::KwThen,
        TokenKind::KwElse,
        TokenKind::KwForall,
        TokenKind::KwTrue,
        TokenKind::KwFalse,
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::LeftBrace,
        TokenKind::RightBrace,
        TokenKind::LeftSquare,
        TokenKind::RightSquare,
        TokenKind::Comma,
        TokenKind::Backtick,
        TokenKind::Equals,
        TokenKind::DoubleColon,
        TokenKind::Arrow,
        TokenKind::LeftArrow,
        TokenKind::FatArrow,
        TokenKind::Pipe,
        TokenKind::Backslash,
        TokenKind::At,
        TokenKind::Dot,
        TokenKind::DotDot,
        TokenKind::Unknown,
        TokenKind::Eof,
    ];

    /// Dense index used by [`TokenSet`] and the parser's dispatch tables.
    #[inline]
    pub const fn discriminant_index(self) -> u8 {
        self as u8
    }

    /// Convert a discriminant index back into a kind.
    #[inline]
    pub fn from_discriminant_index(index: u8) -> Option<TokenKind> {
        Self::ALL.get(index as usize).copied()
    }

    /// Whitespace, newlines, and comments.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::Newline
                | TokenKind::LineComment
                | TokenKind::BlockComment
        )
    }

    /// Virtual tokens inserted by the layout pass.
    #[inline]
    pub const fn is_layout(self) -> bool {
        matches!(
            self,
            TokenKind::LayoutStart | TokenKind::LayoutSep | TokenKind::LayoutEnd
        )
    }

    #[inline]
    pub const fn is_keyword(self) -> bool {
        let index = self as u8;
        index >= TokenKind::KwModule as u8 && index <= TokenKind::KwFalse as u8
    }

    /// Look up a reserved word.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "module" => TokenKind::KwModule,
            "where" => TokenKind::KwWhere,
            "import" => TokenKind::KwImport,
            "data" => TokenKind::KwData,
            "newtype" => TokenKind::KwNewtype,
            "type" => TokenKind::KwType,
            "class" => TokenKind::KwClass,
            "instance" => TokenKind::KwInstance,
            "derive" => TokenKind::KwDerive,
            "foreign" => TokenKind::KwForeign,
            "infix" => TokenKind::KwInfix,
            "infixl" => TokenKind::KwInfixl,
            "infixr" => TokenKind::KwInfixr,
            "let" => TokenKind::KwLet,
            "in" => TokenKind::KwIn,
            "do" => TokenKind::KwDo,
            "ado" => TokenKind::KwAdo,
            "case" => TokenKind::KwCase,
            "of" => TokenKind::KwOf,
            "if" => TokenKind::KwIf,
            "then" => TokenKind::KwThen,
            "else" => TokenKind::KwElse,
            "forall" => TokenKind::KwForall,
            "true" => TokenKind::KwTrue,
            "false" => TokenKind::KwFalse,
            _ => return None,
        };
        Some(kind)
    }

    /// Look up a reserved symbol. Anything else made of symbol characters is
    /// an [`TokenKind::Operator`].
    pub fn reserved_symbol(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "=" => TokenKind::Equals,
            "::" | "∷" => TokenKind::DoubleColon,
            "->" | "→" => TokenKind::Arrow,
            "<-" | "←" => TokenKind::LeftArrow,
            "=>" | "⇒" => TokenKind::FatArrow,
            "|" => TokenKind::Pipe,
            "\\" => TokenKind::Backslash,
            "@" => TokenKind::At,
            "." => TokenKind::Dot,
            ".." => TokenKind::DotDot,
            "∀" => TokenKind::KwForall,
            _ => return None,
        };
        Some(kind)
    }

    /// Human-readable name, used in "expected ..." diagnostics.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Newline => "newline",
            TokenKind::LineComment => "line comment",
            TokenKind::BlockComment => "block comment",
            TokenKind::LayoutStart => "indented block",
            TokenKind::LayoutSep => "new line",
            TokenKind::LayoutEnd => "end of block",
            TokenKind::Int => "integer",
            TokenKind::Number => "number",
            TokenKind::String | TokenKind::RawString => "string",
            TokenKind::Char => "character",
            TokenKind::Lower => "identifier",
            TokenKind::Upper => "proper name",
            TokenKind::QualifiedLower => "qualified identifier",
            TokenKind::QualifiedUpper => "qualified proper name",
            TokenKind::Operator => "operator",
            TokenKind::Hole => "hole",
            TokenKind::Underscore => "_",
            TokenKind::KwModule => "module",
            TokenKind::KwWhere => "where",
            TokenKind::KwImport => "import",
            TokenKind::KwData => "data",
            TokenKind::KwNewtype => "newtype",
            TokenKind::KwType => "type",
            TokenKind::KwClass => "class",
            TokenKind::KwInstance => "instance",
            TokenKind::KwDerive => "derive",
            TokenKind::KwForeign => "foreign",
            TokenKind::KwInfix => "infix",
            TokenKind::KwInfixl => "infixl",
            TokenKind::KwInfixr => "infixr",
            TokenKind::KwLet => "let",
            TokenKind::KwIn => "in",
            TokenKind::KwDo => "do",
            TokenKind::KwAdo => "ado",
            TokenKind::KwCase => "case",
            TokenKind::KwOf => "of",
            TokenKind::KwIf => "if",
            TokenKind::KwThen => "then",
            TokenKind::KwElse => "else",
            TokenKind::KwForall => "forall",
            TokenKind::KwTrue => "true",
            TokenKind::KwFalse => "false",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftSquare => "[",
            TokenKind::RightSquare => "]",
            TokenKind::Comma => ",",
            TokenKind::Backtick => "`",
            TokenKind::Equals => "=",
            TokenKind::DoubleColon => "::",
            TokenKind::Arrow => "->",
            TokenKind::LeftArrow => "<-",
            TokenKind::FatArrow => "=>",
            TokenKind::Pipe => "|",
            TokenKind::Backslash => "\\",
            TokenKind::At => "@",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::Unknown => "invalid token",
            TokenKind::Eof => "end of file",
        }
    }
}

/// A token as produced by the lexer.
///
/// `start` and `end` are the line/column coordinates of `span.start` and
/// `span.end`. The layout pass reads `start`; the tree keeps `span`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RawToken {
    pub kind: TokenKind,
    pub span: Span,
    pub start: SourcePos,
    pub end: SourcePos,
}

impl RawToken {
    #[inline]
    pub const fn new(kind: TokenKind, start: SourcePos, end: SourcePos) -> Self {
        RawToken {
            kind,
            span: Span::new(start.offset, end.offset),
            start,
            end,
        }
    }

    /// The token's text in `source`.
    #[inline]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.span.to_range()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests;
