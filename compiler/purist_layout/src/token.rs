use std::fmt;

use purist_ir::{RawToken, SourcePos, Span, TokenKind};

/// A token of the layout-annotated stream.
///
/// Virtual tokens are zero-width and carry the position they were inserted
/// at; the parser sees them as [`TokenKind::LayoutStart`],
/// [`TokenKind::LayoutSep`], and [`TokenKind::LayoutEnd`].
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum LayoutToken {
    Start(SourcePos),
    Sep(SourcePos),
    End(SourcePos),
    Raw(RawToken),
}

impl LayoutToken {
    #[inline]
    pub fn kind(&self) -> TokenKind {
        match self {
            LayoutToken::Start(_) => TokenKind::LayoutStart,
            LayoutToken::Sep(_) => TokenKind::LayoutSep,
            LayoutToken::End(_) => TokenKind::LayoutEnd,
            LayoutToken::Raw(token) => token.kind,
        }
    }

    /// Start position of the token.
    #[inline]
    pub fn pos(&self) -> SourcePos {
        match self {
            LayoutToken::Start(pos) | LayoutToken::Sep(pos) | LayoutToken::End(pos) => *pos,
            LayoutToken::Raw(token) => token.start,
        }
    }

    #[inline]
    pub fn span(&self) -> Span {
        match self {
            LayoutToken::Start(pos) | LayoutToken::Sep(pos) | LayoutToken::End(pos) => {
                Span::point(pos.offset)
            }
            LayoutToken::Raw(token) => token.span,
        }
    }

    #[inline]
    pub fn is_virtual(&self) -> bool {
        !matches!(self, LayoutToken::Raw(_))
    }

    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.kind().is_trivia()
    }

    /// The token's text in `source`; empty for virtual tokens.
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        match self {
            LayoutToken::Raw(token) => token.text(source),
            _ => "",
        }
    }
}

impl fmt::Debug for LayoutToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutToken::Start(pos) => write!(f, "{{@{pos}"),
            LayoutToken::Sep(pos) => write!(f, ";@{pos}"),
            LayoutToken::End(pos) => write!(f, "}}@{pos}"),
            LayoutToken::Raw(token) => write!(f, "{:?}@{}", token.kind, token.start),
        }
    }
}
