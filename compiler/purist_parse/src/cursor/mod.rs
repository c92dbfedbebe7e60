//! Token cursor over the layout stream.
//!
//! The cursor walks significant tokens only. Positions are indices into the
//! significant sequence, so comparing two positions tells whether anything
//! was consumed between them. Trivia stays in the underlying slice for the
//! tree builder.

use purist_ir::{SourcePos, Span, TokenKind};
use purist_layout::LayoutToken;

pub struct Cursor<'a> {
    source: &'a str,
    tokens: &'a [LayoutToken],
    /// Indices into `tokens` of the non-trivia tokens.
    significant: Vec<u32>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str, tokens: &'a [LayoutToken]) -> Self {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_trivia())
            .filter_map(|(i, _)| u32::try_from(i).ok())
            .collect();
        Cursor {
            source,
            tokens,
            significant,
            pos: 0,
        }
    }

    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// All tokens, trivia included.
    #[inline]
    pub fn tokens(&self) -> &'a [LayoutToken] {
        self.tokens
    }

    /// Number of significant tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.significant.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.significant.is_empty()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(
            pos <= self.significant.len(),
            "cursor position {pos} out of bounds (max {})",
            self.significant.len()
        );
        self.pos = pos;
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.significant.len()
    }

    /// The significant token at `pos`, if any.
    pub fn get(&self, pos: usize) -> Option<&'a LayoutToken> {
        let index = *self.significant.get(pos)?;
        self.tokens.get(index as usize)
    }

    /// Index into [`tokens`](Self::tokens) of the significant token at `pos`.
    pub fn raw_index(&self, pos: usize) -> Option<usize> {
        self.significant.get(pos).map(|&i| i as usize)
    }

    #[inline]
    pub fn current(&self) -> Option<&'a LayoutToken> {
        self.get(self.pos)
    }

    /// Kind of the current token; [`TokenKind::Eof`] past the end.
    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().map_or(TokenKind::Eof, LayoutToken::kind)
    }

    pub fn peek_kind_at(&self, n: usize) -> TokenKind {
        self.get(self.pos + n).map_or(TokenKind::Eof, LayoutToken::kind)
    }

    /// Span of the current token, or an empty span at end of input.
    pub fn current_span(&self) -> Span {
        match self.current() {
            Some(token) => token.span(),
            None => Span::point(self.end_offset()),
        }
    }

    pub fn current_pos(&self) -> Option<SourcePos> {
        self.current().map(LayoutToken::pos)
    }

    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|p| self.get(p)) {
            Some(token) => token.span(),
            None => Span::DUMMY,
        }
    }

    /// Text of the current token; empty for virtual tokens and at the end.
    pub fn text(&self) -> &'a str {
        self.current().map_or("", |t| t.text(self.source))
    }

    /// Step past the current token. No-op at the end.
    pub fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    /// Source text covering the significant tokens in `start..end`.
    pub fn text_between(&self, start: usize, end: usize) -> &'a str {
        if end <= start {
            return "";
        }
        match (self.get(start), self.get(end - 1)) {
            (Some(first), Some(last)) => {
                let span = first.span().merge(last.span());
                self.source.get(span.to_range()).unwrap_or("")
            }
            _ => "",
        }
    }

    /// Byte offset of the end of input.
    pub fn end_offset(&self) -> u32 {
        u32::try_from(self.source.len()).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests;
