//! Parse context: cursor, transactions, and tree events.
//!
//! A [`ParseContext`] owns everything a single parse mutates. Parsers
//! consume tokens through it and describe the tree as a flat list of events.
//!
//! # Transactions
//!
//! [`ParseContext::start`] opens a checkpoint. Exactly one of
//! [`Transaction::commit`] or [`Transaction::rollback`] must close it, in
//! LIFO order with respect to other open transactions. Rollback restores the
//! cursor and truncates the event list, which removes every node, token and
//! diagnostic recorded since the checkpoint.
//!
//! # Markers
//!
//! [`ParseContext::mark`] opens a tentative node. [`Marker::complete`] tags
//! it, [`Marker::abandon`] drops it and hands its children to the enclosing
//! node. [`CompletedMarker::precede`] wraps an already completed node in a
//! new one, which is how left-associative chains are built without
//! recursion.

use drop_bomb::{DebugDropBomb, DropBomb};
use purist_diagnostic::Diagnostic;
use purist_ir::{Span, SyntaxKind, TokenKind};
use purist_layout::LayoutToken;

use crate::cursor::Cursor;
use crate::event::Event;

pub struct ParseContext<'src> {
    cursor: Cursor<'src>,
    events: Vec<Event>,
    /// Ids of open transactions, innermost last.
    open: Vec<u32>,
    next_id: u32,
    in_attempt: bool,
}

impl<'src> ParseContext<'src> {
    pub fn new(source: &'src str, tokens: &'src [LayoutToken]) -> Self {
        ParseContext {
            cursor: Cursor::new(source, tokens),
            events: Vec::new(),
            open: Vec::new(),
            next_id: 0,
            in_attempt: false,
        }
    }

    // --- Cursor ---

    /// Index of the current token in the significant token sequence.
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    /// Kind of the significant token `n` places ahead of the current one.
    #[inline]
    pub fn nth_kind(&self, n: usize) -> TokenKind {
        self.cursor.peek_kind_at(n)
    }

    #[inline]
    pub fn at(&self, kind: TokenKind) -> bool {
        self.cursor.current_kind() == kind
    }

    /// Text of the current token without consuming it.
    #[inline]
    pub fn text(&self) -> &'src str {
        self.cursor.text()
    }

    #[inline]
    pub fn eof(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    /// Source text of the significant tokens between two positions.
    pub fn text_between(&self, start: usize, end: usize) -> &'src str {
        self.cursor.text_between(start, end)
    }

    /// Span of the significant tokens between two positions; a point span
    /// at the current token when nothing lies between them.
    pub fn span_between(&self, start: usize, end: usize) -> Span {
        match (self.cursor.get(start), end.checked_sub(1).and_then(|e| self.cursor.get(e))) {
            (Some(first), Some(last)) if end > start => first.span().merge(last.span()),
            _ => Span::point(self.current_span().start),
        }
    }

    pub(crate) fn cursor(&self) -> &Cursor<'src> {
        &self.cursor
    }

    /// Consume the current token into the tree. No-op at the end.
    pub fn advance(&mut self) {
        if self.cursor.is_at_end() {
            return;
        }
        self.push_token_event();
        self.cursor.advance();
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume one token, or a whole `LayoutStart ... LayoutEnd` block when
    /// the current token opens one. Returns whether anything was consumed.
    pub fn skip_token_tree(&mut self) -> bool {
        if self.eof() {
            return false;
        }
        let mut depth = 0usize;
        loop {
            match self.current_kind() {
                TokenKind::LayoutStart => depth += 1,
                TokenKind::LayoutEnd => depth = depth.saturating_sub(1),
                TokenKind::Eof => return true,
                _ => {}
            }
            self.advance();
            if depth == 0 {
                return true;
            }
        }
    }

    fn push_token_event(&mut self) {
        let pos = u32::try_from(self.cursor.position()).unwrap_or(u32::MAX);
        self.events.push(Event::Token { pos });
    }

    // --- Attempt flag ---

    /// Whether evaluation is inside an `attempt`. Recovery combinators do
    /// not recover while this is set.
    #[inline]
    pub fn in_attempt(&self) -> bool {
        self.in_attempt
    }

    /// Set the attempt flag, returning the previous value.
    pub fn set_in_attempt(&mut self, value: bool) -> bool {
        std::mem::replace(&mut self.in_attempt, value)
    }

    // --- Diagnostics ---

    /// Record a diagnostic. It is stored with the tree events, so a
    /// rollback past this point erases it.
    pub fn error(&mut self, diagnostic: Diagnostic) {
        self.events.push(Event::Error(Box::new(diagnostic)));
    }

    // --- Transactions ---

    /// Open a checkpoint.
    pub fn start(&mut self) -> Transaction {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.open.push(id);
        Transaction {
            id,
            position: self.cursor.position(),
            events_len: self.events.len(),
            bomb: DebugDropBomb::new("transaction must be committed or rolled back"),
        }
    }

    /// Number of open transactions.
    pub fn open_transactions(&self) -> usize {
        self.open.len()
    }

    fn close(&mut self, id: u32) {
        let innermost = self.open.pop();
        debug_assert_eq!(
            innermost,
            Some(id),
            "transactions must be closed in LIFO order"
        );
    }

    // --- Markers ---

    /// Open a tentative node at the current position.
    pub fn mark(&mut self) -> Marker {
        let pos = u32::try_from(self.events.len()).unwrap_or(u32::MAX);
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    #[cfg(test)]
    pub(crate) fn events(&self) -> &[Event] {
        &self.events
    }

    pub(crate) fn finish(self) -> (Cursor<'src>, Vec<Event>) {
        (self.cursor, self.events)
    }
}

/// An open checkpoint. See the module docs.
#[must_use = "a transaction must be committed or rolled back"]
pub struct Transaction {
    id: u32,
    position: usize,
    events_len: usize,
    bomb: DebugDropBomb,
}

impl Transaction {
    /// Cursor position when the transaction was opened.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Keep everything parsed since the checkpoint.
    pub fn commit(mut self, ctx: &mut ParseContext<'_>) {
        self.bomb.defuse();
        ctx.close(self.id);
    }

    /// Restore the cursor and discard every event since the checkpoint.
    pub fn rollback(mut self, ctx: &mut ParseContext<'_>) {
        self.bomb.defuse();
        ctx.close(self.id);
        let discarded = ctx.events.len().saturating_sub(self.events_len);
        if discarded > 0 || ctx.cursor.position() != self.position {
            tracing::trace!(
                from = ctx.cursor.position(),
                to = self.position,
                discarded,
                "rollback"
            );
        }
        ctx.events.truncate(self.events_len);
        ctx.cursor.set_position(self.position);
    }
}

/// A node that has been opened but not yet tagged.
#[must_use = "a marker must be completed or abandoned"]
pub struct Marker {
    pos: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Self {
        Marker {
            pos,
            bomb: DropBomb::new("marker must be completed or abandoned"),
        }
    }

    /// Tag the node and close it after everything parsed since `mark`.
    pub fn complete(mut self, ctx: &mut ParseContext<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();
        if let Some(Event::Start { kind: slot, .. }) = ctx.events.get_mut(self.pos as usize) {
            *slot = Some(kind);
        }
        ctx.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }

    /// Drop the node. Anything parsed since `mark` stays in the parent.
    pub fn abandon(mut self, ctx: &mut ParseContext<'_>) {
        self.bomb.defuse();
        if self.pos as usize + 1 == ctx.events.len() {
            ctx.events.pop();
        }
    }
}

/// A tagged node that can still be wrapped by a later one.
#[derive(Clone, Copy, Debug)]
pub struct CompletedMarker {
    pos: u32,
}

impl CompletedMarker {
    /// Open a node that will become the parent of this one.
    ///
    /// The returned marker must be completed, not abandoned: the completed
    /// node records a forward link to it.
    pub fn precede(self, ctx: &mut ParseContext<'_>) -> Marker {
        let parent = ctx.mark();
        if let Some(Event::Start { forward_parent, .. }) = ctx.events.get_mut(self.pos as usize) {
            *forward_parent = Some(parent.pos - self.pos);
        }
        parent
    }
}

#[cfg(test)]
mod tests;
