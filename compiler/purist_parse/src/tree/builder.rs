//! Replay parse events into a [`SyntaxNode`].
//!
//! Trivia between significant tokens is attached where it appears: before a
//! token it joins that token's node, before a node it stays in the parent.
//! Trivia after the last significant token lands in the root.

use std::mem;

use purist_diagnostic::Diagnostic;
use purist_ir::{Span, SyntaxKind};
use purist_layout::LayoutToken;

use super::{SyntaxElement, SyntaxNode, SyntaxToken};
use crate::cursor::Cursor;
use crate::event::Event;

pub(crate) fn build(mut events: Vec<Event>, cursor: &Cursor<'_>) -> (SyntaxNode, Vec<Diagnostic>) {
    let mut builder = Builder {
        cursor,
        tokens: cursor.tokens(),
        next_raw: 0,
        stack: Vec::new(),
        finished: None,
        diagnostics: Vec::new(),
    };
    let mut forward_kinds: Vec<SyntaxKind> = Vec::new();

    for i in 0..events.len() {
        match mem::replace(&mut events[i], Event::TOMBSTONE) {
            Event::Start {
                kind: Some(kind),
                forward_parent,
            } => {
                forward_kinds.push(kind);
                let mut idx = i;
                let mut link = forward_parent;
                while let Some(distance) = link {
                    idx += distance as usize;
                    link = match events.get_mut(idx).map(|e| mem::replace(e, Event::TOMBSTONE)) {
                        Some(Event::Start {
                            kind,
                            forward_parent,
                        }) => {
                            forward_kinds.extend(kind);
                            forward_parent
                        }
                        _ => None,
                    };
                }
                for kind in forward_kinds.drain(..).rev() {
                    builder.start_node(kind);
                }
            }
            Event::Start { kind: None, .. } => {}
            Event::Finish => builder.finish_node(),
            Event::Token { pos } => builder.token(pos as usize),
            Event::Error(diagnostic) => builder.diagnostics.push(*diagnostic),
        }
    }

    while !builder.stack.is_empty() {
        builder.finish_node();
    }
    let root = builder.finished.take().unwrap_or_else(|| SyntaxNode {
        kind: SyntaxKind::Root,
        span: Span::point(0),
        children: Vec::new(),
    });
    (root, builder.diagnostics)
}

struct Builder<'c, 'src> {
    cursor: &'c Cursor<'src>,
    tokens: &'src [LayoutToken],
    /// Index of the first raw token not yet placed in the tree.
    next_raw: usize,
    stack: Vec<(SyntaxKind, Vec<SyntaxElement>)>,
    finished: Option<SyntaxNode>,
    diagnostics: Vec<Diagnostic>,
}

impl Builder<'_, '_> {
    fn start_node(&mut self, kind: SyntaxKind) {
        if !self.stack.is_empty() {
            self.flush_trivia();
        }
        self.stack.push((kind, Vec::new()));
    }

    fn finish_node(&mut self) {
        if self.stack.len() == 1 {
            self.flush_rest();
        }
        let Some((kind, children)) = self.stack.pop() else {
            return;
        };
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => Span::new(first.span().start, last.span().end),
            _ => Span::point(self.current_offset()),
        };
        let node = SyntaxNode {
            kind,
            span,
            children,
        };
        match self.stack.last_mut() {
            Some((_, parent)) => parent.push(SyntaxElement::Node(node)),
            None => self.finished = Some(node),
        }
    }

    fn token(&mut self, pos: usize) {
        let Some(raw) = self.cursor.raw_index(pos) else {
            return;
        };
        while self.next_raw <= raw {
            self.push_raw(self.next_raw);
            self.next_raw += 1;
        }
    }

    fn flush_trivia(&mut self) {
        while self
            .tokens
            .get(self.next_raw)
            .is_some_and(LayoutToken::is_trivia)
        {
            self.push_raw(self.next_raw);
            self.next_raw += 1;
        }
    }

    fn flush_rest(&mut self) {
        while self.next_raw < self.tokens.len() {
            self.push_raw(self.next_raw);
            self.next_raw += 1;
        }
    }

    fn push_raw(&mut self, index: usize) {
        let Some(token) = self.tokens.get(index) else {
            return;
        };
        let leaf = SyntaxToken {
            kind: token.kind(),
            span: token.span(),
        };
        if let Some((_, children)) = self.stack.last_mut() {
            children.push(SyntaxElement::Token(leaf));
        }
    }

    fn current_offset(&self) -> u32 {
        self.tokens
            .get(self.next_raw)
            .map_or(self.cursor.end_offset(), |t| t.span().start)
    }
}
