//! Layout fold state and its primitive moves.
//!
//! [`LayoutState`] pairs the current [`LayoutStack`] with the tokens emitted
//! so far. Each emitted token records the stack in force at that moment.
//! The driver in `crate::driver` decides, per token, which of the moves
//! below to make; the moves themselves know nothing about keywords.

use purist_ir::{RawToken, SourcePos};
use tracing::trace;

use crate::{LayoutDelimiter, LayoutStack, LayoutToken};

// Closing predicates take `(token position, frame position, frame delimiter)`.

/// Indent block whose column is strictly right of the token.
pub fn offside(tok: SourcePos, frame: SourcePos, delimiter: LayoutDelimiter) -> bool {
    delimiter.is_indent() && tok.column < frame.column
}

/// Indent block whose column is at or right of the token.
pub fn offside_end(tok: SourcePos, frame: SourcePos, delimiter: LayoutDelimiter) -> bool {
    delimiter.is_indent() && tok.column <= frame.column
}

/// Any indent block.
pub fn indented(_: SourcePos, _: SourcePos, delimiter: LayoutDelimiter) -> bool {
    delimiter.is_indent()
}

#[derive(Clone, Debug, Default)]
pub struct LayoutState {
    stack: LayoutStack,
    output: Vec<(LayoutToken, LayoutStack)>,
}

impl LayoutState {
    /// Empty output over a root-only stack.
    pub fn new() -> Self {
        LayoutState::default()
    }

    pub fn with_stack(stack: LayoutStack) -> Self {
        LayoutState {
            stack,
            output: Vec::new(),
        }
    }

    #[inline]
    pub fn stack(&self) -> &LayoutStack {
        &self.stack
    }

    pub fn output(&self) -> &[(LayoutToken, LayoutStack)] {
        &self.output
    }

    pub fn into_output(self) -> Vec<(LayoutToken, LayoutStack)> {
        self.output
    }

    pub fn push_stack(&mut self, pos: SourcePos, delimiter: LayoutDelimiter) {
        self.stack = self.stack.push(pos, delimiter);
    }

    /// Pop the top frame if it matches `pred`. The root is never popped.
    pub fn pop_stack(&mut self, pred: impl FnOnce(LayoutDelimiter) -> bool) {
        if !self.stack.is_root() && pred(self.stack.delimiter()) {
            self.stack = self.stack.pop();
        }
    }

    /// Emit `token` paired with the current stack.
    pub fn insert_token(&mut self, token: LayoutToken) {
        self.output.push((token, self.stack.clone()));
    }

    pub fn insert_end(&mut self, pos: SourcePos) {
        self.insert_token(LayoutToken::End(pos));
    }

    /// Emit a trivia token.
    ///
    /// Trivia is placed before any `Start` tokens at the tail of the output
    /// that point past it, so virtual tokens never precede the whitespace
    /// that sits in front of their position.
    pub fn insert_trivia(&mut self, token: RawToken) {
        let mut index = self.output.len();
        while index > 0 {
            match self.output[index - 1].0 {
                LayoutToken::Start(pos) if pos.offset >= token.span.end => index -= 1,
                _ => break,
            }
        }
        let stack = match index.checked_sub(1) {
            Some(prev) if index < self.output.len() => self.output[prev].1.clone(),
            _ => self.stack.clone(),
        };
        self.output.insert(index, (LayoutToken::Raw(token), stack));
    }

    /// Open an indent block of kind `delimiter` at `next_pos`, the position
    /// of the token following the block keyword.
    ///
    /// The block only opens when there is no enclosing indent block or when
    /// `next_pos` is strictly right of the nearest one; otherwise nothing
    /// happens and the parser sees the keyword without a block.
    pub fn insert_start(&mut self, next_pos: SourcePos, delimiter: LayoutDelimiter) {
        let opens = match self.stack.find(LayoutDelimiter::is_indent) {
            None => true,
            Some((pos, _)) => next_pos.column > pos.column,
        };
        if opens {
            trace!(?delimiter, pos = %next_pos, "open block");
            self.push_stack(next_pos, delimiter);
            self.insert_token(LayoutToken::Start(next_pos));
        }
    }

    /// Pop frames while `pred` holds, emitting an `End` at `pos` for each
    /// indent block popped. Each `End` records the stack after its pop.
    pub fn collapse(
        &mut self,
        pos: SourcePos,
        pred: impl Fn(SourcePos, SourcePos, LayoutDelimiter) -> bool,
    ) {
        while !self.stack.is_root() && pred(pos, self.stack.pos(), self.stack.delimiter()) {
            let delimiter = self.stack.delimiter();
            self.stack = self.stack.pop();
            if delimiter.is_indent() {
                self.insert_end(pos);
            }
        }
    }

    /// The stack [`collapse`](Self::collapse) would leave, without emitting.
    pub fn collapsed(
        &self,
        pos: SourcePos,
        pred: impl Fn(SourcePos, SourcePos, LayoutDelimiter) -> bool,
    ) -> LayoutStack {
        let mut stack = self.stack.clone();
        while !stack.is_root() && pred(pos, stack.pos(), stack.delimiter()) {
            stack = stack.pop();
        }
        stack
    }

    /// Emit a separator at `pos` if it is aligned with the top context on a
    /// later line.
    ///
    /// An aligned token ends a top-level declaration (popping its frame),
    /// starts a new `case` alternative (pushing fresh binders), or simply
    /// separates items of an indent block. Unaligned tokens and tokens on
    /// the block's first line get nothing.
    pub fn insert_sep(&mut self, pos: SourcePos) {
        let top = self.stack.pos();
        if pos.column != top.column || pos.line == top.line {
            return;
        }
        match self.stack.delimiter() {
            LayoutDelimiter::TopDecl | LayoutDelimiter::TopDeclHead => {
                self.stack = self.stack.pop();
                self.insert_token(LayoutToken::Sep(pos));
            }
            LayoutDelimiter::Of => {
                self.insert_token(LayoutToken::Sep(pos));
                self.push_stack(pos, LayoutDelimiter::CaseBinders);
            }
            delimiter if delimiter.is_indent() => {
                self.insert_token(LayoutToken::Sep(pos));
            }
            _ => {}
        }
    }

    /// The common case: close blocks the token is offside of, separate if
    /// it is aligned, then emit it.
    pub fn insert_default(&mut self, token: RawToken) {
        self.collapse(token.start, offside);
        self.insert_sep(token.start);
        self.insert_token(LayoutToken::Raw(token));
    }

    /// Emit a block keyword. Inside a record label position the keyword is
    /// just a label: it closes the label context instead of running `then`.
    pub fn insert_kw_property(&mut self, token: RawToken, then: impl FnOnce(&mut Self)) {
        if self.stack.delimiter() == LayoutDelimiter::Property {
            self.insert_default(token);
            self.pop_stack(|_| true);
        } else {
            self.insert_default(token);
            then(self);
        }
    }

    /// Close every remaining indent block at end of input.
    pub fn unwind(&mut self, eof: SourcePos) {
        while !self.stack.is_root() {
            let delimiter = self.stack.delimiter();
            self.stack = self.stack.pop();
            if delimiter.is_indent() {
                self.insert_end(eof);
            }
        }
    }
}
