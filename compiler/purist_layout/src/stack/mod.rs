//! Persistent layout stack.
//!
//! Every token in the layout output records the stack that was in force
//! when it was emitted, so stacks are shared, never copied: a push allocates
//! one frame pointing at the previous stack, and a pop is a pointer move.

use std::fmt;
use std::sync::Arc;

use purist_ir::SourcePos;

use crate::LayoutDelimiter;

struct Frame {
    pos: SourcePos,
    delimiter: LayoutDelimiter,
    tail: Option<LayoutStack>,
}

/// An immutable stack of layout contexts, bottomed by a root sentinel.
///
/// A stack is "at root" when its top frame is the sentinel, i.e. it has no
/// tail. Popping the root yields the root again.
#[derive(Clone)]
pub struct LayoutStack(Arc<Frame>);

impl LayoutStack {
    /// A stack holding only the root sentinel.
    pub fn root() -> Self {
        LayoutStack(Arc::new(Frame {
            pos: SourcePos::new(0, 0, 0),
            delimiter: LayoutDelimiter::Root,
            tail: None,
        }))
    }

    #[must_use]
    pub fn push(&self, pos: SourcePos, delimiter: LayoutDelimiter) -> Self {
        LayoutStack(Arc::new(Frame {
            pos,
            delimiter,
            tail: Some(self.clone()),
        }))
    }

    /// The stack without its top frame; the root pops to itself.
    #[must_use]
    pub fn pop(&self) -> Self {
        self.tail().cloned().unwrap_or_else(|| self.clone())
    }

    #[inline]
    pub fn tail(&self) -> Option<&LayoutStack> {
        self.0.tail.as_ref()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.tail.is_none()
    }

    /// Position of the top frame.
    #[inline]
    pub fn pos(&self) -> SourcePos {
        self.0.pos
    }

    /// Delimiter of the top frame.
    #[inline]
    pub fn delimiter(&self) -> LayoutDelimiter {
        self.0.delimiter
    }

    /// Frames from the top down, root included.
    pub fn iter(&self) -> Frames<'_> {
        Frames { next: Some(self) }
    }

    /// The topmost frame satisfying `pred`.
    pub fn find(
        &self,
        mut pred: impl FnMut(LayoutDelimiter) -> bool,
    ) -> Option<(SourcePos, LayoutDelimiter)> {
        self.iter().find(|&(_, delimiter)| pred(delimiter))
    }

    /// Number of frames above the root.
    pub fn depth(&self) -> usize {
        self.iter().count() - 1
    }

    /// Whether `pos` starts a top-level declaration: the stack is exactly a
    /// `Where` block over the root and `pos` sits at that block's column.
    pub fn is_top_decl(&self, pos: SourcePos) -> bool {
        self.delimiter() == LayoutDelimiter::Where
            && self.tail().is_some_and(LayoutStack::is_root)
            && self.pos().column == pos.column
    }

    /// Identity comparison; two stacks built by separate pushes of the same
    /// frames are not the same stack.
    #[inline]
    pub fn ptr_eq(&self, other: &LayoutStack) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for LayoutStack {
    fn default() -> Self {
        LayoutStack::root()
    }
}

// Unlink frames iteratively so dropping a deep, uniquely owned stack does
// not recurse once per frame.
impl Drop for LayoutStack {
    fn drop(&mut self) {
        let mut next = Arc::get_mut(&mut self.0).and_then(|frame| frame.tail.take());
        while let Some(mut stack) = next {
            next = Arc::get_mut(&mut stack.0).and_then(|frame| frame.tail.take());
        }
    }
}

impl PartialEq for LayoutStack {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.iter().eq(other.iter())
    }
}

impl Eq for LayoutStack {}

impl fmt::Debug for LayoutStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.iter()
                    .map(|(pos, delimiter)| format!("{delimiter:?}@{pos}")),
            )
            .finish()
    }
}

/// Iterator over `(position, delimiter)` pairs from the top of the stack.
pub struct Frames<'a> {
    next: Option<&'a LayoutStack>,
}

impl Iterator for Frames<'_> {
    type Item = (SourcePos, LayoutDelimiter);

    fn next(&mut self) -> Option<Self::Item> {
        let stack = self.next?;
        self.next = stack.tail();
        Some((stack.pos(), stack.delimiter()))
    }
}

#[cfg(test)]
mod tests;
