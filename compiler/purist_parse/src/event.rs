//! Flat tree-building events.
//!
//! Parsers do not build nodes directly. They append events to the context,
//! which a transaction can roll back by truncation, and the tree builder
//! replays the surviving events once parsing is done.

use purist_diagnostic::Diagnostic;
use purist_ir::SyntaxKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    /// Open a node. `kind` is `None` for a marker that is still pending or
    /// was abandoned. `forward_parent` is the distance to the `Start` of a
    /// node that must wrap this one (see `CompletedMarker::precede`).
    Start {
        kind: Option<SyntaxKind>,
        forward_parent: Option<u32>,
    },
    Finish,
    /// Consume the significant token at this cursor position.
    Token { pos: u32 },
    Error(Box<Diagnostic>),
}

impl Event {
    pub(crate) const TOMBSTONE: Event = Event::Start {
        kind: None,
        forward_parent: None,
    };
}
