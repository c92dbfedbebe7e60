//! Purist IR - shared front-end vocabulary.
//!
//! This crate contains the value types every other front-end crate speaks:
//! - Spans and source positions
//! - Token kinds, raw tokens, and token sets
//! - Syntax kinds used to tag tree nodes
//!
//! Everything here is `Copy` (or cheaply cloned) and immutable once built.
//! Token payloads are never stored: identifier text and literal values are
//! recovered from the source through the token span.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod position;
mod span;
mod syntax_kind;
mod token;

pub use position::SourcePos;
pub use span::{Span, SpanError};
pub use syntax_kind::SyntaxKind;
pub use token::{format_name_list, RawToken, TokenKind, TokenSet, TokenSetIterator};
