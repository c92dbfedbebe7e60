//! Offside-rule layout for Purist.
//!
//! The layout pass sits between the lexer and the parser. It reads raw
//! tokens and inserts three zero-width virtual tokens that make the
//! indentation structure explicit:
//!
//! - `Start`: a block (`where`, `let`, `do`, `ado`, `of`) opened at the
//!   position of the token after the keyword
//! - `Sep`: a new item aligned with the enclosing block
//! - `End`: a block closed by dedent, by a closing token, or by end of input
//!
//! The pass is a left fold over significant tokens (see [`LayoutState`])
//! driven by a [`LayoutRules`] table the grammar supplies. Every `Start` is
//! matched by exactly one later `End`.

mod delimiter;
mod driver;
mod rules;
mod stack;
mod state;
mod token;

pub use delimiter::LayoutDelimiter;
pub use driver::{layout, LayoutOutput};
pub use rules::{LayoutAction, LayoutRules};
pub use stack::{Frames, LayoutStack};
pub use state::{indented, offside, offside_end, LayoutState};
pub use token::LayoutToken;
