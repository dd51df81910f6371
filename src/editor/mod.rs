//! In-block text editing.
//!
//! A rope-backed working buffer for the active block, plus the pure
//! list-aware interpreters for Tab, Enter and the arrow keys.

mod buffer;
pub mod keys;
pub mod list;

pub use buffer::{Direction, EditorBuffer, Selection};
pub use keys::{EnterAction, IndentResult, Splice};
pub use list::{IndentDirection, ListLineMatch, MarkerKind};
