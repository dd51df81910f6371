// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorBuffer)
    clippy::module_name_repetitions
)]

//! # Blockdown
//!
//! A block-structured markdown editor for the terminal.
//!
//! Each paragraph, heading or list is an independently editable block.
//! Idle blocks are rendered as formatted markdown; the focused block shows
//! its raw text with a caret and selection, plus list-aware Tab and Enter.
//!
//! ## Architecture
//!
//! Blockdown uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: The block store, serialization and block rendering
//! - [`editor`]: The working copy of the active block and keystroke logic
//! - [`io`]: Opening and saving files
//! - [`config`]: rc-file flags and display settings
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod io;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{Block, BlockId, Document};
    pub use crate::editor::{EditorBuffer, Selection};
    pub use crate::ui::viewport::Viewport;
}
