//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`layout`]: Row layout of blocks in the document pane
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Themes and colors

pub mod layout;
pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use overlays::{help_max_scroll, menu_content_top, menu_rect};
pub use render::{column_left, render};

#[cfg(test)]
mod tests;
