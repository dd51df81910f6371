//! The block-structured document.
//!
//! This module handles:
//! - Splitting markdown into blocks and joining it back
//! - Tracking which block is being edited
//! - Rendering a block to styled lines for display

mod blocks;
mod render;
mod types;

pub use blocks::{Block, BlockId, CommitOutcome, Document, Neighbor};
pub use render::{EMPTY_BLOCK_PLACEHOLDER, render_block};
pub use types::{InlineSpan, InlineStyle, LineType, RenderedLine};

/// File name used until the document is opened or saved.
pub const DEFAULT_FILE_NAME: &str = "Untitled.md";

/// Text of a block added with the add-block key.
pub const NEW_BLOCK_TEXT: &str = "New block";

/// The document shown when no file is given.
pub fn welcome() -> Document {
    Document::from_blocks([
        "# Welcome to blockdown\n\nThis is a markdown editor that works like Obsidian. Select any block and press Enter, or click it, to edit it.",
        "## Features\n\n- Inline editing\n- Markdown preview\n- Support for **bold**, *italic*, and [links](https://example.com)\n- Lists and checkboxes",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_has_two_clean_blocks() {
        let doc = welcome();
        assert_eq!(doc.len(), 2);
        assert!(!doc.is_dirty());
        assert!(doc.blocks()[0].text().starts_with("# Welcome to blockdown"));
        assert!(doc.blocks()[1].text().starts_with("## Features"));
    }

    #[test]
    fn test_welcome_blocks_render() {
        let doc = welcome();
        let lines = render_block(doc.blocks()[1].text(), 60);
        assert_eq!(lines[0].content(), "## Features");
        assert!(lines.iter().any(|l| l.content() == "• Inline editing"));
    }
}
