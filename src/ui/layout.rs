//! Row layout of the document pane.
//!
//! Every block occupies a contiguous run of rows: formatted lines when idle,
//! raw wrapped text when it is being edited. Blocks are separated by
//! `block_spacing` blank rows. The layout is rebuilt after every update and
//! drives scrolling, mouse hit-testing and drawing.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use crate::document::{BlockId, Document, RenderedLine, render_block};
use crate::editor::EditorBuffer;

/// One screen row of raw text in the block being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRow {
    /// Char offset of the first char of this row in the working text.
    pub start: usize,
    pub text: String,
    /// The row ends at a line feed (or the end of the text) rather than a wrap.
    pub ends_line: bool,
}

impl EditRow {
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the caret at `pos` is drawn on this row.
    pub fn holds_caret(&self, pos: usize) -> bool {
        let end = self.start + self.len_chars();
        pos >= self.start && (pos < end || (self.ends_line && pos == end))
    }

    /// Display column of char offset `pos` within this row.
    pub fn column_of(&self, pos: usize) -> usize {
        self.text
            .chars()
            .take(pos.saturating_sub(self.start))
            .map(|ch| ch.width().unwrap_or(0))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockBody {
    Rendered(Vec<RenderedLine>),
    Editing(Vec<EditRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    pub id: BlockId,
    /// First row of the block in document coordinates.
    pub top: usize,
    pub body: BlockBody,
}

impl BlockLayout {
    pub fn height(&self) -> usize {
        match &self.body {
            BlockBody::Rendered(lines) => lines.len(),
            BlockBody::Editing(rows) => rows.len(),
        }
    }

    pub fn rows(&self) -> Range<usize> {
        self.top..self.top + self.height()
    }

    /// Row (relative to `top`) holding the caret, for the block being edited.
    pub fn caret_row(&self, caret: usize) -> Option<usize> {
        let BlockBody::Editing(rows) = &self.body else {
            return None;
        };
        rows.iter()
            .position(|row| row.holds_caret(caret))
            .or_else(|| rows.len().checked_sub(1))
    }
}

/// Rows of every block in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentLayout {
    blocks: Vec<BlockLayout>,
    total_rows: usize,
}

impl DocumentLayout {
    /// Lay out `document` at `width` columns.
    ///
    /// The active block is laid out from `editor` when one is given, so the
    /// raw view always shows the working copy rather than the committed text.
    pub fn compute(
        document: &Document,
        editor: Option<&EditorBuffer>,
        width: u16,
        block_spacing: u8,
    ) -> Self {
        let spacing = usize::from(block_spacing);
        let mut blocks = Vec::with_capacity(document.len());
        let mut top = 0;
        for block in document.blocks() {
            if !blocks.is_empty() {
                top += spacing;
            }
            let body = match editor {
                Some(buffer) if document.is_editing(block.id()) => {
                    BlockBody::Editing(wrap_edit_text(&buffer.text(), width))
                }
                _ => BlockBody::Rendered(render_block(block.text(), usize::from(width))),
            };
            let layout = BlockLayout {
                id: block.id(),
                top,
                body,
            };
            top += layout.height();
            blocks.push(layout);
        }
        Self {
            blocks,
            total_rows: top,
        }
    }

    pub fn blocks(&self) -> &[BlockLayout] {
        &self.blocks
    }

    pub const fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn get(&self, id: BlockId) -> Option<&BlockLayout> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// The block drawn on document row `row`. Spacing rows belong to no block.
    pub fn block_at_row(&self, row: usize) -> Option<BlockId> {
        let idx = self.blocks.partition_point(|b| b.top + b.height() <= row);
        self.blocks
            .get(idx)
            .filter(|b| b.rows().contains(&row))
            .map(|b| b.id)
    }
}

/// Break raw text into rows of at most `width - 1` display columns.
///
/// One column is kept free so a caret at the end of a full row stays on it.
pub fn wrap_edit_text(text: &str, width: u16) -> Vec<EditRow> {
    let limit = usize::from(width.saturating_sub(1)).max(1);
    let mut rows = Vec::new();
    let mut offset = 0;
    for line in text.split('\n') {
        let mut row = String::new();
        let mut row_start = offset;
        let mut row_width = 0;
        for ch in line.chars() {
            let w = ch.width().unwrap_or(0);
            if row_width + w > limit && !row.is_empty() {
                rows.push(EditRow {
                    start: row_start,
                    text: std::mem::take(&mut row),
                    ends_line: false,
                });
                row_start = offset;
                row_width = 0;
            }
            row.push(ch);
            row_width += w;
            offset += 1;
        }
        rows.push(EditRow {
            start: row_start,
            text: row,
            ends_line: true,
        });
        offset += 1;
    }
    rows
}
