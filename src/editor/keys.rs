//! Pure keystroke interpreters for the active block.
//!
//! Each function takes the working text and selection (char offsets) and
//! returns what should happen. Nothing here touches the document.

use std::borrow::Cow;
use std::ops::Range;

use super::buffer::{Direction, Selection};
use super::list::{self, IndentDirection};
use crate::document::Neighbor;

/// New text and selection after a Tab or Shift+Tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentResult {
    pub text: String,
    pub selection: Selection,
}

/// Indent or outdent every list line the selection touches.
///
/// Plain lines in the range are left alone. The selection keeps its place
/// relative to the surrounding text as lines grow or shrink.
#[allow(clippy::cast_possible_wrap)]
pub fn indent_lines(text: &str, selection: Selection, direction: IndentDirection) -> IndentResult {
    let lines: Vec<&str> = text.split('\n').collect();
    let (start_line, end_line) = touched_lines(&lines, selection);

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut start = selection.start;
    let mut end = selection.end;
    let mut offset = 0usize;
    let mut shift = 0isize;

    for (i, line) in lines.iter().enumerate() {
        let new_line = if (start_line..=end_line).contains(&i) {
            list::shift_indentation(line, direction)
        } else {
            Cow::Borrowed(*line)
        };
        let delta = char_len(&new_line) as isize - char_len(line) as isize;

        if delta != 0 {
            let new_offset = offset.saturating_add_signed(shift);
            if i == start_line && selection.start > offset {
                start = start.saturating_add_signed(delta).max(new_offset);
            }
            if i < end_line || (i == end_line && selection.end > offset) {
                end = end.saturating_add_signed(delta).max(new_offset);
            }
            shift += delta;
        }

        offset += char_len(line) + 1;
        out.push(new_line.into_owned());
    }

    let text = out.join("\n");
    let len = char_len(&text);
    IndentResult {
        text,
        selection: Selection::new(start.min(len), end.min(len)),
    }
}

/// First and last line indices the selection reaches.
///
/// Walks cumulative `line length + 1` offsets; a line counts once the offset
/// reaches its end, so a caret at the very start of a line also touches the
/// line before it.
fn touched_lines(lines: &[&str], selection: Selection) -> (usize, usize) {
    let mut position = 0usize;
    let mut start_line = None;
    for (i, line) in lines.iter().enumerate() {
        position += char_len(line) + 1;
        if start_line.is_none() && selection.start <= position {
            start_line = Some(i);
        }
        if selection.end <= position {
            return (start_line.unwrap_or(i), i);
        }
    }
    let last = lines.len().saturating_sub(1);
    (start_line.unwrap_or(last), last)
}

/// A replacement of a char range, plus where the caret lands afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub range: Range<usize>,
    pub insert: String,
    pub cursor: usize,
}

impl Splice {
    /// Apply to a plain string.
    pub fn apply(&self, text: &str) -> String {
        let start = byte_offset(text, self.range.start);
        let end = byte_offset(text, self.range.end).max(start);
        let mut out = String::with_capacity(text.len() + self.insert.len());
        out.push_str(&text[..start]);
        out.push_str(&self.insert);
        out.push_str(&text[end..]);
        out
    }
}

/// Outcome of pressing Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterAction {
    /// Marker-only list line: drop the marker and leave a plain break.
    ExitList(Splice),
    /// Open a new item with the next marker.
    ContinueList(Splice),
    /// Shift+Enter: a line break inside the block.
    SoftBreak(Splice),
    /// Commit and start a new empty block after this one.
    SplitBlock,
}

/// Decide what Enter does at the current selection.
///
/// Only the text between the start of the caret's line and the caret is
/// classified.
pub fn enter(text: &str, selection: Selection, shift: bool) -> EnterAction {
    let cursor = selection.start;
    let line_start = line_start_before(text, cursor);
    let prefix = char_slice(text, line_start, cursor);

    match (list::classify(prefix), shift) {
        (_, true) => EnterAction::SoftBreak(Splice {
            range: selection.start..selection.end,
            insert: "\n".to_string(),
            cursor: selection.start + 1,
        }),
        (Some(item), false) if item.is_empty_item() => EnterAction::ExitList(Splice {
            range: line_start..cursor,
            insert: "\n".to_string(),
            cursor: line_start + 1,
        }),
        (Some(item), false) => {
            let insert = format!("\n{}", item.next_marker());
            let after = cursor + char_len(&insert);
            EnterAction::ContinueList(Splice {
                range: cursor..cursor,
                insert,
                cursor: after,
            })
        }
        (None, false) => EnterAction::SplitBlock,
    }
}

/// Whether an arrow key should leave the block.
///
/// Up at offset 0 and Down at the end of the text cross into the neighbour;
/// everything else stays inside the buffer.
pub const fn boundary(len_chars: usize, selection: Selection, direction: Direction) -> Option<Neighbor> {
    match direction {
        Direction::Up if selection.start == 0 => Some(Neighbor::Previous),
        Direction::Down if selection.start == len_chars => Some(Neighbor::Next),
        _ => None,
    }
}

/// Char offset of the start of the line containing `pos`.
fn line_start_before(text: &str, pos: usize) -> usize {
    let head = char_slice(text, 0, pos);
    head.rfind('\n')
        .map_or(0, |i| char_len(&head[..i]) + 1)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of char offset `pos`, clamped to the end.
fn byte_offset(text: &str, pos: usize) -> usize {
    text.char_indices().nth(pos).map_or(text.len(), |(i, _)| i)
}

fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let from = byte_offset(text, start);
    let to = byte_offset(text, end).max(from);
    &text[from..to]
}
