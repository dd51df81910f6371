use ropey::Rope;

use super::keys::Splice;

/// A selection range in char offsets, `start <= end`.
///
/// An empty selection is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Build a selection from two offsets in either order.
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A collapsed selection at `pos`.
    pub const fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Clamp both ends to `len`.
    pub fn clamped(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Working copy of the active block's text.
///
/// Backed by a rope. The selection runs from a fixed `anchor` to the moving
/// `head`; both are char offsets and never exceed `len_chars()`.
pub struct EditorBuffer {
    rope: Rope,
    anchor: usize,
    head: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: Option<usize>,
}

impl EditorBuffer {
    /// Create a new buffer from a string with the caret at offset 0.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            anchor: 0,
            head: 0,
            col_memory: None,
        }
    }

    /// Create a buffer with the caret after the last char.
    pub fn with_cursor_at_end(text: &str) -> Self {
        let mut buf = Self::from_text(text);
        buf.move_to_end(false);
        buf
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Length in chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The current selection, ordered.
    pub const fn selection(&self) -> Selection {
        Selection::new(self.anchor, self.head)
    }

    /// The moving end of the selection.
    pub const fn cursor(&self) -> usize {
        self.head
    }

    /// Replace the selection, clamping it into the buffer.
    pub fn set_selection(&mut self, selection: Selection) {
        let sel = selection.clamped(self.len_chars());
        self.anchor = sel.start;
        self.head = sel.end;
        self.col_memory = None;
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').to_string())
    }

    /// Length of a line in chars (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        if line_idx >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(line_idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Line and char column of an offset.
    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        let pos = pos.min(self.len_chars());
        let line = self.rope.char_to_line(pos);
        (line, pos - self.rope.line_to_char(line))
    }

    /// Line and char column of the cursor.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        self.line_col(self.head)
    }

    /// Insert a character, replacing any selection.
    pub fn insert_char(&mut self, ch: char) {
        let start = self.delete_selection_range();
        self.rope.insert_char(start, ch);
        self.collapse_to(start + 1);
    }

    /// Insert a string, replacing any selection.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() && self.selection().is_empty() {
            return;
        }
        let start = self.delete_selection_range();
        self.rope.insert(start, s);
        self.collapse_to(start + s.chars().count());
    }

    /// Delete the selection, or the character before the cursor (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if !self.selection().is_empty() {
            let start = self.delete_selection_range();
            self.collapse_to(start);
            return true;
        }
        if self.head == 0 {
            return false;
        }
        self.rope.remove(self.head - 1..self.head);
        self.collapse_to(self.head - 1);
        true
    }

    /// Delete the selection, or the character at the cursor (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if !self.selection().is_empty() {
            let start = self.delete_selection_range();
            self.collapse_to(start);
            return true;
        }
        if self.head >= self.len_chars() {
            return false;
        }
        self.rope.remove(self.head..=self.head);
        self.col_memory = None;
        true
    }

    /// Move the cursor in the given direction, extending the selection when
    /// `extend` is set.
    pub fn move_cursor(&mut self, direction: Direction, extend: bool) {
        match direction {
            Direction::Left => self.move_left(extend),
            Direction::Right => self.move_right(extend),
            Direction::Up => self.move_vertical(false, extend),
            Direction::Down => self.move_vertical(true, extend),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub fn move_home(&mut self, extend: bool) {
        let (line, _) = self.cursor_line_col();
        self.set_head(self.rope.line_to_char(line), extend);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self, extend: bool) {
        let (line, _) = self.cursor_line_col();
        self.set_head(self.rope.line_to_char(line) + self.line_len(line), extend);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self, extend: bool) {
        let mut pos = self.head;
        while pos > 0 && !is_word_char(self.rope.char(pos - 1)) {
            pos -= 1;
        }
        while pos > 0 && is_word_char(self.rope.char(pos - 1)) {
            pos -= 1;
        }
        self.set_head(pos, extend);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self, extend: bool) {
        let len = self.len_chars();
        let mut pos = self.head;
        // Skip current word characters
        while pos < len && is_word_char(self.rope.char(pos)) {
            pos += 1;
        }
        // Skip whitespace/punctuation after word
        while pos < len && !is_word_char(self.rope.char(pos)) {
            pos += 1;
        }
        self.set_head(pos, extend);
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub fn move_to_start(&mut self, extend: bool) {
        self.set_head(0, extend);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self, extend: bool) {
        self.set_head(self.len_chars(), extend);
    }

    /// Select the whole text (Ctrl+A).
    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.head = self.len_chars();
        self.col_memory = None;
    }

    /// Apply a splice from the Enter handler and place the caret it names.
    pub fn apply_splice(&mut self, splice: &Splice) {
        let len = self.len_chars();
        let start = splice.range.start.min(len);
        let end = splice.range.end.clamp(start, len);
        self.rope.remove(start..end);
        self.rope.insert(start, &splice.insert);
        self.collapse_to(splice.cursor.min(self.len_chars()));
    }

    /// Swap in new text and selection wholesale (Tab indentation).
    pub fn replace_all(&mut self, text: &str, selection: Selection) {
        self.rope = Rope::from_str(text);
        self.set_selection(selection);
    }

    // --- Private helpers ---

    /// Remove the selected range and return where it started.
    fn delete_selection_range(&mut self) -> usize {
        let sel = self.selection();
        if !sel.is_empty() {
            self.rope.remove(sel.start..sel.end);
        }
        sel.start
    }

    fn collapse_to(&mut self, pos: usize) {
        self.anchor = pos;
        self.head = pos;
        self.col_memory = None;
    }

    fn set_head(&mut self, pos: usize, extend: bool) {
        self.head = pos.min(self.len_chars());
        if !extend {
            self.anchor = self.head;
        }
        self.col_memory = None;
    }

    fn move_left(&mut self, extend: bool) {
        let sel = self.selection();
        if !extend && !sel.is_empty() {
            self.collapse_to(sel.start);
        } else {
            self.set_head(self.head.saturating_sub(1), extend);
        }
    }

    fn move_right(&mut self, extend: bool) {
        let sel = self.selection();
        if !extend && !sel.is_empty() {
            self.collapse_to(sel.end);
        } else {
            self.set_head(self.head + 1, extend);
        }
    }

    fn move_vertical(&mut self, down: bool, extend: bool) {
        let (line, col) = self.cursor_line_col();
        let want = self.col_memory.unwrap_or(col);
        let target = if down {
            if line + 1 >= self.line_count() {
                self.len_chars()
            } else {
                self.rope.line_to_char(line + 1) + want.min(self.line_len(line + 1))
            }
        } else if line == 0 {
            0
        } else {
            self.rope.line_to_char(line - 1) + want.min(self.line_len(line - 1))
        };
        self.set_head(target, extend);
        self.col_memory = Some(want);
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("anchor", &self.anchor)
            .field("head", &self.head)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = EditorBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some("world".to_string()));
    }

    #[test]
    fn test_from_text_trailing_newline() {
        let buf = EditorBuffer::from_text("hello\n");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(1), Some(String::new()));
    }

    #[test]
    fn test_line_at_out_of_bounds_returns_none() {
        let buf = EditorBuffer::from_text("hello");
        assert_eq!(buf.line_at(1), None);
    }

    #[test]
    fn test_line_len_counts_chars() {
        let buf = EditorBuffer::from_text("héllo\nhi");
        assert_eq!(buf.line_len(0), 5);
        assert_eq!(buf.line_len(1), 2);
    }

    #[test]
    fn test_cursor_at_end_on_focus() {
        let buf = EditorBuffer::with_cursor_at_end("ab\ncd");
        assert_eq!(buf.selection(), Selection::caret(5));
        assert_eq!(buf.cursor_line_col(), (1, 2));
    }

    // --- Insertion ---

    #[test]
    fn test_insert_char_in_middle() {
        let mut buf = EditorBuffer::from_text("hllo");
        buf.set_selection(Selection::caret(1));
        buf.insert_char('e');
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_insert_multibyte_char() {
        let mut buf = EditorBuffer::empty();
        buf.insert_char('é');
        buf.insert_char('x');
        assert_eq!(buf.text(), "éx");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.set_selection(Selection::new(6, 11));
        buf.insert_str("there");
        assert_eq!(buf.text(), "hello there");
        assert_eq!(buf.selection(), Selection::caret(11));
    }

    #[test]
    fn test_insert_str_empty_is_noop() {
        let mut buf = EditorBuffer::from_text("abc");
        buf.insert_str("");
        assert_eq!(buf.text(), "abc");
    }

    // --- Deletion ---

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = EditorBuffer::from_text("abc");
        assert!(!buf.delete_back());
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.set_selection(Selection::caret(3));
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_delete_back_removes_selection() {
        let mut buf = EditorBuffer::from_text("abcdef");
        buf.set_selection(Selection::new(1, 4));
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "aef");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = EditorBuffer::with_cursor_at_end("abc");
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_delete_forward_removes_char() {
        let mut buf = EditorBuffer::from_text("abc");
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "bc");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_delete_back_multibyte() {
        let mut buf = EditorBuffer::with_cursor_at_end("añ");
        buf.delete_back();
        assert_eq!(buf.text(), "a");
    }

    // --- Movement ---

    #[test]
    fn test_move_left_at_start_is_noop() {
        let mut buf = EditorBuffer::from_text("abc");
        buf.move_cursor(Direction::Left, false);
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_move_right_at_end_is_noop() {
        let mut buf = EditorBuffer::with_cursor_at_end("abc");
        buf.move_cursor(Direction::Right, false);
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn test_move_left_collapses_selection() {
        let mut buf = EditorBuffer::from_text("abcdef");
        buf.set_selection(Selection::new(2, 5));
        buf.move_cursor(Direction::Left, false);
        assert_eq!(buf.selection(), Selection::caret(2));
    }

    #[test]
    fn test_move_right_collapses_selection() {
        let mut buf = EditorBuffer::from_text("abcdef");
        buf.set_selection(Selection::new(2, 5));
        buf.move_cursor(Direction::Right, false);
        assert_eq!(buf.selection(), Selection::caret(5));
    }

    #[test]
    fn test_shift_arrows_extend_from_anchor() {
        let mut buf = EditorBuffer::from_text("abcdef");
        buf.set_selection(Selection::caret(3));
        buf.move_cursor(Direction::Right, true);
        buf.move_cursor(Direction::Right, true);
        assert_eq!(buf.selection(), Selection::new(3, 5));
        buf.move_cursor(Direction::Left, true);
        buf.move_cursor(Direction::Left, true);
        buf.move_cursor(Direction::Left, true);
        assert_eq!(buf.selection(), Selection::new(2, 3));
    }

    #[test]
    fn test_move_up_on_first_line_goes_to_start() {
        let mut buf = EditorBuffer::from_text("abc\ndef");
        buf.set_selection(Selection::caret(2));
        buf.move_cursor(Direction::Up, false);
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_move_down_on_last_line_goes_to_end() {
        let mut buf = EditorBuffer::from_text("abc\ndef");
        buf.set_selection(Selection::caret(5));
        buf.move_cursor(Direction::Down, false);
        assert_eq!(buf.cursor(), 7);
    }

    #[test]
    fn test_move_down_preserves_column() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.set_selection(Selection::caret(3));
        buf.move_cursor(Direction::Down, false);
        assert_eq!(buf.cursor_line_col(), (1, 3));
    }

    #[test]
    fn test_column_memory_across_short_line() {
        let mut buf = EditorBuffer::from_text("hello\nhi\nworld");
        buf.set_selection(Selection::caret(4));
        buf.move_cursor(Direction::Down, false);
        assert_eq!(buf.cursor_line_col(), (1, 2));
        buf.move_cursor(Direction::Down, false);
        assert_eq!(buf.cursor_line_col(), (2, 4));
    }

    #[test]
    fn test_move_home_and_end() {
        let mut buf = EditorBuffer::from_text("ab\ncdef");
        buf.set_selection(Selection::caret(5));
        buf.move_home(false);
        assert_eq!(buf.cursor(), 3);
        buf.move_end(true);
        assert_eq!(buf.selection(), Selection::new(3, 7));
    }

    #[test]
    fn test_move_word_left_from_middle_of_word() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.set_selection(Selection::caret(8));
        buf.move_word_left(false);
        assert_eq!(buf.cursor(), 6);
    }

    #[test]
    fn test_move_word_right_from_start() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_word_right(false);
        assert_eq!(buf.cursor(), 6);
    }

    #[test]
    fn test_select_all() {
        let mut buf = EditorBuffer::from_text("abc\ndef");
        buf.select_all();
        assert_eq!(buf.selection(), Selection::new(0, 7));
    }

    #[test]
    fn test_set_selection_clamps() {
        let mut buf = EditorBuffer::from_text("abc");
        buf.set_selection(Selection::new(10, 2));
        assert_eq!(buf.selection(), Selection::new(2, 3));
    }

    #[test]
    fn test_apply_splice() {
        let mut buf = EditorBuffer::with_cursor_at_end("1. apple");
        buf.apply_splice(&Splice {
            range: 8..8,
            insert: "\n2. ".to_string(),
            cursor: 12,
        });
        assert_eq!(buf.text(), "1. apple\n2. ");
        assert_eq!(buf.selection(), Selection::caret(12));
    }

    #[test]
    fn test_type_then_backspace_then_type() {
        let mut buf = EditorBuffer::empty();
        buf.insert_str("abc");
        buf.delete_back();
        buf.insert_char('d');
        assert_eq!(buf.text(), "abd");
    }
}
