//! The block store: an ordered list of blocks plus the one being edited.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Runs of two or more line feeds separate blocks on load.
static BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n+").expect("block separator pattern is valid"));

/// Separator written between blocks on save.
const BLOCK_JOIN: &str = "\n\n";

/// Opaque block identifier, unique within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

/// One independently editable chunk of markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    id: BlockId,
    text: String,
}

impl Block {
    pub const fn id(&self) -> BlockId {
        self.id
    }

    /// Last committed text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Which neighbour an arrow key crosses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighbor {
    Previous,
    Next,
}

/// What committing a working copy did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Text matched the stored block, or the block no longer exists.
    Unchanged,
    /// Stored text was replaced.
    Replaced,
    /// Text was blank, so the block was deleted.
    Removed,
}

/// An ordered sequence of blocks.
///
/// At most one block is active (in raw-edit mode) at a time; the active id is
/// a single field, so activating one block deactivates every other.
#[derive(Debug, Clone, Default)]
pub struct Document {
    blocks: Vec<Block>,
    active: Option<BlockId>,
    next_id: u64,
    dirty: bool,
}

impl Document {
    /// Create an empty document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Split markdown into blocks.
    ///
    /// Chunks are separated by blank-line runs, trimmed, and dropped when
    /// empty. The result is clean.
    pub fn parse(source: &str) -> Self {
        Self::from_blocks(
            BLOCK_SEPARATOR
                .split(source)
                .map(str::trim)
                .filter(|chunk| !chunk.is_empty()),
        )
    }

    /// Build a clean document from block texts, verbatim.
    pub fn from_blocks<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut doc = Self::empty();
        for text in texts {
            let id = doc.fresh_id();
            doc.blocks.push(Block {
                id,
                text: text.into(),
            });
        }
        doc
    }

    /// Join block texts with one blank line between them.
    pub fn to_markdown(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join(BLOCK_JOIN)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn index_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    /// Id of the block at `index`.
    pub fn id_at(&self, index: usize) -> Option<BlockId> {
        self.blocks.get(index).map(Block::id)
    }

    /// Add a block at the end.
    pub fn append(&mut self, text: impl Into<String>) -> BlockId {
        let id = self.fresh_id();
        self.blocks.push(Block {
            id,
            text: text.into(),
        });
        self.dirty = true;
        id
    }

    /// Add a block directly after `after`. Returns `None` if `after` is gone.
    pub fn insert_after(&mut self, after: BlockId, text: impl Into<String>) -> Option<BlockId> {
        let index = self.index_of(after)?;
        let id = self.fresh_id();
        self.blocks.insert(
            index + 1,
            Block {
                id,
                text: text.into(),
            },
        );
        self.dirty = true;
        Some(id)
    }

    /// Overwrite a block's text. Returns `true` if the text changed.
    pub fn replace(&mut self, id: BlockId, text: impl Into<String>) -> bool {
        let text = text.into();
        let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) else {
            return false;
        };
        if block.text == text {
            return false;
        }
        block.text = text;
        self.dirty = true;
        true
    }

    /// Delete a block. Deleting the active block leaves nothing active.
    pub fn remove(&mut self, id: BlockId) -> Option<Block> {
        let index = self.index_of(id)?;
        if self.active == Some(id) {
            self.active = None;
        }
        self.dirty = true;
        Some(self.blocks.remove(index))
    }

    /// The block before or after `id`, if any.
    pub fn neighbor(&self, id: BlockId, direction: Neighbor) -> Option<BlockId> {
        let index = self.index_of(id)?;
        let target = match direction {
            Neighbor::Previous => index.checked_sub(1)?,
            Neighbor::Next => index + 1,
        };
        self.id_at(target)
    }

    /// Make `id` the only block in edit mode. Unknown ids are ignored.
    pub fn activate(&mut self, id: BlockId) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Leave edit mode everywhere.
    pub const fn deactivate(&mut self) {
        self.active = None;
    }

    pub const fn active(&self) -> Option<BlockId> {
        self.active
    }

    pub fn is_editing(&self, id: BlockId) -> bool {
        self.active == Some(id)
    }

    /// Write a working copy back to its block.
    ///
    /// Identical text is a no-op and leaves the dirty flag alone. Text that is
    /// blank after trimming deletes the block.
    pub fn commit(&mut self, id: BlockId, working: &str) -> CommitOutcome {
        let Some(block) = self.get(id) else {
            return CommitOutcome::Unchanged;
        };
        if block.text == working {
            return CommitOutcome::Unchanged;
        }
        if working.trim().is_empty() {
            self.remove(id);
            CommitOutcome::Removed
        } else {
            self.replace(id, working);
            CommitOutcome::Replaced
        }
    }

    /// Insert an empty block after `id` and make it active.
    pub fn split_after(&mut self, id: BlockId) -> Option<BlockId> {
        let new_id = self.insert_after(id, String::new())?;
        self.active = Some(new_id);
        Some(new_id)
    }

    /// Whether the document changed since load or the last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    const fn fresh_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(doc: &Document) -> Vec<&str> {
        doc.blocks().iter().map(Block::text).collect()
    }

    #[test]
    fn test_parse_splits_on_blank_lines() {
        let doc = Document::parse("# Title\n\nbody\nmore\n\n\n\n- a\n- b\n");
        assert_eq!(texts(&doc), vec!["# Title", "body\nmore", "- a\n- b"]);
        assert!(!doc.is_dirty());
        assert_eq!(doc.active(), None);
    }

    #[test]
    fn test_parse_drops_blank_chunks_and_trims() {
        let doc = Document::parse("\n\n  a  \n\n   \n\nb");
        assert_eq!(texts(&doc), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_empty_source() {
        assert!(Document::parse("").is_empty());
        assert!(Document::parse("\n\n\n").is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut doc = Document::parse("a\n\nb\n\nc");
        let first = doc.id_at(0).unwrap();
        doc.insert_after(first, "x");
        doc.append("y");
        let mut ids: Vec<_> = doc.blocks().iter().map(Block::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_to_markdown_collapses_separators() {
        let doc = Document::parse("a\n\n\n\n\nb\n\nc");
        assert_eq!(doc.to_markdown(), "a\n\nb\n\nc");
    }

    #[test]
    fn test_parse_trims_chunk_edges() {
        let doc = Document::parse("  a\nb  ");
        assert_eq!(doc.to_markdown(), "a\nb");
    }

    #[test]
    fn test_insert_after_places_block() {
        let mut doc = Document::parse("a\n\nc");
        let a = doc.id_at(0).unwrap();
        let b = doc.insert_after(a, "b").unwrap();
        assert_eq!(texts(&doc), vec!["a", "b", "c"]);
        assert_eq!(doc.index_of(b), Some(1));
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_insert_after_unknown_id() {
        let mut doc = Document::parse("a");
        let a = doc.id_at(0).unwrap();
        doc.remove(a);
        doc.mark_clean();
        assert_eq!(doc.insert_after(a, "x"), None);
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_replace_same_text_is_not_a_change() {
        let mut doc = Document::parse("a");
        let a = doc.id_at(0).unwrap();
        assert!(!doc.replace(a, "a"));
        assert!(!doc.is_dirty());
        assert!(doc.replace(a, "b"));
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_neighbor_at_ends() {
        let doc = Document::parse("a\n\nb");
        let a = doc.id_at(0).unwrap();
        let b = doc.id_at(1).unwrap();
        assert_eq!(doc.neighbor(a, Neighbor::Previous), None);
        assert_eq!(doc.neighbor(a, Neighbor::Next), Some(b));
        assert_eq!(doc.neighbor(b, Neighbor::Previous), Some(a));
        assert_eq!(doc.neighbor(b, Neighbor::Next), None);
    }

    #[test]
    fn test_activate_is_exclusive() {
        let mut doc = Document::parse("a\n\nb\n\nc");
        let ids: Vec<_> = doc.blocks().iter().map(Block::id).collect();
        doc.activate(ids[0]);
        doc.activate(ids[2]);
        let editing: Vec<_> = ids.iter().filter(|id| doc.is_editing(**id)).collect();
        assert_eq!(editing, vec![&ids[2]]);
    }

    #[test]
    fn test_activate_unknown_id_is_ignored() {
        let mut doc = Document::parse("a\n\nb");
        let a = doc.id_at(0).unwrap();
        let b = doc.id_at(1).unwrap();
        doc.activate(a);
        doc.remove(b);
        assert!(!doc.activate(b));
        assert_eq!(doc.active(), Some(a));
    }

    #[test]
    fn test_remove_active_clears_active() {
        let mut doc = Document::parse("a\n\nb");
        let a = doc.id_at(0).unwrap();
        doc.activate(a);
        doc.remove(a);
        assert_eq!(doc.active(), None);
    }

    #[test]
    fn test_commit_unchanged_keeps_clean() {
        let mut doc = Document::parse("hello");
        let id = doc.id_at(0).unwrap();
        assert_eq!(doc.commit(id, "hello"), CommitOutcome::Unchanged);
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_commit_replaces_text() {
        let mut doc = Document::parse("hello");
        let id = doc.id_at(0).unwrap();
        assert_eq!(doc.commit(id, "hello world"), CommitOutcome::Replaced);
        assert_eq!(doc.get(id).unwrap().text(), "hello world");
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_commit_keeps_untrimmed_text() {
        let mut doc = Document::parse("a");
        let id = doc.id_at(0).unwrap();
        doc.commit(id, "a\n");
        assert_eq!(doc.get(id).unwrap().text(), "a\n");
    }

    #[test]
    fn test_commit_blank_removes_block() {
        let mut doc = Document::parse("a\n\nb");
        let id = doc.id_at(0).unwrap();
        doc.activate(id);
        assert_eq!(doc.commit(id, "  \n "), CommitOutcome::Removed);
        assert_eq!(texts(&doc), vec!["b"]);
        assert_eq!(doc.active(), None);
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_commit_missing_block_is_unchanged() {
        let mut doc = Document::parse("a");
        let id = doc.id_at(0).unwrap();
        doc.remove(id);
        doc.mark_clean();
        assert_eq!(doc.commit(id, "x"), CommitOutcome::Unchanged);
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_split_after_activates_new_empty_block() {
        let mut doc = Document::parse("a\n\nb");
        let a = doc.id_at(0).unwrap();
        doc.activate(a);
        let new = doc.split_after(a).unwrap();
        assert_eq!(texts(&doc), vec!["a", "", "b"]);
        assert_eq!(doc.active(), Some(new));
        assert!(!doc.is_editing(a));
    }

    #[test]
    fn test_block_id_display() {
        let doc = Document::parse("a\n\nb");
        assert_eq!(doc.id_at(1).unwrap().to_string(), "block-1");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn serialize_has_one_separator_per_gap(
                chunks in proptest::collection::vec("[a-z]{1,4}(\n[a-z ]{0,3}[a-z])?", 1..8),
                gaps in proptest::collection::vec(2..6usize, 8),
            ) {
                let mut source = String::new();
                for (i, chunk) in chunks.iter().enumerate() {
                    if i > 0 {
                        source.push_str(&"\n".repeat(gaps[i - 1]));
                    }
                    source.push_str(chunk);
                }
                let doc = Document::parse(&source);
                let out = doc.to_markdown();
                prop_assert_eq!(doc.len(), chunks.len());
                prop_assert_eq!(out.matches("\n\n").count(), chunks.len() - 1);
            }

            #[test]
            fn parse_is_stable_after_one_round(source in "[a-z\n ]{0,60}") {
                let once = Document::parse(&source).to_markdown();
                let twice = Document::parse(&once).to_markdown();
                prop_assert_eq!(once, twice);
            }
        }
    }
}
