use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::{Settings, SettingsField};
use crate::document::{BlockId, CommitOutcome, DEFAULT_FILE_NAME, Document, Neighbor};
use crate::editor::EditorBuffer;
use crate::io::OpenedFile;
use crate::ui::layout::DocumentLayout;
use crate::ui::viewport::Viewport;

use super::menu::MenuState;

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Columns reserved left of the content column for the block marker.
pub const GUTTER_WIDTH: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Open,
    Save,
}

/// The one-line path prompt standing in for a file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrompt {
    pub kind: PromptKind,
    pub input: String,
}

impl PathPrompt {
    pub const fn title(&self) -> &'static str {
        match self.kind {
            PromptKind::Open => "Open file",
            PromptKind::Save => "Save as",
        }
    }
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The block store
    pub document: Document,
    /// Working copy of the active block; `Some` exactly while a block is active
    pub editor: Option<EditorBuffer>,
    /// Idle block the keyboard points at
    pub selected: Option<BlockId>,
    /// Viewport managing scroll position (in layout rows)
    pub viewport: Viewport,
    /// Rows of every block, rebuilt after each update
    pub layout: DocumentLayout,
    /// Display name of the current file
    pub file_name: String,
    /// Where the file was last opened from or saved to
    pub file_path: Option<PathBuf>,
    /// Layout and theme settings
    pub settings: Settings,
    pub settings_visible: bool,
    /// Highlighted row in the settings panel
    pub settings_row: usize,
    /// Block-insertion menu, when open
    pub menu: Option<MenuState>,
    /// Open or save prompt, when open
    pub prompt: Option<PathPrompt>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// First help line shown; clamped when drawn
    pub help_scroll: usize,
    /// Saving is refused by the file host
    pub read_only: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after first quit attempt with unsaved changes; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Set after first open attempt with unsaved changes; allows second open to proceed
    pub open_confirmed: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_name", &self.file_name)
            .field("blocks", &self.document.len())
            .field("active", &self.document.active())
            .field("selected", &self.selected)
            .field("dirty", &self.document.is_dirty())
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model showing `document` in a terminal of `terminal_size`.
    pub fn new(file_name: impl Into<String>, document: Document, terminal_size: (u16, u16)) -> Self {
        let selected = document.id_at(0);
        let mut model = Self {
            document,
            selected,
            viewport: Viewport::new(terminal_size.0, terminal_size.1.saturating_sub(1), 0),
            file_name: file_name.into(),
            ..Self::default()
        };
        model.relayout();
        model
    }

    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self.relayout();
        self
    }

    /// Width of the content column in the current terminal.
    pub fn content_width(&self) -> u16 {
        let available = self.viewport.width().saturating_sub(GUTTER_WIDTH * 2).max(1);
        available.min(self.settings.max_width)
    }

    /// Rebuild the row layout from the document and the working copy.
    pub fn relayout(&mut self) {
        self.layout = DocumentLayout::compute(
            &self.document,
            self.editor.as_ref(),
            self.content_width(),
            self.settings.block_spacing,
        );
        self.viewport.set_total_rows(self.layout.total_rows());
    }

    /// Scroll so the caret (or the selected block) is on screen.
    pub fn ensure_focus_visible(&mut self) {
        let Some(id) = self.document.active().or(self.selected) else {
            return;
        };
        let Some(block) = self.layout.get(id) else {
            return;
        };
        let rows = match (&self.editor, block.caret_row(self.cursor())) {
            (Some(_), Some(row)) => block.top + row..block.top + row + 1,
            _ => block.rows(),
        };
        self.viewport.ensure_visible(rows);
    }

    fn cursor(&self) -> usize {
        self.editor.as_ref().map_or(0, EditorBuffer::cursor)
    }

    /// Whether anything would be lost by quitting now.
    pub fn has_unsaved_changes(&self) -> bool {
        if self.document.is_dirty() {
            return true;
        }
        match (self.document.active(), &self.editor) {
            (Some(id), Some(editor)) => self
                .document
                .get(id)
                .is_some_and(|block| block.text() != editor.text()),
            _ => false,
        }
    }

    /// Put `id` into edit mode, committing whatever was being edited.
    ///
    /// The caret starts after the last char.
    pub fn begin_editing(&mut self, id: BlockId) {
        if self.document.is_editing(id) {
            return;
        }
        self.commit_active();
        let Some(block) = self.document.get(id) else {
            return;
        };
        let buffer = EditorBuffer::with_cursor_at_end(block.text());
        if self.document.activate(id) {
            self.editor = Some(buffer);
            self.selected = Some(id);
            tracing::debug!(block = %id, "editing block");
        }
    }

    /// Commit the working copy and leave edit mode.
    pub fn commit_active(&mut self) -> Option<CommitOutcome> {
        let outcome = self.commit_working()?;
        self.document.deactivate();
        self.editor = None;
        Some(outcome)
    }

    /// Write the working copy back without leaving edit mode.
    ///
    /// A blank working copy still removes the block, which ends editing.
    fn commit_working(&mut self) -> Option<CommitOutcome> {
        let id = self.document.active()?;
        let Some(editor) = &self.editor else {
            self.document.deactivate();
            return None;
        };
        let fallback = self
            .document
            .neighbor(id, Neighbor::Next)
            .or_else(|| self.document.neighbor(id, Neighbor::Previous));
        let outcome = self.document.commit(id, &editor.text());
        tracing::debug!(block = %id, ?outcome, "committed block");
        if outcome == CommitOutcome::Removed {
            self.editor = None;
            if self.selected == Some(id) {
                self.selected = fallback;
            }
        }
        Some(outcome)
    }

    /// Arrow key crossed the edge of the active block.
    ///
    /// The working copy is committed either way; at either end of the
    /// document the block simply stays in edit mode.
    pub fn navigate(&mut self, direction: Neighbor) {
        let Some(id) = self.document.active() else {
            return;
        };
        match self.document.neighbor(id, direction) {
            Some(target) => {
                tracing::debug!(from = %id, to = %target, "navigating");
                self.begin_editing(target);
            }
            None => {
                self.commit_working();
            }
        }
    }

    /// Commit the active block and start a new empty one after it.
    pub fn split_active(&mut self) {
        let Some(id) = self.document.active() else {
            return;
        };
        // A blank block is dropped rather than split
        if self
            .editor
            .as_ref()
            .is_some_and(|editor| editor.text().trim().is_empty())
        {
            let fallback = self
                .document
                .neighbor(id, Neighbor::Next)
                .or_else(|| self.document.neighbor(id, Neighbor::Previous));
            self.document.remove(id);
            self.editor = None;
            self.selected = fallback;
            tracing::debug!(block = %id, "removed blank block on split");
            return;
        }
        if self.commit_active() == Some(CommitOutcome::Removed) {
            return;
        }
        if let Some(new_id) = self.document.split_after(id) {
            self.editor = Some(EditorBuffer::empty());
            self.selected = Some(new_id);
            tracing::debug!(after = %id, block = %new_id, "split block");
        }
    }

    /// Move the idle selection to the neighbouring block.
    pub fn select_neighbor(&mut self, direction: Neighbor) {
        let next = match self.selected {
            Some(id) => self.document.neighbor(id, direction),
            None => match direction {
                Neighbor::Previous => self.document.len().checked_sub(1),
                Neighbor::Next => Some(0),
            }
            .and_then(|idx| self.document.id_at(idx)),
        };
        if next.is_some() {
            self.selected = next;
        }
    }

    /// Delete the selected idle block.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let fallback = self
            .document
            .neighbor(id, Neighbor::Next)
            .or_else(|| self.document.neighbor(id, Neighbor::Previous));
        if self.document.remove(id).is_some() {
            tracing::debug!(block = %id, "deleted block");
            self.selected = fallback;
        }
    }

    /// Append a block at the end of the document and select it.
    pub fn append_block(&mut self, text: &str) {
        self.commit_active();
        let id = self.document.append(text);
        self.selected = Some(id);
        tracing::debug!(block = %id, "appended block");
    }

    /// Replace the document with a freshly opened file.
    pub fn load_opened(&mut self, opened: OpenedFile) {
        self.document = Document::parse(&opened.content);
        self.editor = None;
        self.selected = self.document.id_at(0);
        self.file_name = opened.name;
        self.file_path = Some(opened.path);
        self.viewport.go_to_top();
        self.relayout();
    }

    /// The field on the highlighted settings row.
    pub fn settings_field(&self) -> SettingsField {
        SettingsField::ALL[self.settings_row.min(SettingsField::ALL.len() - 1)]
    }

    /// Status-bar title: the file name, starred when there are unsaved changes.
    pub fn title(&self) -> String {
        if self.has_unsaved_changes() {
            format!("* {}", self.file_name)
        } else {
            self.file_name.clone()
        }
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Whether an overlay owns the keyboard.
    pub const fn overlay_open(&self) -> bool {
        self.help_visible || self.settings_visible || self.menu.is_some() || self.prompt.is_some()
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            document: Document::empty(),
            editor: None,
            selected: None,
            viewport: Viewport::new(80, 24, 0),
            layout: DocumentLayout::default(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            file_path: None,
            settings: Settings::default(),
            settings_visible: false,
            settings_row: 0,
            menu: None,
            prompt: None,
            help_visible: false,
            help_scroll: 0,
            read_only: false,
            config_global_path: None,
            config_local_path: None,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
            open_confirmed: false,
        }
    }
}
