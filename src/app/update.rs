use crate::config::SettingsField;
use crate::document::{BlockId, NEW_BLOCK_TEXT, Neighbor};
use crate::editor::{Direction, EnterAction, IndentDirection, keys};

use super::menu::{MENU_ITEMS, MenuState};
use super::model::{Model, PathPrompt, PromptKind, ToastLevel};

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Block selection
    /// Select the block above the current one
    SelectPrevious,
    /// Select the block below the current one
    SelectNext,
    /// Scroll up by n rows
    ScrollUp(usize),
    /// Scroll down by n rows
    ScrollDown(usize),
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Block lifecycle
    /// Put the selected block into edit mode
    EditSelected,
    /// Put a clicked block into edit mode
    ClickBlock(BlockId),
    /// Commit the working copy and leave edit mode
    StopEditing,
    /// Remove the selected block
    DeleteSelected,
    /// Append a "New block" block
    AddBlock,

    // Editor
    EditorInsertChar(char),
    EditorDeleteBack,
    EditorDeleteForward,
    /// Move the caret; `true` extends the selection
    EditorMoveCursor(Direction, bool),
    EditorMoveHome(bool),
    EditorMoveEnd(bool),
    EditorMoveWordLeft(bool),
    EditorMoveWordRight(bool),
    EditorMoveToStart(bool),
    EditorMoveToEnd(bool),
    EditorSelectAll,
    /// Tab (`false`) or Shift+Tab (`true`) over the touched list lines
    EditorTab(bool),
    /// Enter (`false`) or Shift+Enter (`true`)
    EditorEnter(bool),

    // Insertion menu
    OpenMenu,
    MenuUp,
    MenuDown,
    /// Append the template at this catalogue index
    MenuChoose(usize),
    CloseMenu,

    // Settings
    ToggleSettings,
    SettingsUp,
    SettingsDown,
    /// Step the highlighted setting forward (`true`) or back
    SettingsAdjust(bool),

    // Files
    StartOpen,
    StartSave,
    /// Replace the prompt input
    PromptInput(String),
    /// Run the prompt; the file I/O happens as a side effect
    PromptSubmit,
    PromptCancel,

    // Application
    ToggleHelp,
    HideHelp,
    HelpScrollUp,
    HelpScrollDown,
    Resize(u16, u16),
    Quit,
}

/// Pure state transition.
#[allow(clippy::too_many_lines)]
pub fn update(mut model: Model, msg: Message) -> Model {
    if !matches!(msg, Message::Quit) {
        model.quit_confirmed = false;
    }
    if !matches!(msg, Message::StartOpen) {
        model.open_confirmed = false;
    }

    let mut follow_focus = true;
    match msg {
        // Block selection
        Message::SelectPrevious => model.select_neighbor(Neighbor::Previous),
        Message::SelectNext => model.select_neighbor(Neighbor::Next),
        Message::ScrollUp(n) => {
            model.viewport.scroll_up(n);
            follow_focus = false;
        }
        Message::ScrollDown(n) => {
            model.viewport.scroll_down(n);
            follow_focus = false;
        }
        Message::PageUp => {
            model.viewport.page_up();
            follow_focus = false;
        }
        Message::PageDown => {
            model.viewport.page_down();
            follow_focus = false;
        }
        Message::GoToTop => {
            model.selected = model.document.id_at(0);
            model.viewport.go_to_top();
        }
        Message::GoToBottom => {
            model.selected = model
                .document
                .len()
                .checked_sub(1)
                .and_then(|idx| model.document.id_at(idx));
            model.viewport.go_to_bottom();
        }

        // Block lifecycle
        Message::EditSelected => {
            if let Some(id) = model.selected {
                model.begin_editing(id);
            }
        }
        Message::ClickBlock(id) => model.begin_editing(id),
        Message::StopEditing => {
            model.commit_active();
        }
        Message::DeleteSelected => {
            if model.editor.is_none() {
                model.delete_selected();
            }
        }
        Message::AddBlock => model.append_block(NEW_BLOCK_TEXT),

        // Editor
        Message::EditorInsertChar(ch) => {
            if let Some(buf) = &mut model.editor {
                buf.insert_char(ch);
            }
        }
        Message::EditorDeleteBack => {
            if let Some(buf) = &mut model.editor {
                buf.delete_back();
            }
        }
        Message::EditorDeleteForward => {
            if let Some(buf) = &mut model.editor {
                buf.delete_forward();
            }
        }
        Message::EditorMoveCursor(direction, extend) => {
            let crossing = model
                .editor
                .as_ref()
                .and_then(|buf| keys::boundary(buf.len_chars(), buf.selection(), direction));
            match crossing {
                Some(neighbor) => model.navigate(neighbor),
                None => {
                    if let Some(buf) = &mut model.editor {
                        buf.move_cursor(direction, extend);
                    }
                }
            }
        }
        Message::EditorMoveHome(extend) => {
            if let Some(buf) = &mut model.editor {
                buf.move_home(extend);
            }
        }
        Message::EditorMoveEnd(extend) => {
            if let Some(buf) = &mut model.editor {
                buf.move_end(extend);
            }
        }
        Message::EditorMoveWordLeft(extend) => {
            if let Some(buf) = &mut model.editor {
                buf.move_word_left(extend);
            }
        }
        Message::EditorMoveWordRight(extend) => {
            if let Some(buf) = &mut model.editor {
                buf.move_word_right(extend);
            }
        }
        Message::EditorMoveToStart(extend) => {
            if let Some(buf) = &mut model.editor {
                buf.move_to_start(extend);
            }
        }
        Message::EditorMoveToEnd(extend) => {
            if let Some(buf) = &mut model.editor {
                buf.move_to_end(extend);
            }
        }
        Message::EditorSelectAll => {
            if let Some(buf) = &mut model.editor {
                buf.select_all();
            }
        }
        Message::EditorTab(shift) => {
            if let Some(buf) = &mut model.editor {
                let result = keys::indent_lines(
                    &buf.text(),
                    buf.selection(),
                    IndentDirection::from_shift(shift),
                );
                buf.replace_all(&result.text, result.selection);
            }
        }
        Message::EditorEnter(shift) => {
            let action = model
                .editor
                .as_ref()
                .map(|buf| keys::enter(&buf.text(), buf.selection(), shift));
            match action {
                Some(
                    EnterAction::ExitList(splice)
                    | EnterAction::ContinueList(splice)
                    | EnterAction::SoftBreak(splice),
                ) => {
                    if let Some(buf) = &mut model.editor {
                        buf.apply_splice(&splice);
                    }
                }
                Some(EnterAction::SplitBlock) => model.split_active(),
                None => {}
            }
        }

        // Insertion menu
        Message::OpenMenu => {
            model.commit_active();
            model.settings_visible = false;
            model.menu = Some(MenuState::default());
        }
        Message::MenuUp => {
            if let Some(menu) = &mut model.menu {
                menu.up();
            }
        }
        Message::MenuDown => {
            if let Some(menu) = &mut model.menu {
                menu.down();
            }
        }
        Message::MenuChoose(index) => {
            if model.menu.take().is_some()
                && let Some(item) = MENU_ITEMS.get(index)
            {
                model.append_block(item.template);
            }
        }
        Message::CloseMenu => {
            model.menu = None;
            follow_focus = false;
        }

        // Settings
        Message::ToggleSettings => {
            model.settings_visible = !model.settings_visible;
            if model.settings_visible {
                model.commit_active();
                model.menu = None;
            }
        }
        Message::SettingsUp => {
            model.settings_row = model.settings_row.saturating_sub(1);
        }
        Message::SettingsDown => {
            model.settings_row = (model.settings_row + 1).min(SettingsField::ALL.len() - 1);
        }
        Message::SettingsAdjust(forward) => {
            let field = model.settings_field();
            model.settings.adjust(field, forward);
        }

        // Files
        Message::StartOpen => {
            model.commit_active();
            if model.has_unsaved_changes() && !model.open_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+O again to open another file, or Ctrl+S to save",
                );
                model.open_confirmed = true;
            } else {
                model.prompt = Some(PathPrompt {
                    kind: PromptKind::Open,
                    input: String::new(),
                });
            }
        }
        Message::StartSave => {
            model.commit_active();
            let input = model.file_path.as_ref().map_or_else(
                || model.file_name.clone(),
                |path| path.display().to_string(),
            );
            model.prompt = Some(PathPrompt {
                kind: PromptKind::Save,
                input,
            });
        }
        Message::PromptInput(input) => {
            if let Some(prompt) = &mut model.prompt {
                prompt.input = input;
            }
            follow_focus = false;
        }
        Message::PromptSubmit => {
            follow_focus = false;
        }
        Message::PromptCancel => {
            if let Some(prompt) = model.prompt.take() {
                tracing::debug!(kind = ?prompt.kind, "file prompt cancelled");
            }
            follow_focus = false;
        }

        // Application
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
            model.help_scroll = 0;
            if model.help_visible {
                model.commit_active();
            }
            follow_focus = false;
        }
        Message::HideHelp => {
            model.help_visible = false;
            model.help_scroll = 0;
            follow_focus = false;
        }
        Message::HelpScrollUp => {
            model.help_scroll = model.help_scroll.saturating_sub(1);
            follow_focus = false;
        }
        Message::HelpScrollDown => {
            // The status bar row sits outside the viewport
            let max = crate::ui::help_max_scroll(
                model.viewport.width(),
                model.viewport.height().saturating_add(1),
            );
            model.help_scroll = (model.help_scroll + 1).min(max);
            follow_focus = false;
        }
        Message::Resize(width, height) => {
            model.viewport.resize(width, height.saturating_sub(1));
        }
        Message::Quit => {
            if model.has_unsaved_changes() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }

    model.relayout();
    if follow_focus {
        model.ensure_focus_visible();
    }
    model
}
