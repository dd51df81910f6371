use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::editor::Direction;

use super::event_loop::ResizeDebouncer;
use super::menu::{MenuRow, menu_rows};

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        if model.help_visible {
            return match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some(Message::HelpScrollDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::HelpScrollUp),
                _ => Some(Message::HideHelp),
            };
        }

        if let Some(prompt) = &model.prompt {
            return match key.code {
                KeyCode::Esc => Some(Message::PromptCancel),
                KeyCode::Enter => Some(Message::PromptSubmit),
                KeyCode::Backspace => {
                    let mut next = prompt.input.clone();
                    next.pop();
                    Some(Message::PromptInput(next))
                }
                KeyCode::Char(c) if !ctrl && !alt => {
                    let mut next = prompt.input.clone();
                    next.push(c);
                    Some(Message::PromptInput(next))
                }
                _ => None,
            };
        }

        if let Some(menu) = &model.menu {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('m' | 'q') => Some(Message::CloseMenu),
                KeyCode::Char('j') | KeyCode::Down => Some(Message::MenuDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::MenuUp),
                KeyCode::Enter => Some(Message::MenuChoose(menu.selected)),
                KeyCode::Char(c @ '1'..='9') => {
                    Some(Message::MenuChoose(usize::from(c as u8 - b'1')))
                }
                _ => None,
            };
        }

        if model.settings_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('o' | 'q') => Some(Message::ToggleSettings),
                KeyCode::Char('j') | KeyCode::Down => Some(Message::SettingsDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::SettingsUp),
                KeyCode::Char('h') | KeyCode::Left => Some(Message::SettingsAdjust(false)),
                KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => {
                    Some(Message::SettingsAdjust(true))
                }
                _ => None,
            };
        }

        // Chords that work in both modes
        if ctrl {
            match key.code {
                KeyCode::Char('s') => return Some(Message::StartSave),
                KeyCode::Char('o') => return Some(Message::StartOpen),
                KeyCode::Char('q' | 'c') => return Some(Message::Quit),
                _ => {}
            }
        }

        if model.editor.is_some() {
            Self::handle_editor_key(key, ctrl, shift, alt)
        } else if ctrl {
            None
        } else {
            Self::handle_idle_key(key, model)
        }
    }

    fn handle_editor_key(key: KeyEvent, ctrl: bool, shift: bool, alt: bool) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::StopEditing),
            KeyCode::Tab => Some(Message::EditorTab(shift)),
            KeyCode::BackTab => Some(Message::EditorTab(true)),
            // Many terminals cannot report Shift+Enter, so Alt+Enter is a soft break too
            KeyCode::Enter => Some(Message::EditorEnter(shift || alt)),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Left if ctrl => Some(Message::EditorMoveWordLeft(shift)),
            KeyCode::Right if ctrl => Some(Message::EditorMoveWordRight(shift)),
            KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left, shift)),
            KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right, shift)),
            KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up, shift)),
            KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down, shift)),
            KeyCode::Home if ctrl => Some(Message::EditorMoveToStart(shift)),
            KeyCode::End if ctrl => Some(Message::EditorMoveToEnd(shift)),
            KeyCode::Home => Some(Message::EditorMoveHome(shift)),
            KeyCode::End => Some(Message::EditorMoveEnd(shift)),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Char('a') if ctrl => Some(Message::EditorSelectAll),
            KeyCode::Char(c) if !ctrl && !alt => Some(Message::EditorInsertChar(c)),
            _ => None,
        }
    }

    fn handle_idle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            // Selection
            KeyCode::Char('j') | KeyCode::Down => Some(Message::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::SelectPrevious),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Char(' ') | KeyCode::PageDown => {
                if model.viewport.can_scroll_down() {
                    Some(Message::PageDown)
                } else {
                    None
                }
            }
            KeyCode::Char('b') | KeyCode::PageUp => {
                if model.viewport.can_scroll_up() {
                    Some(Message::PageUp)
                } else {
                    None
                }
            }

            // Blocks
            KeyCode::Enter | KeyCode::Char('i') => Some(Message::EditSelected),
            KeyCode::Char('a') => Some(Message::AddBlock),
            KeyCode::Char('d') | KeyCode::Delete => Some(Message::DeleteSelected),

            // Overlays
            KeyCode::Char('m') => Some(Message::OpenMenu),
            KeyCode::Char('o') => Some(Message::ToggleSettings),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),

            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return match mouse.kind {
                MouseEventKind::ScrollUp => Some(Message::HelpScrollUp),
                MouseEventKind::ScrollDown => Some(Message::HelpScrollDown),
                MouseEventKind::Down(_) => Some(Message::HideHelp),
                _ => None,
            };
        }
        if model.prompt.is_some() || model.settings_visible {
            return None;
        }

        if model.menu.is_some() {
            let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
                return None;
            };
            let popup = crate::ui::menu_rect(screen_area(model));
            if !point_in_rect(mouse.column, mouse.row, popup) {
                return Some(Message::CloseMenu);
            }
            return menu_item_at(popup, mouse.row).map(Message::MenuChoose);
        }

        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_ROWS)),
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_ROWS)),
            MouseEventKind::Down(MouseButton::Right) => Some(Message::OpenMenu),
            MouseEventKind::Down(MouseButton::Left) => {
                if mouse.row >= model.viewport.height() {
                    return None;
                }
                let row = model.viewport.offset() + usize::from(mouse.row);
                match model.layout.block_at_row(row) {
                    Some(id) => Some(Message::ClickBlock(id)),
                    // Clicking empty space blurs the active block
                    None if model.editor.is_some() => Some(Message::StopEditing),
                    None => None,
                }
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// Whole terminal area as last reported to the viewport.
fn screen_area(model: &Model) -> Rect {
    Rect::new(
        0,
        0,
        model.viewport.width(),
        model.viewport.height().saturating_add(1),
    )
}

fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Catalogue index of the menu item drawn on `row`.
fn menu_item_at(popup: Rect, row: u16) -> Option<usize> {
    let content_top = crate::ui::menu_content_top(popup);
    let rel = usize::from(row.checked_sub(content_top)?);
    match menu_rows().get(rel)? {
        MenuRow::Item(idx) => Some(*idx),
        MenuRow::Category(_) => None,
    }
}
