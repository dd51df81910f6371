use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

use super::style::Theme;

pub fn render_status_bar(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let mode = if model.editor.is_some() { "EDIT" } else { "VIEW" };

    let position = match &model.editor {
        Some(buffer) => {
            let (line, col) = buffer.cursor_line_col();
            format!("Ln {}, Col {}", line + 1, col + 1)
        }
        None => {
            let index = model
                .selected
                .and_then(|id| model.document.index_of(id))
                .map_or(0, |idx| idx + 1);
            format!("Block {}/{}", index, model.document.len())
        }
    };

    let read_only = if model.read_only { " [read-only]" } else { "" };
    let hints = if model.editor.is_some() {
        "Esc:done  Ctrl+S:save"
    } else {
        "Enter:edit  m:insert  o:options  ?:help"
    };

    let status = format!(
        " {}  {}  {}{}  [{}%]  {}",
        mode,
        model.title(),
        position,
        read_only,
        model.viewport.scroll_percent(),
        hints
    );

    frame.render_widget(Paragraph::new(status).style(theme.status), area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Success => ("[ok]", Style::default().bg(Color::Green).fg(Color::Black)),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
