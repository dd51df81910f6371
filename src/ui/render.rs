use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::app::{GUTTER_WIDTH, Model};
use crate::document::RenderedLine;
use crate::editor::EditorBuffer;

use super::layout::{BlockBody, BlockLayout, EditRow};
use super::style::Theme;
use super::{overlays, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let theme = Theme::for_mode(model.settings.theme);

    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    let doc_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(footer_rows),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(theme.base), area);
    render_document(model, &theme, frame, doc_area);

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, &theme, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, &theme, frame, area);
    } else if model.settings_visible {
        overlays::render_settings_overlay(model, &theme, frame, area);
    } else if let Some(menu) = &model.menu {
        overlays::render_menu_overlay(menu, &theme, frame, area);
    }
    if let Some(prompt) = &model.prompt {
        overlays::render_prompt_overlay(prompt, &theme, frame, area);
    }
}

/// Left edge of the gutter for a centred content column.
pub fn column_left(area: Rect, content_width: u16) -> u16 {
    let total = content_width + GUTTER_WIDTH;
    area.x + area.width.saturating_sub(total) / 2
}

fn render_document(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let content_width = model.content_width();
    let gutter_x = column_left(area, content_width);
    let content_x = gutter_x + GUTTER_WIDTH;
    let visible = model.viewport.visible_range();

    for block in model.layout.blocks() {
        let rows = block.rows();
        if rows.end <= visible.start || rows.start >= visible.end {
            continue;
        }
        let marker = block_marker(model, block, theme);
        for (idx, line) in block_lines(block, model.editor.as_ref(), theme).into_iter().enumerate() {
            let doc_row = block.top + idx;
            if !visible.contains(&doc_row) {
                continue;
            }
            // Visible rows are within `area.height`, which is a u16
            #[allow(clippy::cast_possible_truncation)]
            let y = area.y + (doc_row - visible.start) as u16;
            if y >= area.y + area.height {
                break;
            }
            if let Some((symbol, style)) = marker {
                frame.render_widget(
                    Paragraph::new(Span::styled(symbol, style)),
                    Rect::new(gutter_x, y, 1, 1),
                );
            }
            let width = content_width.min((area.x + area.width).saturating_sub(content_x));
            frame.render_widget(
                Paragraph::new(line).style(theme.base),
                Rect::new(content_x, y, width, 1),
            );
        }
    }
}

fn block_marker(model: &Model, block: &BlockLayout, theme: &Theme) -> Option<(&'static str, Style)> {
    if model.document.is_editing(block.id) {
        Some(("▌", theme.editing_marker))
    } else if model.editor.is_none() && model.selected == Some(block.id) {
        Some(("│", theme.selected_marker))
    } else {
        None
    }
}

fn block_lines(block: &BlockLayout, editor: Option<&EditorBuffer>, theme: &Theme) -> Vec<Line<'static>> {
    match (&block.body, editor) {
        (BlockBody::Rendered(lines), _) => lines.iter().map(|l| rendered_line(l, theme)).collect(),
        (BlockBody::Editing(rows), Some(buffer)) => rows
            .iter()
            .map(|row| editing_line(row, buffer, theme))
            .collect(),
        (BlockBody::Editing(rows), None) => rows
            .iter()
            .map(|row| Line::styled(row.text.clone(), theme.editing))
            .collect(),
    }
}

fn rendered_line(line: &RenderedLine, theme: &Theme) -> Line<'static> {
    let line_style = theme.line_style(line.line_type());
    match line.spans() {
        Some(spans) => Line::from(
            spans
                .iter()
                .map(|span| {
                    Span::styled(
                        span.text().to_string(),
                        theme.inline_style(line_style, span.style()),
                    )
                })
                .collect::<Vec<_>>(),
        ),
        None => Line::styled(line.content().to_string(), line_style),
    }
}

/// Raw row of the block being edited, with the selection and caret painted.
fn editing_line(row: &EditRow, buffer: &EditorBuffer, theme: &Theme) -> Line<'static> {
    let selection = buffer.selection();
    let caret = buffer.cursor();
    let style_at = |pos: usize| {
        if pos == caret {
            theme.cursor
        } else if (selection.start..selection.end).contains(&pos) {
            theme.editing.patch(theme.selection)
        } else {
            theme.editing
        }
    };

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = theme.editing;
    for (idx, ch) in row.text.chars().enumerate() {
        let style = style_at(row.start + idx);
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }

    let end = row.start + row.len_chars();
    if row.ends_line && caret == end {
        spans.push(Span::styled(" ", theme.cursor));
    }
    Line::from(spans)
}
