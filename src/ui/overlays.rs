use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::menu::{MENU_ITEMS, MenuRow, MenuState, menu_rows};
use crate::app::{Model, PathPrompt};
use crate::config::SettingsField;

use super::style::Theme;

const MENU_WIDTH: u16 = 30;

/// Where the insertion menu is drawn inside `area`.
pub fn menu_rect(area: Rect) -> Rect {
    // A dozen items plus three headers
    #[allow(clippy::cast_possible_truncation)]
    let rows = menu_rows().len() as u16;
    centered_popup_rect(MENU_WIDTH, rows + 2, area)
}

/// First content row of the menu popup (below the border).
pub const fn menu_content_top(popup: Rect) -> u16 {
    popup.y + 1
}

pub fn render_menu_overlay(menu: &MenuState, theme: &Theme, frame: &mut Frame, area: Rect) {
    let popup = menu_rect(area);
    let lines: Vec<Line> = menu_rows()
        .into_iter()
        .map(|row| match row {
            MenuRow::Category(name) => Line::styled(format!(" {name}"), theme.popup_title),
            MenuRow::Item(idx) => {
                let shortcut = if idx < 9 {
                    format!("{}", idx + 1)
                } else {
                    " ".to_string()
                };
                let label = MENU_ITEMS.get(idx).map_or("", |item| item.label);
                let text = format!("  {shortcut}  {label}");
                if idx == menu.selected {
                    Line::styled(text, theme.popup_highlight)
                } else {
                    Line::raw(text)
                }
            }
        })
        .collect();

    let block = Block::default()
        .title("Insert block")
        .borders(Borders::ALL)
        .style(theme.popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_settings_overlay(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let popup = centered_popup_rect(44, 9, area);
    let settings = &model.settings;

    let mut lines: Vec<Line> = SettingsField::ALL
        .iter()
        .enumerate()
        .map(|(row, field)| {
            let value = match field {
                SettingsField::Width => format!("{} cols", settings.max_width),
                SettingsField::Spacing => format!("{} rows", settings.block_spacing),
                SettingsField::Theme => settings.theme.name().to_string(),
            };
            let text = format!("{:<16}< {} >", field.label(), value);
            if row == model.settings_row {
                Line::styled(text, theme.popup_highlight)
            } else {
                Line::raw(text)
            }
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "j/k select · h/l change · Esc closes",
        Style::default().fg(Color::Indexed(245)),
    ));

    let block = Block::default()
        .title("Options")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(theme.popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_prompt_overlay(prompt: &PathPrompt, theme: &Theme, frame: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(8).clamp(20, 64);
    let popup = centered_popup_rect(width, 3, area);
    let line = Line::from(vec![
        Span::raw(prompt.input.clone()),
        Span::styled(" ", theme.cursor),
    ]);
    let block = Block::default()
        .title(prompt.title())
        .title_bottom(Line::from(" Enter confirms · Esc cancels ").right_aligned())
        .borders(Borders::ALL)
        .style(theme.popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(line).block(block), popup);
}

fn help_popup_rect(area: Rect) -> Rect {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    centered_popup_rect(popup_width, popup_height, area)
}

/// Help rows visible at once in a terminal `area`; one row is kept for the footer.
fn help_content_height(area: Rect) -> usize {
    usize::from(help_popup_rect(area).height.saturating_sub(5))
}

/// Largest useful help scroll offset for a terminal of `width` x `height`.
pub fn help_max_scroll(width: u16, height: u16) -> usize {
    let area = Rect::new(0, 0, width, height);
    help_lines("", "", Style::default())
        .len()
        .saturating_sub(help_content_height(area))
}

fn help_lines(global_cfg: &str, local_cfg: &str, section_style: Style) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();

    // Blocks
    lines.push(Line::styled("Blocks", section_style));
    lines.push(Line::raw("  j/k or Up/Down      Select block"));
    lines.push(Line::raw("  Enter / i / click   Edit block"));
    lines.push(Line::raw("  a                   Add block"));
    lines.push(Line::raw("  d / Delete          Delete block"));
    lines.push(Line::raw("  m / right click     Insert block menu"));
    lines.push(Line::raw("  g / G               First / last block"));
    lines.push(Line::raw(""));

    // Editing
    lines.push(Line::styled("Editing", section_style));
    lines.push(Line::raw("  Esc                 Finish editing"));
    lines.push(Line::raw("  Tab / Shift+Tab     Indent / outdent list items"));
    lines.push(Line::raw("  Enter               Continue list or split block"));
    lines.push(Line::raw("  Shift/Alt+Enter     Line break in block"));
    lines.push(Line::raw("  Up/Down at edges    Move to neighbouring block"));
    lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    lines.push(Line::raw("  Ctrl+A              Select all"));
    lines.push(Line::raw(""));

    // File
    lines.push(Line::styled("File", section_style));
    lines.push(Line::raw("  Ctrl+O              Open"));
    lines.push(Line::raw("  Ctrl+S              Save as"));
    lines.push(Line::raw("  o                   Options"));
    lines.push(Line::raw("  q / Ctrl+Q          Quit"));
    lines.push(Line::raw(""));

    // Config
    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));
    lines
}

pub fn render_help_overlay(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let popup = help_popup_rect(area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());
    let all_lines = help_lines(&global_cfg, &local_cfg, theme.popup_title);

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(theme.popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Border plus padding on each side
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );
    let content_height = help_content_height(area);
    if content_height == 0 {
        return;
    }
    let scroll = model
        .help_scroll
        .min(all_lines.len().saturating_sub(content_height));
    let end = (scroll + content_height).min(all_lines.len());

    let mut visible: Vec<Line> = all_lines[scroll..end].to_vec();
    visible.resize(content_height, Line::raw(""));
    visible.push(Line::styled("j/k scroll │ other keys close", theme.popup_title));
    frame.render_widget(Paragraph::new(visible), inner);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
