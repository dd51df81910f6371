use super::*;
use crate::app::{GUTTER_WIDTH, Message, Model, ToastLevel, update};
use crate::config::ThemeMode;
use crate::document::{Document, EMPTY_BLOCK_PLACEHOLDER};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn create_test_model() -> Model {
    let doc = Document::parse("# Title\n\nSome **bold** text\n\n- one\n- two");
    Model::new("notes.md", doc, (80, 24))
}

fn draw(model: &Model) -> Buffer {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

fn screen_text(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|y| row_text(buffer, y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_render_shows_blocks_in_order() {
    let buffer = draw(&create_test_model());
    assert!(row_text(&buffer, 0).contains("Title"));
    assert!(row_text(&buffer, 2).contains("Some bold text"));
    assert!(row_text(&buffer, 4).contains("one"));
    assert!(row_text(&buffer, 5).contains("two"));
}

#[test]
fn test_selected_block_has_gutter_marker() {
    let model = create_test_model();
    let buffer = draw(&model);
    let gutter_x = column_left(buffer.area, model.content_width());
    assert_eq!(buffer[(gutter_x, 0)].symbol(), "│");
    assert_eq!(buffer[(gutter_x, 2)].symbol(), " ");
}

#[test]
fn test_editing_block_shows_raw_markdown() {
    let model = update(
        update(create_test_model(), Message::SelectNext),
        Message::EditSelected,
    );
    let buffer = draw(&model);
    let gutter_x = column_left(buffer.area, model.content_width());

    assert!(row_text(&buffer, 2).contains("Some **bold** text"));
    assert_eq!(buffer[(gutter_x, 2)].symbol(), "▌");
    assert_eq!(buffer[(gutter_x, 0)].symbol(), " ");
}

#[test]
fn test_caret_cell_is_drawn_after_last_char() {
    let model = update(create_test_model(), Message::EditSelected);
    let buffer = draw(&model);
    let content_x = column_left(buffer.area, model.content_width()) + GUTTER_WIDTH;
    let theme = style::Theme::for_mode(ThemeMode::Dark);

    let caret = &buffer[(content_x + 7, 0)];
    assert_eq!(caret.symbol(), " ");
    assert_eq!(caret.bg, theme.cursor.bg.unwrap());
}

#[test]
fn test_status_bar_shows_mode_and_position() {
    let model = create_test_model();
    let buffer = draw(&model);
    let status = row_text(&buffer, 23);
    assert!(status.contains("VIEW"));
    assert!(status.contains("notes.md"));
    assert!(status.contains("Block 1/3"));

    let model = update(model, Message::EditSelected);
    let buffer = draw(&model);
    let status = row_text(&buffer, 23);
    assert!(status.contains("EDIT"));
    assert!(status.contains("Ln 1, Col 8"));
}

#[test]
fn test_status_bar_marks_unsaved_and_read_only() {
    let mut model = update(create_test_model(), Message::AddBlock);
    model.read_only = true;
    let buffer = draw(&model);
    let status = row_text(&buffer, 23);
    assert!(status.contains("* notes.md"));
    assert!(status.contains("[read-only]"));
}

#[test]
fn test_toast_is_drawn_above_status_bar() {
    let mut model = create_test_model();
    model.show_toast(ToastLevel::Success, "File saved as notes.md");
    let buffer = draw(&model);
    assert!(row_text(&buffer, 22).contains("[ok] File saved as notes.md"));
    assert!(row_text(&buffer, 23).contains("VIEW"));
}

#[test]
fn test_empty_block_shows_placeholder() {
    let doc = Document::from_blocks(["first", ""]);
    let model = Model::new("notes.md", doc, (80, 24));
    let buffer = draw(&model);
    assert!(row_text(&buffer, 2).contains(EMPTY_BLOCK_PLACEHOLDER));
}

#[test]
fn test_menu_overlay_lists_categories_and_items() {
    let model = update(create_test_model(), Message::OpenMenu);
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("Insert block"));
    assert!(screen.contains("Basic"));
    assert!(screen.contains("Content"));
    assert!(screen.contains("2  Heading 1"));
    assert!(screen.contains("Divider"));
}

#[test]
fn test_settings_overlay_shows_current_values() {
    let model = update(create_test_model(), Message::ToggleSettings);
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("Options"));
    assert!(screen.contains("< 80 cols >"));
    assert!(screen.contains("< 1 rows >"));
    assert!(screen.contains("< dark >"));
}

#[test]
fn test_prompt_overlay_shows_input() {
    let model = update(create_test_model(), Message::StartSave);
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("Save as"));
    assert!(screen.contains("notes.md"));
}

#[test]
fn test_help_overlay_starts_at_top() {
    let model = update(create_test_model(), Message::ToggleHelp);
    let screen = screen_text(&draw(&model));
    for section in ["Help", "Blocks", "Editing", "j/k scroll"] {
        assert!(screen.contains(section), "missing {section}");
    }
}

#[test]
fn test_help_overlay_scrolls_to_remaining_sections() {
    let mut model = update(create_test_model(), Message::ToggleHelp);
    for _ in 0..40 {
        model = update(model, Message::HelpScrollDown);
    }
    let screen = screen_text(&draw(&model));
    for section in ["Help", "File", "Config", "Local override"] {
        assert!(screen.contains(section), "missing {section}");
    }
    assert!(!screen.contains("Select block"));
}

#[test]
fn test_narrow_width_setting_wraps_text() {
    let doc = Document::parse("alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu");
    let mut model = Model::new("notes.md", doc, (80, 24));
    model.settings.max_width = 40;
    model.relayout();
    let buffer = draw(&model);
    assert!(!row_text(&buffer, 1).trim().is_empty());
    assert!(row_text(&buffer, 0).trim().chars().count() <= 42);
}

#[test]
fn test_scrolled_view_starts_at_offset() {
    let mut md = String::new();
    for i in 0..40 {
        md.push_str(&format!("Block {i}\n\n"));
    }
    let model = Model::new("notes.md", Document::parse(&md), (80, 24));
    let model = update(model, Message::ScrollDown(10));
    let buffer = draw(&model);
    assert!(row_text(&buffer, 0).contains("Block 5"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let model = Model::new("notes.md", Document::parse("# Hi\n\nthere"), (6, 2));
    let mut terminal = Terminal::new(TestBackend::new(6, 2)).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}
