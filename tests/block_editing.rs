//! End-to-end editing sessions driven through `update`.

use blockdown::app::{Message, Model, update};
use blockdown::document::Document;
use blockdown::editor::Direction;

fn type_text(model: Model, text: &str) -> Model {
    text.chars()
        .fold(model, |model, ch| update(model, Message::EditorInsertChar(ch)))
}

fn session(source: &str) -> Model {
    Model::new("session.md", Document::parse(source), (100, 30))
}

#[test]
fn test_write_a_list_from_scratch() {
    let model = session("# Shopping");
    let model = update(model, Message::EditSelected);
    let model = update(model, Message::EditorEnter(false));
    let model = type_text(model, "- milk");
    let model = update(model, Message::EditorEnter(false));
    let model = type_text(model, "eggs");
    let model = update(model, Message::EditorEnter(false));
    let model = update(model, Message::EditorTab(false));
    let model = type_text(model, "brown");
    let model = update(model, Message::StopEditing);

    assert_eq!(
        model.document.to_markdown(),
        "# Shopping\n\n- milk\n- eggs\n  - brown"
    );
}

#[test]
fn test_enter_on_empty_item_leaves_the_list() {
    let model = session("- a");
    let model = update(model, Message::EditSelected);
    let model = update(model, Message::EditorEnter(false));
    let model = update(model, Message::EditorEnter(false));
    let model = type_text(model, "after");
    let model = update(model, Message::StopEditing);

    assert_eq!(model.document.blocks()[0].text(), "- a\n\nafter");
}

#[test]
fn test_saved_markdown_reparses_to_same_blocks() {
    let model = session("# One\n\nTwo");
    let model = update(model, Message::AddBlock);
    let model = update(model, Message::OpenMenu);
    let model = update(model, Message::MenuChoose(9));
    let markdown = model.document.to_markdown();

    let reparsed = Document::parse(&markdown);
    let texts: Vec<_> = reparsed.blocks().iter().map(|b| b.text()).collect();
    assert_eq!(texts, vec!["# One", "Two", "New block", "```\nYour code here\n```"]);
}

#[test]
fn test_soft_break_inside_block_becomes_separate_blocks_after_reparse() {
    let model = session("first");
    let model = update(model, Message::EditSelected);
    let model = update(model, Message::EditorEnter(true));
    let model = update(model, Message::EditorEnter(true));
    let model = type_text(model, "second");
    let model = update(model, Message::StopEditing);
    assert_eq!(model.document.len(), 1);

    let reparsed = Document::parse(&model.document.to_markdown());
    assert_eq!(reparsed.len(), 2);
}

#[test]
fn test_walk_through_every_block_with_arrows() {
    let model = session("a\n\nb\n\nc");
    let mut model = update(model, Message::EditSelected);
    let mut visited = vec![model.editor.as_ref().map(|b| b.text()).unwrap()];
    for _ in 0..2 {
        model = update(model, Message::EditorMoveCursor(Direction::Down, false));
        visited.push(model.editor.as_ref().map(|b| b.text()).unwrap());
    }
    assert_eq!(visited, vec!["a", "b", "c"]);
    assert!(!model.document.is_dirty());
}

#[test]
fn test_only_one_block_is_active_at_a_time() {
    let model = session("a\n\nb\n\nc");
    let ids: Vec<_> = model.document.blocks().iter().map(|b| b.id()).collect();
    let mut model = model;
    for id in &ids {
        model = update(model, Message::ClickBlock(*id));
        let editing = ids
            .iter()
            .filter(|other| model.document.is_editing(**other))
            .count();
        assert_eq!(editing, 1);
    }
}
