//! Block-insertion menu catalogue.

/// A block template offered by the insertion menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub category: &'static str,
    pub label: &'static str,
    pub template: &'static str,
}

const fn item(category: &'static str, label: &'static str, template: &'static str) -> MenuItem {
    MenuItem {
        category,
        label,
        template,
    }
}

/// Every insertable block, grouped by category in display order.
pub const MENU_ITEMS: &[MenuItem] = &[
    item("Basic", "Text", "Type your text here"),
    item("Basic", "Heading 1", "# Heading 1"),
    item("Basic", "Heading 2", "## Heading 2"),
    item("Basic", "Heading 3", "### Heading 3"),
    item("Lists", "Bullet List", "- List item\n- Another item"),
    item("Lists", "Numbered List", "1. First item\n2. Second item"),
    item(
        "Lists",
        "Todo List",
        "- [ ] Task to do\n- [x] Completed task",
    ),
    item(
        "Lists",
        "Toggle List",
        "<details>\n  <summary>Click to expand</summary>\n  Hidden content here\n</details>",
    ),
    item("Content", "Quote", "> Your quote here"),
    item("Content", "Code Block", "```\nYour code here\n```"),
    item(
        "Content",
        "Table",
        "| Header 1 | Header 2 |\n|----------|----------|\n| Cell 1   | Cell 2   |",
    ),
    item("Content", "Divider", "---"),
];

/// Open insertion menu with a highlighted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub selected: usize,
}

impl MenuState {
    pub const fn up(&mut self) {
        self.selected = if self.selected == 0 {
            MENU_ITEMS.len() - 1
        } else {
            self.selected - 1
        };
    }

    pub const fn down(&mut self) {
        self.selected = (self.selected + 1) % MENU_ITEMS.len();
    }

    pub fn current(&self) -> Option<&'static MenuItem> {
        MENU_ITEMS.get(self.selected)
    }
}

/// Rows of the menu as drawn: a header row before each new category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRow {
    Category(&'static str),
    Item(usize),
}

pub fn menu_rows() -> Vec<MenuRow> {
    let mut rows = Vec::with_capacity(MENU_ITEMS.len() + 3);
    let mut last = "";
    for (idx, entry) in MENU_ITEMS.iter().enumerate() {
        if entry.category != last {
            rows.push(MenuRow::Category(entry.category));
            last = entry.category;
        }
        rows.push(MenuRow::Item(idx));
    }
    rows
}
