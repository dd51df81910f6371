//! Turn one block's markdown into styled terminal lines with comrak.

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::types::{InlineSpan, InlineStyle, LineType, RenderedLine, spans_to_string};

/// Shown in place of a block with no visible content.
pub const EMPTY_BLOCK_PLACEHOLDER: &str = "(empty block)";

/// Render a block's committed text, wrapped to `width` columns.
///
/// Always returns at least one line.
pub fn render_block(text: &str, width: usize) -> Vec<RenderedLine> {
    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    let root = parse_document(&arena, text, &options);
    let wrap_width = width.max(10);
    let mut lines = Vec::new();
    for (idx, child) in root.children().enumerate() {
        if idx > 0 {
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }
        process_node(child, &mut lines, 0, wrap_width, None);
    }

    while lines
        .last()
        .is_some_and(|line| matches!(line.line_type(), LineType::Empty))
    {
        lines.pop();
    }
    if lines.is_empty() {
        lines.push(RenderedLine::new(
            EMPTY_BLOCK_PLACEHOLDER.to_string(),
            LineType::Placeholder,
        ));
    }
    lines
}

fn process_node<'a>(
    node: &'a AstNode<'a>,
    lines: &mut Vec<RenderedLine>,
    depth: usize,
    wrap_width: usize,
    list_marker: Option<String>,
) {
    match &node.data.borrow().value {
        NodeValue::Heading(heading) => {
            let prefix = format!("{} ", "#".repeat(heading.level as usize));
            let spans = collect_inline_spans(node);
            let continuation = " ".repeat(prefix.len());
            for line_spans in wrap_spans(&spans, wrap_width, &prefix, &continuation) {
                lines.push(RenderedLine::with_spans(
                    spans_to_string(&line_spans),
                    LineType::Heading(heading.level),
                    line_spans,
                ));
            }
        }

        NodeValue::Paragraph => {
            let spans = collect_inline_spans(node);
            for line_spans in wrap_spans(&spans, wrap_width, "", "") {
                lines.push(RenderedLine::with_spans(
                    spans_to_string(&line_spans),
                    LineType::Paragraph,
                    line_spans,
                ));
            }
        }

        NodeValue::CodeBlock(code_block) => {
            let label = code_block
                .info
                .split_whitespace()
                .next()
                .filter(|s| !s.is_empty())
                .unwrap_or("code");
            let content_width = code_block
                .literal
                .lines()
                .map(display_width)
                .max()
                .unwrap_or(0)
                .min(wrap_width.saturating_sub(4).max(1));
            let label = truncate_text(&format!(" {label} "), content_width + 2);
            lines.push(RenderedLine::new(
                format!(
                    "┌{label}{}┐",
                    "─".repeat((content_width + 2).saturating_sub(display_width(&label)))
                ),
                LineType::CodeBlock,
            ));
            for raw_line in code_block.literal.lines() {
                let body = truncate_text(raw_line, content_width);
                let padding = " ".repeat(content_width.saturating_sub(display_width(&body)));
                let code_style = InlineStyle {
                    code: true,
                    ..InlineStyle::default()
                };
                let line_spans = vec![
                    InlineSpan::new("│ ".to_string(), InlineStyle::default()),
                    InlineSpan::new(body, code_style),
                    InlineSpan::new(format!("{padding} │"), InlineStyle::default()),
                ];
                lines.push(RenderedLine::with_spans(
                    spans_to_string(&line_spans),
                    LineType::CodeBlock,
                    line_spans,
                ));
            }
            lines.push(RenderedLine::new(
                format!("└{}┘", "─".repeat(content_width + 2)),
                LineType::CodeBlock,
            ));
        }

        NodeValue::List(list) => {
            let list_depth = depth + 1;
            let delimiter = match list.delimiter {
                ListDelimType::Paren => ')',
                ListDelimType::Period => '.',
            };
            let number_width = (list.start + node.children().count().saturating_sub(1))
                .to_string()
                .len();
            for (index, child) in node.children().enumerate() {
                let marker = match list.list_type {
                    ListType::Bullet => "• ".to_string(),
                    ListType::Ordered => format!(
                        "{:>number_width$}{delimiter} ",
                        list.start + index
                    ),
                };
                process_node(child, lines, list_depth, wrap_width, Some(marker));
            }
        }

        NodeValue::Item(_) | NodeValue::TaskItem(_) => {
            let indent = "  ".repeat(depth.saturating_sub(1));
            let marker = match &node.data.borrow().value {
                NodeValue::TaskItem(symbol) => task_marker(symbol.is_some()),
                _ => list_marker.unwrap_or_else(|| "• ".to_string()),
            };
            let prefix_first = format!("{indent}{marker}");
            let prefix_next = format!("{indent}{}", " ".repeat(display_width(&marker)));
            let mut rendered_any = false;

            for child in node.children() {
                if matches!(child.data.borrow().value, NodeValue::Paragraph) {
                    let spans = collect_inline_spans(child);
                    let prefix = if rendered_any { &prefix_next } else { &prefix_first };
                    for line_spans in wrap_spans(&spans, wrap_width, prefix, &prefix_next) {
                        lines.push(RenderedLine::with_spans(
                            spans_to_string(&line_spans),
                            LineType::ListItem(depth),
                            line_spans,
                        ));
                    }
                    rendered_any = true;
                } else {
                    if !rendered_any {
                        lines.push(RenderedLine::new(
                            prefix_first.clone(),
                            LineType::ListItem(depth),
                        ));
                        rendered_any = true;
                    }
                    process_node(child, lines, depth, wrap_width, None);
                }
            }

            if !rendered_any {
                lines.push(RenderedLine::new(prefix_first, LineType::ListItem(depth)));
            }
        }

        NodeValue::BlockQuote => {
            render_blockquote(node, lines, wrap_width, 1);
        }

        NodeValue::ThematicBreak => {
            lines.push(RenderedLine::new(
                "─".repeat(wrap_width.min(40)),
                LineType::HorizontalRule,
            ));
        }

        NodeValue::Table(_) => {
            for line in render_table(node, wrap_width) {
                lines.push(RenderedLine::new(line, LineType::Table));
            }
        }

        NodeValue::HtmlBlock(html) => {
            for raw_line in html.literal.lines() {
                lines.push(RenderedLine::new(
                    truncate_text(raw_line, wrap_width),
                    LineType::Html,
                ));
            }
        }

        _ => {
            for child in node.children() {
                process_node(child, lines, depth, wrap_width, list_marker.clone());
            }
        }
    }
}

fn task_marker(checked: bool) -> String {
    if checked { "✓ " } else { "□ " }.to_string()
}

fn render_blockquote<'a>(
    node: &'a AstNode<'a>,
    lines: &mut Vec<RenderedLine>,
    wrap_width: usize,
    quote_depth: usize,
) {
    let prefix = quote_prefix(quote_depth);

    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Paragraph => {
                let spans = collect_inline_spans(child);
                for line_spans in wrap_spans(&spans, wrap_width, &prefix, &prefix) {
                    lines.push(RenderedLine::with_spans(
                        spans_to_string(&line_spans),
                        LineType::BlockQuote,
                        line_spans,
                    ));
                }
            }
            NodeValue::BlockQuote => {
                render_blockquote(child, lines, wrap_width, quote_depth + 1);
            }
            _ => {
                let text = extract_text(child);
                for raw_line in text.lines() {
                    let spans = vec![InlineSpan::new(raw_line.to_string(), InlineStyle::default())];
                    for line_spans in wrap_spans(&spans, wrap_width, &prefix, &prefix) {
                        lines.push(RenderedLine::with_spans(
                            spans_to_string(&line_spans),
                            LineType::BlockQuote,
                            line_spans,
                        ));
                    }
                }
            }
        }
    }
}

fn quote_prefix(depth: usize) -> String {
    "│ ".repeat(depth)
}

fn render_table<'a>(table_node: &'a AstNode<'a>, wrap_width: usize) -> Vec<String> {
    let (alignments, mut rows, has_header) = collect_table_rows(table_node);
    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return Vec::new();
    }

    for row in &mut rows {
        row.resize(num_cols, String::new());
    }

    let mut col_widths = vec![1_usize; num_cols];
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            col_widths[idx] = col_widths[idx].max(display_width(cell));
        }
    }

    // Row width is 1 + sum(col_width + 3).
    let max_table_width = wrap_width.max(4);
    while 1 + col_widths.iter().sum::<usize>() + (3 * num_cols) > max_table_width {
        let Some((widest_idx, &widest)) = col_widths.iter().enumerate().max_by_key(|(_, w)| **w)
        else {
            break;
        };
        if widest <= 1 {
            break;
        }
        col_widths[widest_idx] -= 1;
    }

    let mut lines = vec![render_table_border(&col_widths, '┌', '┬', '┐')];
    for (idx, row) in rows.iter().enumerate() {
        lines.push(render_table_row(row, &col_widths, &alignments));
        if has_header && idx == 0 {
            lines.push(render_table_border(&col_widths, '├', '┼', '┤'));
        }
    }
    lines.push(render_table_border(&col_widths, '└', '┴', '┘'));
    lines
}

fn collect_table_rows<'a>(
    table_node: &'a AstNode<'a>,
) -> (Vec<TableAlignment>, Vec<Vec<String>>, bool) {
    let alignments = match &table_node.data.borrow().value {
        NodeValue::Table(table) => table.alignments.clone(),
        _ => Vec::new(),
    };

    let mut rows = Vec::new();
    let mut has_header = false;
    for row_node in table_node.children() {
        if !matches!(row_node.data.borrow().value, NodeValue::TableRow(_)) {
            continue;
        }
        has_header |= matches!(row_node.data.borrow().value, NodeValue::TableRow(true));
        let cells = row_node
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| extract_text(cell).split_whitespace().collect::<Vec<_>>().join(" "))
            .collect();
        rows.push(cells);
    }

    (alignments, rows, has_header)
}

fn render_table_border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let mut out = String::new();
    out.push(left);
    for (idx, width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width + 2));
        if idx + 1 < widths.len() {
            out.push(middle);
        }
    }
    out.push(right);
    out
}

fn render_table_row(cells: &[String], widths: &[usize], alignments: &[TableAlignment]) -> String {
    let mut out = String::from("│");
    for (idx, width) in widths.iter().enumerate() {
        let content = truncate_text(cells.get(idx).map_or("", String::as_str), *width);
        let padding = width.saturating_sub(display_width(&content));

        out.push(' ');
        match alignments.get(idx).copied().unwrap_or(TableAlignment::None) {
            TableAlignment::Right => {
                out.push_str(&" ".repeat(padding));
                out.push_str(&content);
            }
            TableAlignment::Center => {
                let left = padding / 2;
                out.push_str(&" ".repeat(left));
                out.push_str(&content);
                out.push_str(&" ".repeat(padding - left));
            }
            TableAlignment::Left | TableAlignment::None => {
                out.push_str(&content);
                out.push_str(&" ".repeat(padding));
            }
        }
        out.push_str(" │");
    }
    out
}

fn truncate_text(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) | NodeValue::HtmlInline(t) => text.push_str(t),
        NodeValue::Code(c) => {
            text.push('`');
            text.push_str(&c.literal);
            text.push('`');
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push('\n'),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

fn collect_inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    collect_inline_spans_recursive(node, InlineStyle::default(), &mut spans);
    spans
}

fn collect_inline_spans_recursive<'a>(
    node: &'a AstNode<'a>,
    style: InlineStyle,
    spans: &mut Vec<InlineSpan>,
) {
    let nested = match &node.data.borrow().value {
        NodeValue::List(_) | NodeValue::Item(_) => return,
        NodeValue::Text(t) | NodeValue::HtmlInline(t) => {
            spans.push(InlineSpan::new(t.clone(), style));
            return;
        }
        NodeValue::Code(code) => {
            let code_style = InlineStyle {
                code: true,
                ..InlineStyle::default()
            };
            spans.push(InlineSpan::new(code.literal.clone(), code_style));
            return;
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            spans.push(InlineSpan::new(" ".to_string(), style));
            return;
        }
        NodeValue::Emph => InlineStyle {
            emphasis: true,
            ..style
        },
        NodeValue::Strong => InlineStyle {
            strong: true,
            ..style
        },
        NodeValue::Strikethrough => InlineStyle {
            strikethrough: true,
            ..style
        },
        NodeValue::Link(_) => InlineStyle { link: true, ..style },
        _ => style,
    };
    for child in node.children() {
        collect_inline_spans_recursive(child, nested, spans);
    }
}

/// Greedy word wrap over styled spans.
///
/// Whitespace at a wrap point is dropped. A single word wider than the line
/// is kept whole.
fn wrap_spans(
    spans: &[InlineSpan],
    width: usize,
    prefix_first: &str,
    prefix_next: &str,
) -> Vec<Vec<InlineSpan>> {
    let tokens = spans.iter().flat_map(split_inline_tokens);

    let mut lines: Vec<Vec<InlineSpan>> = Vec::new();
    let mut current: Vec<InlineSpan> = Vec::new();
    let mut current_len = 0usize;
    let mut has_word = false;

    let start_line = |prefix: &str, current: &mut Vec<InlineSpan>, current_len: &mut usize| {
        current.clear();
        if !prefix.is_empty() {
            current.push(InlineSpan::new(prefix.to_string(), InlineStyle::default()));
        }
        *current_len = display_width(prefix);
    };

    start_line(prefix_first, &mut current, &mut current_len);

    for token in tokens {
        let token_len = display_width(token.text());
        let token_is_ws = token.text().chars().all(char::is_whitespace);

        if current_len + token_len > width && has_word {
            while current
                .last()
                .is_some_and(|t| t.text().chars().all(char::is_whitespace))
            {
                current.pop();
            }
            lines.push(std::mem::take(&mut current));
            start_line(prefix_next, &mut current, &mut current_len);
            has_word = false;
        }

        if token_is_ws && !has_word {
            continue;
        }

        current_len += token_len;
        current.push(token);
        has_word = true;
    }

    lines.push(current);
    lines
}

fn split_inline_tokens(span: &InlineSpan) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        if ws_state.is_some_and(|state| state != is_ws) {
            out.push(InlineSpan::new(std::mem::take(&mut buf), span.style()));
        }
        buf.push(ch);
        ws_state = Some(is_ws);
    }

    if !buf.is_empty() {
        out.push(InlineSpan::new(buf, span.style()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(lines: &[RenderedLine]) -> Vec<&str> {
        lines.iter().map(RenderedLine::content).collect()
    }

    #[test]
    fn test_heading_keeps_hashes() {
        let lines = render_block("## Features", 40);
        assert_eq!(contents(&lines), vec!["## Features"]);
        assert_eq!(lines[0].line_type(), &LineType::Heading(2));
    }

    #[test]
    fn test_paragraph_wraps_at_width() {
        let lines = render_block("one two three four five", 10);
        assert_eq!(contents(&lines), vec!["one two", "three four", "five"]);
    }

    #[test]
    fn test_heading_then_paragraph_separated_by_blank() {
        let lines = render_block("# Title\n\nbody", 40);
        assert_eq!(contents(&lines), vec!["# Title", "", "body"]);
    }

    #[test]
    fn test_bullet_list_uses_dots() {
        let lines = render_block("- a\n- b", 40);
        assert_eq!(contents(&lines), vec!["• a", "• b"]);
        assert_eq!(lines[0].line_type(), &LineType::ListItem(1));
    }

    #[test]
    fn test_nested_list_indents() {
        let lines = render_block("- a\n  - b", 40);
        assert_eq!(contents(&lines), vec!["• a", "  • b"]);
        assert_eq!(lines[1].line_type(), &LineType::ListItem(2));
    }

    #[test]
    fn test_ordered_list_numbers() {
        let lines = render_block("1. First item\n2. Second item", 40);
        assert_eq!(contents(&lines), vec!["1. First item", "2. Second item"]);
    }

    #[test]
    fn test_task_list_markers() {
        let lines = render_block("- [ ] Task to do\n- [x] Completed task", 40);
        assert_eq!(contents(&lines), vec!["□ Task to do", "✓ Completed task"]);
    }

    #[test]
    fn test_inline_styles() {
        let lines = render_block("Support for **bold**, *italic*, and [links](https://example.com)", 80);
        let spans = lines[0].spans().unwrap();
        assert!(spans.iter().any(|s| s.text() == "bold" && s.style().strong));
        assert!(spans.iter().any(|s| s.text() == "italic" && s.style().emphasis));
        assert!(spans.iter().any(|s| s.text() == "links" && s.style().link));
    }

    #[test]
    fn test_inline_code_and_strikethrough() {
        let lines = render_block("use `x` not ~~y~~", 80);
        let spans = lines[0].spans().unwrap();
        assert!(spans.iter().any(|s| s.text() == "x" && s.style().code));
        assert!(spans.iter().any(|s| s.text() == "y" && s.style().strikethrough));
    }

    #[test]
    fn test_code_block_frame() {
        let lines = render_block("```\nYour code here\n```", 40);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].content().starts_with("┌ code "));
        assert_eq!(lines[1].content(), "│ Your code here │");
        assert!(lines[2].content().starts_with('└'));
    }

    #[test]
    fn test_quote_prefix() {
        let lines = render_block("> Your quote here", 40);
        assert_eq!(contents(&lines), vec!["│ Your quote here"]);
        assert_eq!(lines[0].line_type(), &LineType::BlockQuote);
    }

    #[test]
    fn test_table_renders_box() {
        let lines = render_block("| Header 1 | Header 2 |\n|----------|----------|\n| Cell 1   | Cell 2   |", 60);
        assert_eq!(
            contents(&lines),
            vec![
                "┌──────────┬──────────┐",
                "│ Header 1 │ Header 2 │",
                "├──────────┼──────────┤",
                "│ Cell 1   │ Cell 2   │",
                "└──────────┴──────────┘",
            ]
        );
    }

    #[test]
    fn test_divider() {
        let lines = render_block("---", 20);
        assert_eq!(lines[0].line_type(), &LineType::HorizontalRule);
    }

    #[test]
    fn test_html_block_shown_raw() {
        let lines = render_block("<details>\n  <summary>Click to expand\n</details>", 40);
        assert_eq!(lines[0].content(), "<details>");
        assert_eq!(lines[0].line_type(), &LineType::Html);
    }

    #[test]
    fn test_empty_block_has_placeholder() {
        let lines = render_block("", 40);
        assert_eq!(contents(&lines), vec![EMPTY_BLOCK_PLACEHOLDER]);
        assert_eq!(lines[0].line_type(), &LineType::Placeholder);
    }

    #[test]
    fn test_wide_chars_wrap_by_display_width() {
        let lines = render_block("日本語 日本語", 8);
        assert_eq!(contents(&lines), vec!["日本語", "日本語"]);
    }
}
