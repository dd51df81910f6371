//! Output of [`render_block`](super::render_block).

/// One terminal row of an idle block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    content: String,
    line_type: LineType,
    /// Styled pieces of `content`; empty when the row is unstyled
    spans: Vec<InlineSpan>,
}

impl RenderedLine {
    pub const fn new(content: String, line_type: LineType) -> Self {
        Self::with_spans(content, line_type, Vec::new())
    }

    pub const fn with_spans(content: String, line_type: LineType, spans: Vec<InlineSpan>) -> Self {
        Self {
            content,
            line_type,
            spans,
        }
    }

    /// Plain text of the row, markers included.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn line_type(&self) -> &LineType {
        &self.line_type
    }

    /// Inline spans, or `None` for a row drawn in one style.
    pub fn spans(&self) -> Option<&[InlineSpan]> {
        (!self.spans.is_empty()).then_some(self.spans.as_slice())
    }
}

/// Inline markup active over a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub code: bool,
    pub strikethrough: bool,
    pub link: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self { text, style }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }
}

/// What kind of markdown produced a row; picks the row's base style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Paragraph,
    /// Level 1-6
    Heading(u8),
    CodeBlock,
    BlockQuote,
    /// Nesting depth, 1 for a top-level list
    ListItem(usize),
    Table,
    HorizontalRule,
    /// Raw HTML, shown verbatim
    Html,
    /// `(empty block)` stand-in
    Placeholder,
    Empty,
}

pub(crate) fn spans_to_string(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}
