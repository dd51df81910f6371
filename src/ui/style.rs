//! Theming and color definitions.
//!
//! Each [`ThemeMode`] maps to a [`Theme`] of ratatui styles. The dark theme
//! sticks to ANSI colors that follow the terminal palette; light and sepia
//! paint their own background.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;
use crate::document::{InlineStyle, LineType};

/// Theme configuration for the entire application.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Base text style, including the page background
    pub base: Style,
    /// Heading level 1 style
    pub h1: Style,
    /// Heading level 2 style
    pub h2: Style,
    /// Heading level 3+ style
    pub h3: Style,
    /// Code block style
    pub code: Style,
    /// Inline code style
    pub inline_code: Style,
    /// Block quote style
    pub quote: Style,
    /// Link style
    pub link: Style,
    /// Horizontal rule, table borders and placeholders
    pub dim: Style,
    /// Marker beside the selected block
    pub selected_marker: Style,
    /// Marker beside the block being edited
    pub editing_marker: Style,
    /// Raw text of the block being edited
    pub editing: Style,
    /// Selected text in the block being edited
    pub selection: Style,
    /// Caret cell
    pub cursor: Style,
    /// Status bar
    pub status: Style,
    /// Popup panels
    pub popup: Style,
    /// Section titles inside popups
    pub popup_title: Style,
    /// Highlighted row inside popups
    pub popup_highlight: Style,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Sepia => Self::sepia(),
        }
    }

    /// Create a theme for dark terminals.
    pub fn dark() -> Self {
        Self {
            base: Style::default(),
            h1: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            h3: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(245)),
            inline_code: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            quote: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            dim: Style::default().fg(Color::Indexed(240)),
            selected_marker: Style::default().fg(Color::Indexed(244)),
            editing_marker: Style::default().fg(Color::Yellow),
            editing: Style::default().fg(Color::White),
            selection: Style::default().bg(Color::Indexed(238)),
            cursor: Style::default().bg(Color::White).fg(Color::Black),
            status: Style::default().bg(Color::Indexed(236)).fg(Color::Indexed(252)),
            popup: Style::default().bg(Color::Black).fg(Color::White),
            popup_title: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            popup_highlight: Style::default().bg(Color::Indexed(24)).fg(Color::White),
        }
    }

    /// Create a theme for light terminals.
    pub fn light() -> Self {
        let paper = Color::Indexed(255);
        let ink = Color::Indexed(235);
        Self {
            base: Style::default().bg(paper).fg(ink),
            h1: Style::default()
                .fg(Color::Indexed(31))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default()
                .fg(Color::Indexed(28))
                .add_modifier(Modifier::BOLD),
            h3: Style::default()
                .fg(Color::Indexed(136))
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(240)),
            inline_code: Style::default()
                .fg(Color::Indexed(124))
                .add_modifier(Modifier::BOLD),
            quote: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::UNDERLINED),
            dim: Style::default().fg(Color::Indexed(245)),
            selected_marker: Style::default().fg(Color::Indexed(248)),
            editing_marker: Style::default().fg(Color::Indexed(25)),
            editing: Style::default().fg(ink),
            selection: Style::default().bg(Color::Indexed(153)),
            cursor: Style::default().bg(ink).fg(paper),
            status: Style::default().bg(Color::Indexed(252)).fg(Color::Indexed(235)),
            popup: Style::default().bg(Color::Indexed(254)).fg(ink),
            popup_title: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::BOLD),
            popup_highlight: Style::default().bg(Color::Indexed(153)).fg(ink),
        }
    }

    /// Warm paper tones.
    pub fn sepia() -> Self {
        let paper = Color::Rgb(244, 236, 216);
        let ink = Color::Rgb(91, 70, 54);
        Self {
            base: Style::default().bg(paper).fg(ink),
            h1: Style::default()
                .fg(Color::Rgb(120, 60, 30))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default()
                .fg(Color::Rgb(120, 60, 30))
                .add_modifier(Modifier::BOLD),
            h3: Style::default()
                .fg(Color::Rgb(140, 90, 40))
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Rgb(110, 95, 80)),
            inline_code: Style::default()
                .fg(Color::Rgb(150, 50, 40))
                .add_modifier(Modifier::BOLD),
            quote: Style::default()
                .fg(Color::Rgb(110, 85, 60))
                .add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::Rgb(40, 80, 120))
                .add_modifier(Modifier::UNDERLINED),
            dim: Style::default().fg(Color::Rgb(170, 150, 125)),
            selected_marker: Style::default().fg(Color::Rgb(170, 150, 125)),
            editing_marker: Style::default().fg(Color::Rgb(150, 80, 30)),
            editing: Style::default().fg(ink),
            selection: Style::default().bg(Color::Rgb(225, 205, 165)),
            cursor: Style::default().bg(ink).fg(paper),
            status: Style::default()
                .bg(Color::Rgb(225, 212, 185))
                .fg(ink),
            popup: Style::default().bg(Color::Rgb(236, 224, 198)).fg(ink),
            popup_title: Style::default()
                .fg(Color::Rgb(120, 60, 30))
                .add_modifier(Modifier::BOLD),
            popup_highlight: Style::default().bg(Color::Rgb(225, 205, 165)).fg(ink),
        }
    }

    /// Style for a rendered line of the given type.
    pub fn line_style(&self, line_type: &LineType) -> Style {
        match line_type {
            LineType::Heading(1) => self.h1,
            LineType::Heading(2) => self.h2,
            LineType::Heading(_) => self.h3,
            LineType::CodeBlock => self.code,
            LineType::BlockQuote => self.quote,
            LineType::HorizontalRule | LineType::Table => self.dim,
            LineType::Placeholder => self.dim.add_modifier(Modifier::ITALIC),
            LineType::Html => self.code.add_modifier(Modifier::DIM),
            LineType::ListItem(_) | LineType::Paragraph | LineType::Empty => Style::default(),
        }
    }

    /// Style for an inline span, merged with a base line style.
    pub fn inline_style(&self, base: Style, inline: InlineStyle) -> Style {
        let mut style = base;
        if inline.emphasis {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if inline.strong {
            style = style.add_modifier(Modifier::BOLD);
        }
        if inline.strikethrough {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        if inline.link {
            style = style.patch(self.link);
        }
        if inline.code {
            style = style.patch(self.inline_code);
        }
        style
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
