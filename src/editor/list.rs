//! List-line recognition and two-space indentation.
//!
//! A list line is leading whitespace, a bullet (`-`, `*`, `+`) or a decimal
//! number followed by `.`, at least one whitespace char, then the item text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static LIST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)([-*+]|\d+\.)(\s+)(.*)$").expect("list line pattern is valid")
});

/// Spaces added or removed by one indentation step.
const INDENT_UNIT: &str = "  ";

/// Kind of list marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// `-`, `*` or `+`.
    Unordered,
    /// Digits followed by `.`.
    Ordered,
}

/// The pieces of a line that matched the list pattern.
///
/// Borrowed from the classified line; nothing here is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLineMatch<'a> {
    /// Leading whitespace exactly as written (tabs are not normalised).
    pub indent: &'a str,
    /// Number of chars in `indent`. A tab counts as one.
    pub indent_width: usize,
    pub kind: MarkerKind,
    /// Literal marker token, e.g. `-` or `3.`.
    pub marker: &'a str,
    /// Whitespace between marker and item text.
    pub trailing_space: &'a str,
    /// Everything after the marker whitespace.
    pub item: &'a str,
}

impl ListLineMatch<'_> {
    /// The prefix a continuation line starts with.
    ///
    /// Ordered markers count up by one. A number too large to increment is
    /// reused verbatim.
    pub fn next_marker(&self) -> String {
        let marker = match self.kind {
            MarkerKind::Unordered => Cow::Borrowed(self.marker),
            MarkerKind::Ordered => self
                .marker
                .trim_end_matches('.')
                .parse::<u64>()
                .ok()
                .and_then(|n| n.checked_add(1))
                .map_or(Cow::Borrowed(self.marker), |n| Cow::Owned(format!("{n}."))),
        };
        format!("{}{}{}", self.indent, marker, self.trailing_space)
    }

    /// Whether the item text is blank.
    pub fn is_empty_item(&self) -> bool {
        self.item.trim().is_empty()
    }
}

/// Classify a single line. Returns `None` for anything that is not a list item.
pub fn classify(line: &str) -> Option<ListLineMatch<'_>> {
    let caps = LIST_LINE.captures(line)?;
    let indent = caps.get(1).map_or("", |m| m.as_str());
    let marker = caps.get(2).map_or("", |m| m.as_str());
    let kind = if marker.ends_with('.') {
        MarkerKind::Ordered
    } else {
        MarkerKind::Unordered
    };
    Some(ListLineMatch {
        indent,
        indent_width: indent.chars().count(),
        kind,
        marker,
        trailing_space: caps.get(3).map_or("", |m| m.as_str()),
        item: caps.get(4).map_or("", |m| m.as_str()),
    })
}

/// Whether `line` is a list item.
pub fn is_list_item(line: &str) -> bool {
    LIST_LINE.is_match(line)
}

/// Which way Tab moves a list line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentDirection {
    Indent,
    Outdent,
}

impl IndentDirection {
    /// Shift+Tab outdents, plain Tab indents.
    pub const fn from_shift(shift: bool) -> Self {
        if shift { Self::Outdent } else { Self::Indent }
    }
}

/// Indent or outdent one list line by two spaces.
///
/// Non-list lines come back untouched, as do list lines with fewer than two
/// chars of indentation when outdenting.
pub fn shift_indentation(line: &str, direction: IndentDirection) -> Cow<'_, str> {
    let Some(m) = classify(line) else {
        return Cow::Borrowed(line);
    };
    match direction {
        IndentDirection::Indent => Cow::Owned(format!("{INDENT_UNIT}{line}")),
        IndentDirection::Outdent if m.indent_width >= 2 => {
            let cut = line.char_indices().nth(2).map_or(line.len(), |(i, _)| i);
            Cow::Borrowed(&line[cut..])
        }
        IndentDirection::Outdent => Cow::Borrowed(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_bullet() {
        let m = classify("- item").unwrap();
        assert_eq!(m.kind, MarkerKind::Unordered);
        assert_eq!(m.marker, "-");
        assert_eq!(m.indent_width, 0);
        assert_eq!(m.item, "item");
    }

    #[test]
    fn test_classify_indented_ordered() {
        let m = classify("  3. foo").unwrap();
        assert_eq!(m.kind, MarkerKind::Ordered);
        assert_eq!(m.marker, "3.");
        assert_eq!(m.indent_width, 2);
        assert_eq!(m.item, "foo");
    }

    #[test]
    fn test_classify_plain_text_is_not_a_list() {
        assert!(classify("plain text").is_none());
        assert!(!is_list_item("plain text"));
    }

    #[test]
    fn test_classify_requires_space_after_marker() {
        assert!(classify("-item").is_none());
        assert!(classify("3.foo").is_none());
        assert!(classify("-").is_none());
    }

    #[test]
    fn test_classify_star_and_plus() {
        assert_eq!(classify("* a").unwrap().marker, "*");
        assert_eq!(classify("+ a").unwrap().marker, "+");
    }

    #[test]
    fn test_classify_keeps_wide_trailing_space() {
        let m = classify("-   spaced").unwrap();
        assert_eq!(m.trailing_space, "   ");
        assert_eq!(m.item, "spaced");
    }

    #[test]
    fn test_classify_tab_indent_counts_as_one() {
        let m = classify("\t- item").unwrap();
        assert_eq!(m.indent, "\t");
        assert_eq!(m.indent_width, 1);
    }

    #[test]
    fn test_classify_marker_only_has_empty_item() {
        let m = classify("- ").unwrap();
        assert_eq!(m.item, "");
        assert!(m.is_empty_item());
    }

    #[test]
    fn test_next_marker_bullet_reuses_marker() {
        assert_eq!(classify("  * x").unwrap().next_marker(), "  * ");
    }

    #[test]
    fn test_next_marker_increments_ordered() {
        assert_eq!(classify("1. apple").unwrap().next_marker(), "2. ");
        assert_eq!(classify("   9.  x").unwrap().next_marker(), "   10.  ");
    }

    #[test]
    fn test_next_marker_drops_leading_zeros() {
        assert_eq!(classify("007. bond").unwrap().next_marker(), "8. ");
    }

    #[test]
    fn test_next_marker_overflow_reuses_marker() {
        let line = "99999999999999999999999. big";
        assert_eq!(
            classify(line).unwrap().next_marker(),
            "99999999999999999999999. "
        );
    }

    #[test]
    fn test_indent_prepends_two_spaces() {
        assert_eq!(shift_indentation("- a", IndentDirection::Indent), "  - a");
    }

    #[test]
    fn test_outdent_removes_two_chars() {
        assert_eq!(
            shift_indentation("    - a", IndentDirection::Outdent),
            "  - a"
        );
    }

    #[test]
    fn test_outdent_with_one_space_is_noop() {
        assert_eq!(shift_indentation(" - a", IndentDirection::Outdent), " - a");
        assert_eq!(shift_indentation("- a", IndentDirection::Outdent), "- a");
    }

    #[test]
    fn test_outdent_tab_indent_is_noop() {
        assert_eq!(
            shift_indentation("\t- a", IndentDirection::Outdent),
            "\t- a"
        );
    }

    #[test]
    fn test_non_list_line_is_untouched() {
        assert!(matches!(
            shift_indentation("hello", IndentDirection::Indent),
            Cow::Borrowed("hello")
        ));
    }

    #[test]
    fn test_direction_from_shift() {
        assert_eq!(IndentDirection::from_shift(true), IndentDirection::Outdent);
        assert_eq!(IndentDirection::from_shift(false), IndentDirection::Indent);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn outdent_undoes_indent(
                indent in " {0,6}",
                marker in prop_oneof![Just("-".to_string()), Just("*".to_string()), "[0-9]{1,3}\\."],
                item in "[a-z ]{0,12}",
            ) {
                let line = format!("{indent}{marker} {item}");
                let indented = shift_indentation(&line, IndentDirection::Indent).into_owned();
                let restored = shift_indentation(&indented, IndentDirection::Outdent);
                prop_assert_eq!(restored.as_ref(), line.as_str());
            }

            #[test]
            fn indent_is_identity_on_non_list_lines(line in "[a-zA-Z][a-zA-Z ]{0,20}") {
                let shifted = shift_indentation(&line, IndentDirection::Indent);
                prop_assert_eq!(shifted.as_ref(), line.as_str());
            }
        }
    }
}
