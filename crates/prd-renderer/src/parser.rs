//! Line classification for the document dialect.
//!
//! Every line maps to exactly one [`Node`] by prefix inspection alone. The
//! predicates are tried in a fixed order and the first match wins:
//!
//! | Prefix            | Node                       |
//! |-------------------|----------------------------|
//! | `# `              | heading level 1            |
//! | `## `             | heading level 2            |
//! | `### `            | heading level 3            |
//! | `- ` / `* `       | unordered list item        |
//! | digits `.` space  | ordered list item          |
//! | `---`             | rule                       |
//! | blank             | spacer                     |
//! | anything else     | paragraph                  |

use std::sync::LazyLock;

use regex::Regex;

static ORDERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\.\s").unwrap());

/// Heading depth supported by the dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric level (1-3).
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }
}

/// List flavour of a list item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListKind {
    Unordered,
    Ordered,
}

/// One structural unit of a document block.
///
/// Text is borrowed from the source line with its prefix removed and is
/// otherwise raw: no escaping or inline formatting has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node<'a> {
    Heading {
        level: HeadingLevel,
        text: &'a str,
    },
    ListItem {
        kind: ListKind,
        /// Literal digits of an ordered item (`"3"` for `3. Ship`).
        label: Option<&'a str>,
        text: &'a str,
    },
    Rule,
    Spacer,
    Paragraph(&'a str),
}

/// Classify a single line.
///
/// Total over any input: a prefix with nothing after it yields a node of the
/// matched type with empty text.
///
/// # Examples
///
/// ```
/// use prd_renderer::{HeadingLevel, ListKind, Node, classify};
///
/// assert_eq!(classify("## Goals"), Node::Heading { level: HeadingLevel::H2, text: "Goals" });
/// assert_eq!(
///     classify("12. Launch"),
///     Node::ListItem { kind: ListKind::Ordered, label: Some("12"), text: "Launch" }
/// );
/// assert_eq!(classify("   "), Node::Spacer);
/// ```
pub fn classify(line: &str) -> Node<'_> {
    if let Some(text) = line.strip_prefix("# ") {
        return Node::Heading {
            level: HeadingLevel::H1,
            text,
        };
    }
    if let Some(text) = line.strip_prefix("## ") {
        return Node::Heading {
            level: HeadingLevel::H2,
            text,
        };
    }
    if let Some(text) = line.strip_prefix("### ") {
        return Node::Heading {
            level: HeadingLevel::H3,
            text,
        };
    }
    if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Node::ListItem {
            kind: ListKind::Unordered,
            label: None,
            text,
        };
    }
    if let Some(captures) = ORDERED_RE.captures(line)
        && let (Some(whole), Some(digits)) = (captures.get(0), captures.get(1))
    {
        return Node::ListItem {
            kind: ListKind::Ordered,
            label: Some(digits.as_str()),
            text: &line[whole.end()..],
        };
    }
    if line.starts_with("---") {
        return Node::Rule;
    }
    if line.trim().is_empty() {
        return Node::Spacer;
    }
    Node::Paragraph(line)
}

/// Split a document block into lines and classify each one.
///
/// Lines are separated by `\n`; a trailing `\r` is dropped.
pub fn parse(content: &str) -> impl Iterator<Item = Node<'_>> {
    content
        .split('\n')
        .map(|line| classify(line.strip_suffix('\r').unwrap_or(line)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn heading(level: HeadingLevel, text: &str) -> Node<'_> {
        Node::Heading { level, text }
    }

    #[test]
    fn test_heading_levels_by_exact_prefix() {
        assert_eq!(classify("# One"), heading(HeadingLevel::H1, "One"));
        assert_eq!(classify("## Two"), heading(HeadingLevel::H2, "Two"));
        assert_eq!(classify("### Three"), heading(HeadingLevel::H3, "Three"));
    }

    #[test]
    fn test_deep_heading_is_paragraph() {
        assert_eq!(classify("#### Four"), Node::Paragraph("#### Four"));
        assert_eq!(classify("#NoSpace"), Node::Paragraph("#NoSpace"));
    }

    #[test]
    fn test_empty_heading_text() {
        assert_eq!(classify("### "), heading(HeadingLevel::H3, ""));
        assert_eq!(classify("# "), heading(HeadingLevel::H1, ""));
    }

    #[test]
    fn test_unordered_markers() {
        let dash = classify("- item");
        let star = classify("* item");
        assert_eq!(dash, star);
        assert_eq!(
            dash,
            Node::ListItem {
                kind: ListKind::Unordered,
                label: None,
                text: "item"
            }
        );
    }

    #[test]
    fn test_bold_line_is_not_list_item() {
        assert_eq!(classify("**Owner:** PM"), Node::Paragraph("**Owner:** PM"));
    }

    #[test]
    fn test_ordered_item_keeps_literal_label() {
        assert_eq!(
            classify("07. Seventh"),
            Node::ListItem {
                kind: ListKind::Ordered,
                label: Some("07"),
                text: "Seventh"
            }
        );
    }

    #[test]
    fn test_ordered_item_accepts_tab_separator() {
        assert_eq!(
            classify("2.\tTabbed"),
            Node::ListItem {
                kind: ListKind::Ordered,
                label: Some("2"),
                text: "Tabbed"
            }
        );
    }

    #[test]
    fn test_ordered_requires_whitespace_after_dot() {
        assert_eq!(classify("3.14 is pi"), Node::Paragraph("3.14 is pi"));
        assert_eq!(classify("1."), Node::Paragraph("1."));
    }

    #[test]
    fn test_huge_ordinal_does_not_overflow() {
        let line = "123456789012345678901234567890. Big";
        assert_eq!(
            classify(line),
            Node::ListItem {
                kind: ListKind::Ordered,
                label: Some("123456789012345678901234567890"),
                text: "Big"
            }
        );
    }

    #[test]
    fn test_rule_and_spacer() {
        assert_eq!(classify("---"), Node::Rule);
        assert_eq!(classify("-----"), Node::Rule);
        assert_eq!(classify(""), Node::Spacer);
        assert_eq!(classify(" \t "), Node::Spacer);
    }

    #[test]
    fn test_list_prefix_wins_over_rule() {
        assert_eq!(
            classify("- --"),
            Node::ListItem {
                kind: ListKind::Unordered,
                label: None,
                text: "--"
            }
        );
    }

    #[test]
    fn test_parse_strips_carriage_returns() {
        let nodes: Vec<_> = parse("# T\r\nBody\r\n").collect();
        assert_eq!(
            nodes,
            vec![
                heading(HeadingLevel::H1, "T"),
                Node::Paragraph("Body"),
                Node::Spacer
            ]
        );
    }

    #[test]
    fn test_heading_level_numbers() {
        assert_eq!(HeadingLevel::H1.as_u8(), 1);
        assert_eq!(HeadingLevel::H3.as_u8(), 3);
    }
}
