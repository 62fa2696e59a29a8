//! Inline emphasis formatting.
//!
//! Three markers are recognised: `**bold**`, `*italic*` and `` `code` ``.
//! Each is a non-greedy substitution applied over the whole line, in that
//! order. Spans that overlap (for example a code span containing asterisks)
//! have no defined result.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").unwrap());

/// Open/close tag table for one output target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InlineSyntax {
    /// Tags wrapped around `**bold**` spans.
    pub bold: (&'static str, &'static str),
    /// Tags wrapped around `*italic*` spans.
    pub italic: (&'static str, &'static str),
    /// Tags wrapped around `` `code` `` spans.
    pub code: (&'static str, &'static str),
}

impl InlineSyntax {
    /// HTML tags used by the document viewer.
    pub const HTML: Self = Self {
        bold: ("<strong>", "</strong>"),
        italic: ("<em>", "</em>"),
        code: ("<code>", "</code>"),
    };
}

/// Replace inline emphasis markers with the tags of `syntax`.
///
/// The input is not escaped here; backends escape source text first so the
/// emitted tags are the only markup in the result.
///
/// # Examples
///
/// ```
/// use prd_renderer::{InlineSyntax, format_inline};
///
/// assert_eq!(
///     format_inline("**Goal:** cut *churn* via `retry`", &InlineSyntax::HTML),
///     "<strong>Goal:</strong> cut <em>churn</em> via <code>retry</code>"
/// );
/// ```
pub fn format_inline(line: &str, syntax: &InlineSyntax) -> String {
    let text = substitute(&BOLD_RE, line, syntax.bold);
    let text = substitute(&ITALIC_RE, &text, syntax.italic);
    substitute(&CODE_RE, &text, syntax.code)
}

fn substitute(re: &Regex, text: &str, (open, close): (&str, &str)) -> String {
    let replacement = format!("{open}${{1}}{close}");
    re.replace_all(text, replacement.as_str()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BRACKETS: InlineSyntax = InlineSyntax {
        bold: ("[b]", "[/b]"),
        italic: ("[i]", "[/i]"),
        code: ("[c]", "[/c]"),
    };

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(format_inline("No markers here.", &InlineSyntax::HTML), "No markers here.");
    }

    #[test]
    fn test_multiple_bold_spans() {
        assert_eq!(
            format_inline("**A** and **B**", &InlineSyntax::HTML),
            "<strong>A</strong> and <strong>B</strong>"
        );
    }

    #[test]
    fn test_bold_before_italic() {
        assert_eq!(
            format_inline("**bold** then *soft*", &BRACKETS),
            "[b]bold[/b] then [i]soft[/i]"
        );
    }

    #[test]
    fn test_unpaired_marker_left_alone() {
        assert_eq!(format_inline("5 * 3 = 15", &InlineSyntax::HTML), "5 * 3 = 15");
        assert_eq!(format_inline("a ` tick", &InlineSyntax::HTML), "a ` tick");
    }

    #[test]
    fn test_empty_span_not_matched() {
        assert_eq!(format_inline("**", &InlineSyntax::HTML), "**");
        assert_eq!(format_inline("``", &InlineSyntax::HTML), "``");
    }

    #[test]
    fn test_dollar_in_text_is_literal() {
        assert_eq!(
            format_inline("**$1M ARR** by `$q4`", &BRACKETS),
            "[b]$1M ARR[/b] by [c]$q4[/c]"
        );
    }

    #[test]
    fn test_target_tags_differ_only_by_table() {
        let line = "Ship *v2* with `flag`";
        assert_eq!(
            format_inline(line, &InlineSyntax::HTML),
            "Ship <em>v2</em> with <code>flag</code>"
        );
        assert_eq!(format_inline(line, &BRACKETS), "Ship [i]v2[/i] with [c]flag[/c]");
    }
}
