//! Shared state for line-oriented rendering.
//!
//! Tracks which list grouping is open while lines are processed. Shared
//! between the HTML and PDF backends.

use crate::parser::ListKind;

/// Open-list tracking for the rendering state machine.
///
/// At most one list is open at a time; opening one kind implicitly requires
/// closing the other first, which [`ListState::open`] reports to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListState {
    open: Option<ListKind>,
}

impl ListState {
    /// Kind of the currently open list, if any.
    pub fn current(&self) -> Option<ListKind> {
        self.open
    }

    /// Check if a list of `kind` is open.
    pub fn is_open(&self, kind: ListKind) -> bool {
        self.open == Some(kind)
    }

    /// Open a list of `kind`.
    ///
    /// Returns the kind of a different list that had to be closed first,
    /// and whether a new grouping was started. Opening an already open
    /// list of the same kind is a no-op.
    pub fn open(&mut self, kind: ListKind) -> (Option<ListKind>, bool) {
        match self.open {
            Some(open) if open == kind => (None, false),
            previous => {
                self.open = Some(kind);
                (previous, true)
            }
        }
    }

    /// Close whatever list is open and return its kind.
    ///
    /// Closing when nothing is open returns `None` and changes nothing.
    pub fn close(&mut self) -> Option<ListKind> {
        self.open.take()
    }
}

/// Escape the characters that are significant in HTML and in inline tag markup.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initially_closed() {
        let state = ListState::default();
        assert_eq!(state.current(), None);
        assert!(!state.is_open(ListKind::Ordered));
        assert!(!state.is_open(ListKind::Unordered));
    }

    #[test]
    fn test_open_same_kind_is_noop() {
        let mut state = ListState::default();
        assert_eq!(state.open(ListKind::Unordered), (None, true));
        assert_eq!(state.open(ListKind::Unordered), (None, false));
        assert!(state.is_open(ListKind::Unordered));
    }

    #[test]
    fn test_switching_kind_closes_previous() {
        let mut state = ListState::default();
        state.open(ListKind::Ordered);
        assert_eq!(state.open(ListKind::Unordered), (Some(ListKind::Ordered), true));
        assert!(state.is_open(ListKind::Unordered));
        assert!(!state.is_open(ListKind::Ordered));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut state = ListState::default();
        state.open(ListKind::Ordered);
        assert_eq!(state.close(), Some(ListKind::Ordered));
        assert_eq!(state.close(), None);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Q&A</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Q&amp;A&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
