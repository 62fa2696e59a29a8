//! Render backend trait for format-specific output.
//!
//! This trait abstracts the differences between the HTML viewer and the
//! paginated PDF document, allowing the line-oriented renderer to be generic
//! over the output format.

use crate::parser::{HeadingLevel, ListKind};

/// Backend trait for format-specific rendering operations.
///
/// [`DocumentRenderer`](crate::DocumentRenderer) owns line classification and
/// list grouping; a backend only decides what each node looks like. Text
/// arguments are raw source text: escaping and inline formatting are the
/// backend's job, since both depend on the target syntax.
pub trait RenderBackend {
    /// Final product of a render (markup string, flow blocks, ...).
    type Output;

    /// Render a heading.
    ///
    /// Open lists are already closed when this is called.
    fn heading(&mut self, level: HeadingLevel, text: &str);

    /// Start a list grouping.
    ///
    /// Default does nothing, for targets without list containers.
    fn list_start(&mut self, _kind: ListKind) {}

    /// End a list grouping.
    ///
    /// Called exactly once per [`list_start`](Self::list_start).
    fn list_end(&mut self, _kind: ListKind) {}

    /// Render a list item inside the currently open grouping.
    ///
    /// # Arguments
    ///
    /// * `kind` - Kind of the enclosing list
    /// * `label` - Literal ordinal digits for ordered items
    /// * `text` - Item text after the marker
    fn list_item(&mut self, kind: ListKind, label: Option<&str>, text: &str);

    /// Render a horizontal rule.
    fn rule(&mut self);

    /// Render vertical space for a blank line.
    fn spacer(&mut self);

    /// Render a paragraph.
    fn paragraph(&mut self, text: &str);

    /// Consume the backend and return its output.
    fn finish(self) -> Self::Output;
}
