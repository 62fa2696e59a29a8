//! Generic document renderer with pluggable backend.

use crate::backend::RenderBackend;
use crate::parser::{ListKind, Node, parse};
use crate::state::ListState;

/// Line-oriented document renderer with pluggable backend.
///
/// Drives the list-grouping state machine over the classified lines of a
/// document block and delegates the output for each node to a
/// [`RenderBackend`]. Both output targets share this dispatch, so they agree
/// on heading levels and list groupings by construction.
///
/// # Example
///
/// ```
/// use prd_renderer::{DocumentRenderer, HtmlBackend};
///
/// let html = DocumentRenderer::new(HtmlBackend::new()).render("- a\n- b");
/// assert_eq!(html, "<ul>\n<li>a</li>\n<li>b</li>\n</ul>");
/// ```
pub struct DocumentRenderer<B: RenderBackend> {
    backend: B,
    lists: ListState,
}

impl<B: RenderBackend> DocumentRenderer<B> {
    /// Create a renderer around a backend.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            lists: ListState::default(),
        }
    }

    /// Render a document block and return the backend output.
    ///
    /// Any list still open at the end of the input is closed before the
    /// backend is finished.
    pub fn render(mut self, content: &str) -> B::Output {
        for node in parse(content) {
            self.process_node(node);
        }
        self.close_list();
        self.backend.finish()
    }

    fn process_node(&mut self, node: Node<'_>) {
        match node {
            Node::Heading { level, text } => {
                self.close_list();
                self.backend.heading(level, text);
            }
            Node::ListItem { kind, label, text } => {
                self.open_list(kind);
                self.backend.list_item(kind, label, text);
            }
            Node::Rule => {
                self.close_list();
                self.backend.rule();
            }
            Node::Spacer => {
                self.close_list();
                self.backend.spacer();
            }
            Node::Paragraph(text) => {
                self.close_list();
                self.backend.paragraph(text);
            }
        }
    }

    fn open_list(&mut self, kind: ListKind) {
        let (closed, started) = self.lists.open(kind);
        if let Some(previous) = closed {
            self.backend.list_end(previous);
        }
        if started {
            self.backend.list_start(kind);
        }
    }

    fn close_list(&mut self) {
        if let Some(kind) = self.lists.close() {
            self.backend.list_end(kind);
        }
    }
}
