//! HTML backend for document rendering.
//!
//! Produces markup for the in-app document viewer, one element per line.

use crate::backend::RenderBackend;
use crate::inline::{InlineSyntax, format_inline};
use crate::parser::{HeadingLevel, ListKind};
use crate::renderer::DocumentRenderer;
use crate::state::escape_html;

/// Class of the container element the viewer stylesheet targets.
pub const VIEWER_CLASS: &str = "prd-viewer";

/// HTML render backend.
///
/// Produces:
/// - `<h1>`-`<h3>` for headings (text escaped, no inline formatting)
/// - `<ul>`/`<ol>` groupings, ordered items carrying their literal number
///   as `value`
/// - `<hr>` for rules and an empty `spacer` div for blank lines
/// - `<p>` for everything else
#[derive(Debug, Default)]
pub struct HtmlBackend {
    parts: Vec<String>,
}

impl HtmlBackend {
    /// Create an empty HTML backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn inline(text: &str) -> String {
        format_inline(&escape_html(text), &InlineSyntax::HTML)
    }
}

impl RenderBackend for HtmlBackend {
    type Output = String;

    fn heading(&mut self, level: HeadingLevel, text: &str) {
        let level = level.as_u8();
        self.parts
            .push(format!("<h{level}>{}</h{level}>", escape_html(text)));
    }

    fn list_start(&mut self, kind: ListKind) {
        self.parts.push(
            match kind {
                ListKind::Unordered => "<ul>",
                ListKind::Ordered => "<ol>",
            }
            .to_owned(),
        );
    }

    fn list_end(&mut self, kind: ListKind) {
        self.parts.push(
            match kind {
                ListKind::Unordered => "</ul>",
                ListKind::Ordered => "</ol>",
            }
            .to_owned(),
        );
    }

    fn list_item(&mut self, _kind: ListKind, label: Option<&str>, text: &str) {
        let text = Self::inline(text);
        match label {
            Some(label) => self.parts.push(format!(r#"<li value="{label}">{text}</li>"#)),
            None => self.parts.push(format!("<li>{text}</li>")),
        }
    }

    fn rule(&mut self) {
        self.parts.push("<hr>".to_owned());
    }

    fn spacer(&mut self) {
        self.parts.push(r#"<div class="spacer"></div>"#.to_owned());
    }

    fn paragraph(&mut self, text: &str) {
        self.parts.push(format!("<p>{}</p>", Self::inline(text)));
    }

    fn finish(self) -> Self::Output {
        self.parts.join("\n")
    }
}

/// Render a document block to viewer HTML.
pub fn render_html(content: &str) -> String {
    DocumentRenderer::new(HtmlBackend::new()).render(content)
}

/// Wrap rendered HTML in the viewer container.
pub fn wrap_viewer(html: &str) -> String {
    format!("<div class=\"{VIEWER_CLASS}\">\n{html}\n</div>")
}
