//! PDF backend for document rendering.

use chrono::NaiveDate;
use prd_renderer::{HeadingLevel, ListKind, RenderBackend, escape_html, format_inline};

use crate::layout::Block;
use crate::markup::PDF_INLINE;
use crate::theme::{Color, NAVY, ParagraphStyle, RULE};

/// Default small-caps label above the title.
pub const DEFAULT_LABEL: &str = "PRODUCT REQUIREMENTS DOCUMENT";

/// Default byline printed under the title.
pub const DEFAULT_BYLINE: &str = "PRD Generator · AI Co-Pilot";

/// Default attribution line in the footer.
pub const DEFAULT_ATTRIBUTION: &str = "PRD Generator · AI Product Co-Pilot";

/// Front matter and footer text for a rendered document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentMeta {
    pub title: String,
    pub date: NaiveDate,
    pub label: String,
    pub byline: String,
    pub attribution: String,
}

impl DocumentMeta {
    /// Metadata with the default label, byline and attribution.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            date,
            label: DEFAULT_LABEL.to_owned(),
            byline: DEFAULT_BYLINE.to_owned(),
            attribution: DEFAULT_ATTRIBUTION.to_owned(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_byline(mut self, byline: impl Into<String>) -> Self {
        self.byline = byline.into();
        self
    }

    #[must_use]
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }

    /// Byline followed by the long-form date, e.g. `… | 16 October 2026`.
    #[must_use]
    pub fn dated_byline(&self) -> String {
        format!(
            "{} \u{a0}|\u{a0} {}",
            self.byline,
            self.date.format("%d %B %Y")
        )
    }
}

/// PDF render backend.
///
/// Produces a flow of [`Block`]s framed by fixed front matter (label, title,
/// dated byline, heavy rule) and a footer (light rule, attribution).
/// Level-1 headings are omitted since the title is already in the front
/// matter; level-2 headings become upper-case section labels under a
/// light rule.
pub struct PdfBackend<'a> {
    meta: &'a DocumentMeta,
    blocks: Vec<Block>,
}

impl<'a> PdfBackend<'a> {
    /// Create a backend with the front matter already in place.
    pub fn new(meta: &'a DocumentMeta) -> Self {
        let mut backend = Self {
            meta,
            blocks: Vec::new(),
        };
        backend.text(ParagraphStyle::META, escape_html(&meta.label));
        backend.blocks.push(Block::Spacer(3.0));
        backend.text(ParagraphStyle::H1, escape_html(&meta.title));
        backend.blocks.push(Block::Spacer(2.0));
        backend.text(ParagraphStyle::META, escape_html(&meta.dated_byline()));
        backend.line(2.0, NAVY, 0.0, 14.0);
        backend
    }

    fn text(&mut self, style: ParagraphStyle, markup: String) {
        self.blocks.push(Block::Paragraph { style, markup });
    }

    fn line(&mut self, thickness: f32, color: Color, space_before: f32, space_after: f32) {
        self.blocks.push(Block::Rule {
            thickness,
            color,
            space_before,
            space_after,
        });
    }

    fn inline(text: &str) -> String {
        format_inline(&escape_html(text), &PDF_INLINE)
    }
}

impl RenderBackend for PdfBackend<'_> {
    type Output = Vec<Block>;

    fn heading(&mut self, level: HeadingLevel, text: &str) {
        match level {
            HeadingLevel::H1 => {}
            HeadingLevel::H2 => {
                self.line(0.5, RULE, 6.0, 3.0);
                self.text(ParagraphStyle::H2, escape_html(&text.to_uppercase()));
            }
            HeadingLevel::H3 => self.text(ParagraphStyle::H3, Self::inline(text)),
        }
    }

    fn list_item(&mut self, _kind: ListKind, label: Option<&str>, text: &str) {
        let text = Self::inline(text);
        let markup = match label {
            Some(label) => format!("<b>{label}.</b> \u{a0}{text}"),
            None => format!("• \u{a0}{text}"),
        };
        self.text(ParagraphStyle::BULLET, markup);
    }

    fn rule(&mut self) {
        self.line(0.5, RULE, 2.0, 2.0);
    }

    fn spacer(&mut self) {
        self.blocks.push(Block::Spacer(4.0));
    }

    fn paragraph(&mut self, text: &str) {
        self.text(ParagraphStyle::BODY, Self::inline(text));
    }

    fn finish(mut self) -> Self::Output {
        self.blocks.push(Block::Spacer(14.0));
        self.line(0.5, RULE, 0.0, 0.0);
        self.blocks.push(Block::Spacer(3.0));
        let attribution = escape_html(&self.meta.attribution);
        self.text(ParagraphStyle::META, attribution);
        self.blocks
    }
}
