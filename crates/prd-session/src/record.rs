//! Document records created from generated messages.

use chrono::{DateTime, Local};
use prd_pdf::DocumentMeta;

/// Width of the short title shown in document listings.
pub const SHORT_TITLE_CHARS: usize = 26;

/// A generated document, recorded once per message that carries one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentRecord {
    pub title: String,
    /// Document block, trimmed, without markers.
    pub content: String,
    pub created_at: DateTime<Local>,
}

impl DocumentRecord {
    /// Record a document block, resolving its title on the creation date.
    pub fn new(content: impl Into<String>, created_at: DateTime<Local>) -> Self {
        let content = content.into();
        let title = prd_renderer::resolve_title_on(&content, created_at.date_naive());
        Self {
            title,
            content,
            created_at,
        }
    }

    /// Title cut to `max_chars` characters, with `…` when shortened.
    pub fn short_title(&self, max_chars: usize) -> String {
        if self.title.chars().count() <= max_chars {
            return self.title.clone();
        }
        let mut short: String = self.title.chars().take(max_chars).collect();
        short.push('…');
        short
    }

    /// Creation time for listings, e.g. `16 Oct, 09:30`.
    pub fn timestamp_label(&self) -> String {
        self.created_at.format("%d %b, %H:%M").to_string()
    }

    /// Viewer HTML for the document body.
    pub fn render_html(&self) -> String {
        prd_renderer::render_html(&self.content)
    }

    /// PDF metadata with default label, byline and attribution.
    pub fn document_meta(&self) -> DocumentMeta {
        DocumentMeta::new(self.title.clone(), self.created_at.date_naive())
    }

    /// PDF export with default metadata.
    pub fn render_pdf(&self) -> Vec<u8> {
        prd_pdf::render_pdf(&self.content, &self.document_meta())
    }

    /// Download filename for the PDF export.
    pub fn pdf_filename(&self) -> String {
        prd_pdf::pdf_filename(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 10, 16, hour, minute, 0)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn test_title_from_heading() {
        let record = DocumentRecord::new("# Smart Search: v2!!\n## Goals", at(9, 30));
        assert_eq!(record.title, "Smart Search: v2!!");
        assert_eq!(record.pdf_filename(), "PRD_Smart_Search_v2.pdf");
    }

    #[test]
    fn test_title_fallback_uses_creation_date() {
        let record = DocumentRecord::new("## Goals\n- ship", at(9, 30));
        assert_eq!(record.title, "PRD – 16 Oct 2026");
    }

    #[test]
    fn test_short_title() {
        let record = DocumentRecord::new("# Unified Notification Preferences Center", at(9, 30));
        assert_eq!(record.short_title(SHORT_TITLE_CHARS), "Unified Notification Prefe…");
        let short = DocumentRecord::new("# Short", at(9, 30));
        assert_eq!(short.short_title(SHORT_TITLE_CHARS), "Short");
    }

    #[test]
    fn test_short_title_counts_characters() {
        let record = DocumentRecord::new("# Überblick Ärger", at(9, 30));
        assert_eq!(record.short_title(4), "Über…");
    }

    #[test]
    fn test_timestamp_label() {
        assert_eq!(DocumentRecord::new("x", at(9, 5)).timestamp_label(), "16 Oct, 09:05");
    }

    #[test]
    fn test_renders_both_targets() {
        let record = DocumentRecord::new("# Widget PRD\n- a", at(9, 30));
        assert_eq!(record.render_html(), "<h1>Widget PRD</h1>\n<ul>\n<li>a</li>\n</ul>");
        assert!(record.render_pdf().starts_with(b"%PDF-"));
        assert_eq!(record.document_meta().title, "Widget PRD");
    }
}
