//! Paginated PDF rendering for PRD documents.
//!
//! Plugs a [`PdfBackend`] into the shared line-oriented renderer, lays the
//! resulting blocks out on A4 pages and serializes them with `pdf-writer`
//! using the standard Helvetica and Courier faces.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use prd_pdf::{DocumentMeta, render_pdf};
//!
//! let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//! let meta = DocumentMeta::new("Widget PRD", date);
//! let bytes = render_pdf("# Widget PRD\n## Goals\n- ship", &meta);
//! assert!(bytes.starts_with(b"%PDF-"));
//! ```

mod backend;
mod filename;
mod layout;
mod markup;
mod metrics;
mod theme;
mod writer;

pub use backend::{DEFAULT_ATTRIBUTION, DEFAULT_BYLINE, DEFAULT_LABEL, DocumentMeta, PdfBackend};
pub use filename::{export_stem, pdf_filename, sanitize_title};
pub use layout::{Block, DrawOp, Page, paginate};
pub use markup::{PDF_INLINE, Run, RunStyle, parse_runs};
pub use metrics::{Font, encode};
pub use theme::{Color, PageGeometry, ParagraphStyle};

use prd_renderer::DocumentRenderer;

/// Lay out a document block into pages without serializing.
pub fn layout_pages(content: &str, meta: &DocumentMeta) -> Vec<Page> {
    let blocks = DocumentRenderer::new(PdfBackend::new(meta)).render(content);
    paginate(&blocks, &PageGeometry::A4)
}

/// Render a document block to a complete A4 PDF file.
///
/// Rendering is total: any input yields a valid file of at least one page.
pub fn render_pdf(content: &str, meta: &DocumentMeta) -> Vec<u8> {
    let pages = layout_pages(content, meta);
    let bytes = writer::write_pdf(&pages, &PageGeometry::A4, meta);
    tracing::debug!(pages = pages.len(), bytes = bytes.len(), title = %meta.title, "Rendered PDF");
    bytes
}
