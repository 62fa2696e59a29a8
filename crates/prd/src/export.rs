//! Writing document records to disk as PDF and standalone HTML.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use prd_config::DocumentConfig;
use prd_pdf::{DocumentMeta, export_stem};
use prd_renderer::{escape_html, wrap_viewer};
use prd_session::DocumentRecord;
use tracing::info;

use crate::error::CliError;

/// Export formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Pdf,
    Html,
    Both,
}

impl Format {
    fn pdf(self) -> bool {
        matches!(self, Self::Pdf | Self::Both)
    }

    fn html(self) -> bool {
        matches!(self, Self::Html | Self::Both)
    }
}

/// Viewer stylesheet, using the same palette as the PDF theme.
const VIEWER_CSS: &str = "body { margin: 0; background: #f8fafc; font-family: Helvetica, Arial, sans-serif; }
.prd-viewer { max-width: 760px; margin: 40px auto; padding: 48px 56px; background: #fff; color: #374151; font-size: 15px; line-height: 1.6; }
.prd-viewer h1 { color: #0f172a; font-size: 28px; margin: 0 0 8px; }
.prd-viewer h2 { color: #1e40af; font-size: 13px; letter-spacing: 0.08em; text-transform: uppercase; border-top: 1px solid #e2e8f0; padding-top: 12px; margin: 28px 0 8px; }
.prd-viewer h3 { color: #0f172a; font-size: 15px; margin: 18px 0 4px; }
.prd-viewer ul, .prd-viewer ol { padding-left: 22px; margin: 4px 0; }
.prd-viewer hr { border: none; border-top: 1px solid #e2e8f0; margin: 12px 0; }
.prd-viewer code { font-family: Courier, monospace; background: #f1f5f9; padding: 1px 4px; }
.prd-viewer .spacer { height: 8px; }
.prd-viewer footer { color: #94a3b8; font-size: 12px; margin-top: 32px; }
";

/// PDF metadata for a record, with label and attribution from configuration.
pub(crate) fn document_meta(record: &DocumentRecord, document: &DocumentConfig) -> DocumentMeta {
    record
        .document_meta()
        .with_label(document.label.clone())
        .with_byline(document.byline.clone())
        .with_attribution(document.attribution.clone())
}

/// Render a complete standalone HTML page for a record.
pub(crate) fn render_page(record: &DocumentRecord, document: &DocumentConfig) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(&record.title));
    html.push_str("<style>\n");
    html.push_str(VIEWER_CSS);
    html.push_str("</style>\n</head>\n<body>\n");

    let mut body = record.render_html();
    let _ = write!(
        body,
        "\n<footer>{} | {}</footer>",
        escape_html(&document.attribution),
        record.created_at.format("%d %B %Y")
    );
    html.push_str(&wrap_viewer(&body));

    html.push_str("\n</body>\n</html>\n");
    html
}

/// Write the requested formats for a record into `dir`.
///
/// Files are named `PRD_<title>.pdf` and `PRD_<title>.html`. Existing files
/// are overwritten.
pub(crate) fn write_exports(
    record: &DocumentRecord,
    document: &DocumentConfig,
    dir: &Path,
    format: Format,
) -> Result<Vec<PathBuf>, CliError> {
    std::fs::create_dir_all(dir)?;
    let stem = export_stem(&record.title);
    let mut written = Vec::new();

    if format.pdf() {
        let path = dir.join(format!("{stem}.pdf"));
        let bytes = prd_pdf::render_pdf(&record.content, &document_meta(record, document));
        std::fs::write(&path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "Wrote PDF");
        written.push(path);
    }

    if format.html() {
        let path = dir.join(format!("{stem}.html"));
        std::fs::write(&path, render_page(record, document))?;
        info!(path = %path.display(), "Wrote HTML");
        written.push(path);
    }

    Ok(written)
}
