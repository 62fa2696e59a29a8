//! Serialization of laid-out pages with `pdf-writer`.

use chrono::Datelike;
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::backend::DocumentMeta;
use crate::layout::{DrawOp, Page};
use crate::metrics::Font;
use crate::theme::PageGeometry;

/// Producer recorded in the document information dictionary.
const CREATOR: &str = concat!("prd-pdf ", env!("CARGO_PKG_VERSION"));

/// Write pages to a complete PDF file.
///
/// All eight faces are registered on every page, so any page may use any
/// style. The title and date from `meta` go into the document information
/// dictionary.
pub fn write_pdf(pages: &[Page], geometry: &PageGeometry, meta: &DocumentMeta) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let tree_id = alloc.bump();
    let info_id = alloc.bump();
    let font_ids: Vec<(Font, Ref)> = Font::ALL.iter().map(|&font| (font, alloc.bump())).collect();
    let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc.bump(), alloc.bump())).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|&(page_id, _)| page_id))
        .count(i32::try_from(page_ids.len()).unwrap_or(i32::MAX));

    for (page, &(page_id, content_id)) in pages.iter().zip(&page_ids) {
        let mut writer = pdf.page(page_id);
        writer.media_box(Rect::new(0.0, 0.0, geometry.width, geometry.height));
        writer.parent(tree_id);
        writer.contents(content_id);
        let mut resources = writer.resources();
        let mut fonts = resources.fonts();
        for &(font, font_id) in &font_ids {
            fonts.pair(Name(font.resource_name()), font_id);
        }
        fonts.finish();
        resources.finish();
        writer.finish();

        let data = page_content(page).finish();
        pdf.stream(content_id, &data);
    }

    for &(font, font_id) in &font_ids {
        pdf.type1_font(font_id)
            .base_font(Name(font.base_name().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let mut info = pdf.document_info(info_id);
    info.title(TextStr(&meta.title));
    info.creator(TextStr(CREATOR));
    info.creation_date(creation_date(meta));
    info.finish();

    pdf.finish()
}

fn creation_date(meta: &DocumentMeta) -> Date {
    let year = u16::try_from(meta.date.year()).unwrap_or(1970);
    let month = u8::try_from(meta.date.month()).unwrap_or(1);
    let day = u8::try_from(meta.date.day()).unwrap_or(1);
    Date::new(year).month(month).day(day)
}

fn page_content(page: &Page) -> Content {
    let mut content = Content::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                color,
                bytes,
            } => {
                let (r, g, b) = color.unit_rgb();
                content.set_fill_rgb(r, g, b);
                content.begin_text();
                content.set_font(Name(font.resource_name()), *size);
                content.set_text_matrix([1.0, 0.0, 0.0, 1.0, *x, *y]);
                content.show(Str(bytes.as_slice()));
                content.end_text();
            }
            DrawOp::Line {
                x1,
                x2,
                y,
                thickness,
                color,
            } => {
                let (r, g, b) = color.unit_rgb();
                content.set_stroke_rgb(r, g, b);
                content.set_line_width(*thickness);
                content.move_to(*x1, *y);
                content.line_to(*x2, *y);
                content.stroke();
            }
        }
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{DARK, RULE};
    use chrono::NaiveDate;

    fn meta() -> DocumentMeta {
        DocumentMeta::new(
            "Widget PRD",
            NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date"),
        )
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    fn sample_page() -> Page {
        Page {
            ops: vec![
                DrawOp::Text {
                    x: 62.0,
                    y: 700.0,
                    font: Font::HelveticaBold,
                    size: 22.0,
                    color: DARK,
                    bytes: b"Widget PRD".to_vec(),
                },
                DrawOp::Line {
                    x1: 62.0,
                    x2: 533.0,
                    y: 690.0,
                    thickness: 0.5,
                    color: RULE,
                },
            ],
        }
    }

    #[test]
    fn test_file_framing() {
        let bytes = write_pdf(&[sample_page()], &PageGeometry::A4, &meta());
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"%%EOF"));
    }

    #[test]
    fn test_fonts_and_encoding_declared() {
        let bytes = write_pdf(&[sample_page()], &PageGeometry::A4, &meta());
        assert!(contains(&bytes, b"/Helvetica-Bold"));
        assert!(contains(&bytes, b"/Courier-BoldOblique"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
    }

    #[test]
    fn test_page_count_recorded() {
        let pages = vec![sample_page(), sample_page(), Page::default()];
        let bytes = write_pdf(&pages, &PageGeometry::A4, &meta());
        assert!(contains(&bytes, b"/Count 3"));
    }

    #[test]
    fn test_document_info() {
        let bytes = write_pdf(&[sample_page()], &PageGeometry::A4, &meta());
        assert!(contains(&bytes, b"(Widget PRD)"));
        assert!(contains(&bytes, b"D:20261016"));
    }
}
