//! Flow layout: line wrapping and pagination.
//!
//! Blocks produced by the PDF backend are poured top to bottom into the
//! content area of fixed-size pages. Paragraphs wrap at word boundaries,
//! breaking words only when a single word is wider than the line. A page
//! break is taken whenever the next line or rule would cross the bottom
//! margin; vertical space before a block is dropped at the top of a page.

use crate::markup::{RunStyle, parse_runs};
use crate::metrics::{Font, encode};
use crate::theme::{Color, PageGeometry, ParagraphStyle};

/// Unit of vertical flow produced by the PDF backend.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Wrapped text in a paragraph style; `markup` uses the PDF inline tags.
    Paragraph {
        style: ParagraphStyle,
        markup: String,
    },
    /// Fixed vertical space.
    Spacer(f32),
    /// Horizontal line across the content width.
    Rule {
        thickness: f32,
        color: Color,
        space_before: f32,
        space_after: f32,
    },
}

/// Drawing operation on a page, in PDF user space (origin bottom-left).
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
        bytes: Vec<u8>,
    },
    Line {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
        color: Color,
    },
}

/// One laid-out page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// Contiguous text in one face.
#[derive(Clone, Debug, PartialEq)]
struct Piece {
    font: Font,
    bytes: Vec<u8>,
    width: f32,
}

/// Unbreakable sequence of pieces between spaces.
#[derive(Clone, Debug, Default, PartialEq)]
struct Word {
    pieces: Vec<Piece>,
    width: f32,
}

impl Word {
    fn push(&mut self, font: Font, byte: u8, size: f32) {
        let advance = font.text_width(&[byte], size);
        self.width += advance;
        match self.pieces.last_mut() {
            Some(piece) if piece.font == font => {
                piece.bytes.push(byte);
                piece.width += advance;
            }
            _ => self.pieces.push(Piece {
                font,
                bytes: vec![byte],
                width: advance,
            }),
        }
    }

    fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    fn last_font(&self) -> Option<Font> {
        self.pieces.last().map(|piece| piece.font)
    }

    /// Split into chunks no wider than `max_width`, each holding at least one byte.
    fn split(self, max_width: f32, size: f32) -> Vec<Self> {
        let mut chunks = Vec::new();
        let mut current = Self::default();
        for piece in self.pieces {
            for byte in piece.bytes {
                let advance = piece.font.text_width(&[byte], size);
                if !current.is_empty() && current.width + advance > max_width {
                    chunks.push(std::mem::take(&mut current));
                }
                current.push(piece.font, byte, size);
            }
        }
        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }
}

/// Break paragraph markup into words measured in their faces.
fn words(markup: &str, style: &ParagraphStyle) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current = Word::default();
    for run in parse_runs(markup) {
        let font = Font::select(RunStyle {
            bold: run.style.bold || style.bold,
            ..run.style
        });
        for byte in encode(&run.text) {
            if byte == b' ' {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            } else {
                current.push(font, byte, style.font_size);
            }
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Greedy line filling. Returns at least one (possibly empty) line.
fn wrap(words: Vec<Word>, max_width: f32, size: f32) -> Vec<Vec<Word>> {
    let mut lines: Vec<Vec<Word>> = Vec::new();
    let mut line: Vec<Word> = Vec::new();
    let mut line_width = 0.0;

    for word in words {
        let pieces = if word.width > max_width {
            word.split(max_width, size)
        } else {
            vec![word]
        };
        for word in pieces {
            let space = line
                .last()
                .and_then(Word::last_font)
                .map_or(0.0, |font| font.text_width(b" ", size));
            if !line.is_empty() && line_width + space + word.width > max_width {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            } else {
                line_width += space;
            }
            line_width += word.width;
            line.push(word);
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Pagination cursor.
struct Flow<'g> {
    geometry: &'g PageGeometry,
    pages: Vec<Page>,
    current: Page,
    y: f32,
    at_top: bool,
}

impl<'g> Flow<'g> {
    fn new(geometry: &'g PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Page::default(),
            y: geometry.content_top(),
            at_top: true,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = self.geometry.content_top();
        self.at_top = true;
    }

    /// Start a new page unless `height` fits above the bottom margin.
    fn reserve(&mut self, height: f32) {
        if !self.at_top && self.y - height < self.geometry.margin_bottom {
            self.new_page();
        }
    }

    fn space(&mut self, height: f32) {
        if !self.at_top {
            self.y -= height;
        }
    }

    fn paragraph(&mut self, style: &ParagraphStyle, markup: &str) {
        let left = self.geometry.margin_left + style.left_indent;
        let max_width = self.geometry.content_width() - style.left_indent;
        let size = style.font_size;

        self.space(style.space_before);
        for line in wrap(words(markup, style), max_width, size) {
            self.reserve(style.leading);
            let baseline = self.y - (style.leading - size) / 2.0 - 0.8 * size;
            self.emit_line(line, left, baseline, style);
            self.y -= style.leading;
            self.at_top = false;
        }
        self.y -= style.space_after;
    }

    /// Merge a line's words into per-face text operations.
    fn emit_line(&mut self, line: Vec<Word>, left: f32, baseline: f32, style: &ParagraphStyle) {
        let size = style.font_size;
        let mut segments: Vec<(f32, Piece)> = Vec::new();
        let mut x = left;
        for (index, word) in line.into_iter().enumerate() {
            if index > 0
                && let Some((_, last)) = segments.last_mut()
            {
                let advance = last.font.text_width(b" ", size);
                last.bytes.push(b' ');
                last.width += advance;
                x += advance;
            }
            for piece in word.pieces {
                let width = piece.width;
                match segments.last_mut() {
                    Some((_, last)) if last.font == piece.font => {
                        last.bytes.extend_from_slice(&piece.bytes);
                        last.width += width;
                    }
                    _ => segments.push((x, piece)),
                }
                x += width;
            }
        }
        for (x, piece) in segments {
            self.current.ops.push(DrawOp::Text {
                x,
                y: baseline,
                font: piece.font,
                size,
                color: style.color,
                bytes: piece.bytes,
            });
        }
    }

    fn spacer(&mut self, height: f32) {
        if self.at_top {
            return;
        }
        if self.y - height < self.geometry.margin_bottom {
            self.new_page();
        } else {
            self.y -= height;
        }
    }

    fn rule(&mut self, thickness: f32, color: Color, space_before: f32, space_after: f32) {
        self.space(space_before);
        self.reserve(thickness);
        let y = self.y - thickness / 2.0;
        self.current.ops.push(DrawOp::Line {
            x1: self.geometry.margin_left,
            x2: self.geometry.width - self.geometry.margin_right,
            y,
            thickness,
            color,
        });
        self.y -= thickness + space_after;
        self.at_top = false;
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.ops.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Lay out blocks onto pages. Always returns at least one page.
pub fn paginate(blocks: &[Block], geometry: &PageGeometry) -> Vec<Page> {
    let mut flow = Flow::new(geometry);
    for block in blocks {
        match block {
            Block::Paragraph { style, markup } => flow.paragraph(style, markup),
            Block::Spacer(height) => flow.spacer(*height),
            Block::Rule {
                thickness,
                color,
                space_before,
                space_after,
            } => flow.rule(*thickness, *color, *space_before, *space_after),
        }
    }
    flow.finish()
}
