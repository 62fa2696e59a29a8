//! Standard font faces, WinAnsi encoding and advance widths.
//!
//! The document uses only the base-14 Helvetica and Courier families, which
//! every PDF reader provides, so no font program is embedded. Text is
//! encoded as `WinAnsiEncoding` bytes; characters outside that code page are
//! replaced with `?`.

use crate::markup::RunStyle;

/// Byte substituted for characters outside the code page.
const FALLBACK_BYTE: u8 = b'?';

/// Helvetica advance widths for bytes 32..=126, in 1/1000 em.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Helvetica-Bold advance widths for bytes 32..=126, in 1/1000 em.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

/// One of the eight base-14 faces used by the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl Font {
    /// Every face, in resource order.
    pub const ALL: [Self; 8] = [
        Self::Helvetica,
        Self::HelveticaBold,
        Self::HelveticaOblique,
        Self::HelveticaBoldOblique,
        Self::Courier,
        Self::CourierBold,
        Self::CourierOblique,
        Self::CourierBoldOblique,
    ];

    /// Pick the face for a run style.
    #[must_use]
    pub fn select(style: RunStyle) -> Self {
        match (style.mono, style.bold, style.italic) {
            (false, false, false) => Self::Helvetica,
            (false, true, false) => Self::HelveticaBold,
            (false, false, true) => Self::HelveticaOblique,
            (false, true, true) => Self::HelveticaBoldOblique,
            (true, false, false) => Self::Courier,
            (true, true, false) => Self::CourierBold,
            (true, false, true) => Self::CourierOblique,
            (true, true, true) => Self::CourierBoldOblique,
        }
    }

    /// PostScript name of the standard font.
    #[must_use]
    pub fn base_name(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
            Self::CourierOblique => "Courier-Oblique",
            Self::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Name under which the face is registered in page resources.
    #[must_use]
    pub fn resource_name(self) -> &'static [u8] {
        match self {
            Self::Helvetica => b"F1",
            Self::HelveticaBold => b"F2",
            Self::HelveticaOblique => b"F3",
            Self::HelveticaBoldOblique => b"F4",
            Self::Courier => b"F5",
            Self::CourierBold => b"F6",
            Self::CourierOblique => b"F7",
            Self::CourierBoldOblique => b"F8",
        }
    }

    fn is_bold(self) -> bool {
        matches!(
            self,
            Self::HelveticaBold
                | Self::HelveticaBoldOblique
                | Self::CourierBold
                | Self::CourierBoldOblique
        )
    }

    fn is_mono(self) -> bool {
        matches!(
            self,
            Self::Courier | Self::CourierBold | Self::CourierOblique | Self::CourierBoldOblique
        )
    }

    /// Advance width of an encoded byte, in 1/1000 em.
    ///
    /// Oblique faces share the metrics of their upright counterparts.
    #[must_use]
    pub fn glyph_width(self, byte: u8) -> u16 {
        if self.is_mono() {
            return 600;
        }
        let bold = self.is_bold();
        if (32..=126).contains(&byte) {
            let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
            return table[usize::from(byte - 32)];
        }
        match (byte, bold) {
            (0x85 | 0x97 | 0x99, _) => 1000,
            (0x91 | 0x92 | 0xA0 | 0xB7, _) => 278,
            (0x93 | 0x94, false) => 333,
            (0x93 | 0x94, true) => 500,
            (0x95, _) => 350,
            (0x80 | 0x96, _) => 556,
            (0xA9 | 0xAE, _) => 737,
            (0xB0, _) => 400,
            (0xD7, _) => 584,
            // Accented capitals; approximate.
            (0xC0..=0xDE, false) => 667,
            (0xC0..=0xDE, true) => 722,
            (_, false) => 556,
            (_, true) => 611,
        }
    }

    /// Width of encoded text at `size` points.
    #[must_use]
    pub fn text_width(self, encoded: &[u8], size: f32) -> f32 {
        let units: u32 = encoded
            .iter()
            .map(|&byte| u32::from(self.glyph_width(byte)))
            .sum();
        units as f32 * size / 1000.0
    }
}

/// Map a character to its `WinAnsiEncoding` byte.
///
/// Tabs become spaces; anything unrepresentable becomes `?`.
#[must_use]
pub fn encode_char(c: char) -> u8 {
    match c {
        '\t' => b' ',
        ' '..='~' | '\u{a0}'..='\u{ff}' => u8::try_from(u32::from(c)).unwrap_or(FALLBACK_BYTE),
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        _ => FALLBACK_BYTE,
    }
}

/// Encode a string as `WinAnsiEncoding` bytes.
#[must_use]
pub fn encode(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}
