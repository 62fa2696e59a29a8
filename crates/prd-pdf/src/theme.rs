//! Fixed visual theme for the paginated document.

/// Points per millimetre.
const MM: f32 = 72.0 / 25.4;

/// RGB colour with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Build a colour from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn hex(rgb: u32) -> Self {
        let [_, r, g, b] = rgb.to_be_bytes();
        Self { r, g, b }
    }

    /// Channels scaled to `0.0..=1.0` for PDF colour operators.
    #[must_use]
    pub fn unit_rgb(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

pub const NAVY: Color = Color::hex(0x001e_40af);
pub const DARK: Color = Color::hex(0x000f_172a);
pub const GREY: Color = Color::hex(0x0037_4151);
pub const DIM: Color = Color::hex(0x0094_a3b8);
pub const RULE: Color = Color::hex(0x00e2_e8f0);

/// Typographic settings for one kind of paragraph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParagraphStyle {
    pub font_size: f32,
    /// Baseline-to-baseline distance.
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
    pub color: Color,
    /// Whether unformatted text uses the bold face.
    pub bold: bool,
}

impl ParagraphStyle {
    /// Document title in the front matter.
    pub const H1: Self = Self {
        font_size: 22.0,
        leading: 28.0,
        space_before: 0.0,
        space_after: 4.0,
        left_indent: 0.0,
        color: DARK,
        bold: true,
    };

    /// Section label (upper-cased level-2 heading).
    pub const H2: Self = Self {
        font_size: 9.0,
        leading: 12.0,
        space_before: 16.0,
        space_after: 4.0,
        left_indent: 0.0,
        color: NAVY,
        bold: true,
    };

    /// Sub-section heading.
    pub const H3: Self = Self {
        font_size: 11.0,
        leading: 14.0,
        space_before: 8.0,
        space_after: 3.0,
        left_indent: 0.0,
        color: DARK,
        bold: true,
    };

    /// Body paragraph.
    pub const BODY: Self = Self {
        font_size: 10.0,
        leading: 16.0,
        space_before: 0.0,
        space_after: 3.0,
        left_indent: 0.0,
        color: GREY,
        bold: false,
    };

    /// Bulleted and numbered list items.
    pub const BULLET: Self = Self {
        font_size: 10.0,
        leading: 15.0,
        space_before: 0.0,
        space_after: 2.0,
        left_indent: 14.0,
        color: GREY,
        bold: false,
    };

    /// Small print: document label, byline, attribution.
    pub const META: Self = Self {
        font_size: 8.0,
        leading: 11.0,
        space_before: 0.0,
        space_after: 2.0,
        left_indent: 0.0,
        color: DIM,
        bold: false,
    };
}

/// Page size and margins in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl PageGeometry {
    /// ISO A4 portrait with 22 mm side and 20 mm top/bottom margins.
    pub const A4: Self = Self {
        width: 210.0 * MM,
        height: 297.0 * MM,
        margin_left: 22.0 * MM,
        margin_right: 22.0 * MM,
        margin_top: 20.0 * MM,
        margin_bottom: 20.0 * MM,
    };

    /// Width available to text between the side margins.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Y coordinate of the top of the content area.
    #[must_use]
    pub fn content_top(&self) -> f32 {
        self.height - self.margin_top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(NAVY, Color { r: 0x1e, g: 0x40, b: 0xaf });
        let (r, g, b) = Color::hex(0x00ff_0000).unit_rgb();
        assert!((r - 1.0).abs() < f32::EPSILON);
        assert!(g.abs() < f32::EPSILON);
        assert!(b.abs() < f32::EPSILON);
    }

    #[test]
    fn test_hex_ignores_high_byte() {
        assert_eq!(Color::hex(0xff12_3456), Color { r: 0x12, g: 0x34, b: 0x56 });
    }

    #[test]
    fn test_a4_dimensions() {
        let a4 = PageGeometry::A4;
        assert!((a4.width - 595.276).abs() < 0.01);
        assert!((a4.height - 841.89).abs() < 0.01);
        assert!((a4.content_width() - (595.276 - 2.0 * 62.362)).abs() < 0.01);
        assert!((a4.content_top() - (841.89 - 56.693)).abs() < 0.01);
    }
}
