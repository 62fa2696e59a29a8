//! Inline markup for PDF paragraphs.
//!
//! Paragraph text reaching the layout engine is escaped source text with a
//! small tag vocabulary: `<b>`, `<i>` and `<font face="Courier">`. This
//! module splits such text into styled runs and decodes entities.

use prd_renderer::InlineSyntax;

/// Inline syntax understood by [`parse_runs`].
pub const PDF_INLINE: InlineSyntax = InlineSyntax {
    bold: ("<b>", "</b>"),
    italic: ("<i>", "</i>"),
    code: ("<font face=\"Courier\">", "</font>"),
};

/// Style flags active for a run of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub mono: bool,
}

/// Maximal span of text sharing one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

#[derive(Clone, Copy)]
enum Tag {
    Bold(bool),
    Italic(bool),
    Mono(bool),
}

impl Tag {
    fn parse(inner: &str) -> Option<Self> {
        match inner {
            "b" => Some(Self::Bold(true)),
            "/b" => Some(Self::Bold(false)),
            "i" => Some(Self::Italic(true)),
            "/i" => Some(Self::Italic(false)),
            r#"font face="Courier""# => Some(Self::Mono(true)),
            "/font" => Some(Self::Mono(false)),
            _ => None,
        }
    }
}

/// Nesting depth per style; a style is active while its depth is positive.
#[derive(Default)]
struct Depth {
    bold: u32,
    italic: u32,
    mono: u32,
}

impl Depth {
    fn apply(&mut self, tag: Tag) {
        let (counter, open) = match tag {
            Tag::Bold(open) => (&mut self.bold, open),
            Tag::Italic(open) => (&mut self.italic, open),
            Tag::Mono(open) => (&mut self.mono, open),
        };
        *counter = if open {
            counter.saturating_add(1)
        } else {
            counter.saturating_sub(1)
        };
    }

    fn style(&self) -> RunStyle {
        RunStyle {
            bold: self.bold > 0,
            italic: self.italic > 0,
            mono: self.mono > 0,
        }
    }
}

/// Split tagged paragraph text into styled runs.
///
/// Unknown tags and unterminated `<` are kept as literal text, as are
/// unknown entities. Unbalanced closing tags are ignored.
pub fn parse_runs(markup: &str) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let mut depth = Depth::default();
    let mut buf = String::new();
    let mut rest = markup;

    while let Some(c) = rest.chars().next() {
        if c == '<'
            && let Some(end) = rest.find('>')
            && let Some(tag) = Tag::parse(&rest[1..end])
        {
            flush(&mut runs, &mut buf, depth.style());
            depth.apply(tag);
            rest = &rest[end + 1..];
            continue;
        }
        if c == '&'
            && let Some((decoded, len)) = decode_entity(rest)
        {
            buf.push(decoded);
            rest = &rest[len..];
            continue;
        }
        buf.push(c);
        rest = &rest[c.len_utf8()..];
    }
    flush(&mut runs, &mut buf, depth.style());
    runs
}

fn flush(runs: &mut Vec<Run>, buf: &mut String, style: RunStyle) {
    if buf.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(last) if last.style == style => last.text.push_str(buf),
        _ => runs.push(Run {
            text: buf.clone(),
            style,
        }),
    }
    buf.clear();
}

/// Decode the entity at the start of `s`, returning the character and the
/// number of bytes consumed.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    let semi = s.get(..10).unwrap_or(s).find(';')?;
    let decoded = match &s[1..semi] {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "#39" | "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => return None,
    };
    Some((decoded, semi + 1))
}
