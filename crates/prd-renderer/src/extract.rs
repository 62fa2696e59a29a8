//! Document block extraction from generated text.

use std::sync::LazyLock;

use regex::Regex;

/// Marker that opens a document block.
pub const START_MARKER: &str = "<PRD_START>";

/// Marker that closes a document block.
pub const END_MARKER: &str = "<PRD_END>";

static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<PRD_START>(.*?)<PRD_END>").unwrap());

/// Generated text split into its document block and commentary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extracted {
    /// Trimmed text between the first marker pair, if one was found.
    pub block: Option<String>,
    /// Everything outside the marker spans.
    ///
    /// Trimmed when a block was found; the untouched input otherwise, so
    /// partial streaming output is shown exactly as generated.
    pub commentary: String,
}

/// Split generated text into a document block and commentary.
///
/// The block is the first complete `<PRD_START>…<PRD_END>` span. The match
/// is non-greedy and spans lines. Every complete span, including any after
/// the first, is removed from the commentary. A missing block is a normal
/// outcome (discovery-question turns never carry one).
///
/// # Examples
///
/// ```
/// use prd_renderer::extract;
///
/// let result = extract("Intro <PRD_START> # Doc <PRD_END> outro");
/// assert_eq!(result.block.as_deref(), Some("# Doc"));
/// assert_eq!(result.commentary, "Intro  outro");
///
/// let miss = extract("  What problem are you solving?  ");
/// assert_eq!(miss.block, None);
/// assert_eq!(miss.commentary, "  What problem are you solving?  ");
/// ```
pub fn extract(text: &str) -> Extracted {
    let Some(captures) = BLOCK_RE.captures(text) else {
        return Extracted {
            block: None,
            commentary: text.to_owned(),
        };
    };

    let block = captures.get(1).map_or("", |m| m.as_str()).trim().to_owned();
    let commentary = BLOCK_RE.replace_all(text, "");

    Extracted {
        block: Some(block),
        commentary: commentary.trim().to_owned(),
    }
}
