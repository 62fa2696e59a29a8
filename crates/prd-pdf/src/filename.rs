//! Download filenames derived from document titles.

/// Maximum number of title characters kept in a filename.
const MAX_STEM_CHARS: usize = 40;

/// Reduce a title to a filesystem-safe stem.
///
/// Keeps ASCII letters, digits, `_`, `-` and spaces, truncates to 40
/// characters, then turns spaces into underscores.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' '))
        .take(MAX_STEM_CHARS)
        .collect::<String>()
        .replace(' ', "_")
}

/// Filename stem shared by every export format: `PRD_<sanitized title>`.
pub fn export_stem(title: &str) -> String {
    format!("PRD_{}", sanitize_title(title))
}

/// Download filename for the PDF export of a document.
///
/// # Example
///
/// ```
/// assert_eq!(prd_pdf::pdf_filename("Smart Search: v2!!"), "PRD_Smart_Search_v2.pdf");
/// ```
pub fn pdf_filename(title: &str) -> String {
    format!("{}.pdf", export_stem(title))
}
