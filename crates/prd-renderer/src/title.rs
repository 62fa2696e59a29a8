//! Display title resolution.

use chrono::{Local, NaiveDate};

/// Resolve a document title from its first top-level heading.
///
/// Falls back to a date-stamped default when the block has no `# ` line.
pub fn resolve_title(block: &str) -> String {
    resolve_title_on(block, Local::now().date_naive())
}

/// Resolve a document title, using `today` for the fallback.
///
/// Only lines starting with exactly `# ` followed by non-blank text qualify;
/// `##` and deeper headings never match.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use prd_renderer::resolve_title_on;
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
/// assert_eq!(resolve_title_on("## Goals\n#  Checkout Revamp \n", today), "Checkout Revamp");
/// assert_eq!(resolve_title_on("## Goals", today), "PRD – 07 Mar 2026");
/// ```
pub fn resolve_title_on(block: &str, today: NaiveDate) -> String {
    block
        .lines()
        .filter_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map_or_else(|| fallback_title(today), str::to_owned)
}

/// Default title for a document without a top-level heading.
pub fn fallback_title(date: NaiveDate) -> String {
    format!("PRD – {}", date.format("%d %b %Y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_first_h1_wins() {
        let block = "# Smart Search PRD\n## Problem\n# Second";
        assert_eq!(resolve_title_on(block, day()), "Smart Search PRD");
    }

    #[test]
    fn test_deeper_headings_ignored() {
        let block = "## Problem Statement\n### Detail\nText\n# Real Title";
        assert_eq!(resolve_title_on(block, day()), "Real Title");
    }

    #[test]
    fn test_hash_without_space_ignored() {
        assert_eq!(resolve_title_on("#hashtag\n", day()), "PRD – 16 Oct 2026");
    }

    #[test]
    fn test_indented_heading_ignored() {
        assert_eq!(resolve_title_on("  # Indented", day()), "PRD – 16 Oct 2026");
    }

    #[test]
    fn test_blank_heading_skipped() {
        assert_eq!(resolve_title_on("# \n#    \n# Named", day()), "Named");
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(resolve_title_on("# Mobile App\r\nBody", day()), "Mobile App");
    }

    #[test]
    fn test_fallback_format() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(fallback_title(date), "PRD – 05 Jan 2026");
        assert_eq!(resolve_title_on("", date), "PRD – 05 Jan 2026");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let first = resolve_title_on("Intro\n# Widget  PRD  \n## Goals", day());
        let again = resolve_title_on(&format!("# {first}\n## Goals"), day());
        assert_eq!(first, "Widget  PRD");
        assert_eq!(again, first);
    }
}
