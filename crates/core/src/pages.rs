//! Narrative-to-page segmentation.

/// Page count range the story prompt asks the model for. Segmentation
/// itself accepts whatever the model returns, as long as at least one
/// non-empty page comes out.
pub const MIN_PAGES: usize = 5;
pub const MAX_PAGES: usize = 7;

/// Splits a narrative into pages on blank-line boundaries.
///
/// Windows line endings are normalized first, segments are trimmed and
/// empty segments discarded, so runs of three or more newlines do not
/// produce phantom pages. Page order follows text order.
pub fn split_pages(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
