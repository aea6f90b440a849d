//! Plain-text rendering of HTML verdict bodies.

use scraper::Html;

/// Strip markup from an HTML fragment.
///
/// Each text node is trimmed, blank nodes are dropped, and the remaining
/// nodes are joined with newlines so block boundaries survive.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
