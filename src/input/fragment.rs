//! URL fragment navigation.

use super::attrs::parse_page_number;

/// Extract the page number from a fragment such as `#page2`.
///
/// `prefix` is the full fragment prefix including `#`. The text after it is
/// parsed with [`parse_page_number`]. Whether the page exists is left to
/// the controller.
///
/// # Example
///
/// ```rust
/// use pageflip::input::parse_fragment;
///
/// assert_eq!(parse_fragment("#page2", "#page"), Some(2));
/// assert_eq!(parse_fragment("#page9", "#page"), Some(9));
/// assert_eq!(parse_fragment("#pagex", "#page"), None);
/// assert_eq!(parse_fragment("", "#page"), None);
/// ```
pub fn parse_fragment(fragment: &str, prefix: &str) -> Option<u32> {
    fragment
        .strip_prefix(prefix)
        .and_then(parse_page_number)
}

/// Fragment that addresses `page`.
pub fn fragment_for(page: u32, prefix: &str) -> String {
    format!("{prefix}{page}")
}
