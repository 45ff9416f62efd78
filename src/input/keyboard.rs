//! Keyboard mapping.

use super::Navigation;

/// Map a `KeyboardEvent.key` value to a navigation request.
///
/// Right/down arrows go forward, left/up arrows go back, and a single
/// digit from `1` to `total_pages` jumps to that page. Every other key
/// returns `None` and keeps its default browser behaviour.
///
/// # Example
///
/// ```rust
/// use pageflip::input::{map_key, Navigation};
///
/// assert_eq!(map_key("ArrowRight", 3), Some(Navigation::Next));
/// assert_eq!(map_key("2", 3), Some(Navigation::GoTo(2)));
/// assert_eq!(map_key("4", 3), None);
/// assert_eq!(map_key("Enter", 3), None);
/// ```
pub fn map_key(key: &str, total_pages: u32) -> Option<Navigation> {
    match key {
        "ArrowRight" | "ArrowDown" => Some(Navigation::Next),
        "ArrowLeft" | "ArrowUp" => Some(Navigation::Previous),
        _ => {
            let mut chars = key.chars();
            let digit = chars.next()?.to_digit(10)?;
            if chars.next().is_some() || digit == 0 || digit > total_pages {
                return None;
            }
            Some(Navigation::GoTo(digit))
        }
    }
}
