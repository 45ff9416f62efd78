//! Page numbers read from attributes and fragments.

/// Parse a page number the way browsers parse a leading integer.
///
/// Leading whitespace and a `+` sign are skipped, then the leading run of
/// ASCII digits is read; anything after it is ignored. Empty runs,
/// negative numbers and values that overflow `u32` yield `None`.
///
/// # Example
///
/// ```rust
/// use pageflip::input::parse_page_number;
///
/// assert_eq!(parse_page_number("2"), Some(2));
/// assert_eq!(parse_page_number(" 3rd"), Some(3));
/// assert_eq!(parse_page_number("next"), None);
/// assert_eq!(parse_page_number("-1"), None);
/// ```
pub fn parse_page_number(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().ok()
}

/// Convert a page number passed in as a JavaScript number.
///
/// Only whole, finite values that fit `u32` name a page; `2.5`, `NaN` and
/// negative numbers yield `None` instead of being truncated.
///
/// # Example
///
/// ```rust
/// use pageflip::input::page_from_number;
///
/// assert_eq!(page_from_number(2.0), Some(2));
/// assert_eq!(page_from_number(2.5), None);
/// ```
pub fn page_from_number(value: f64) -> Option<u32> {
    if value.is_finite() && value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}
