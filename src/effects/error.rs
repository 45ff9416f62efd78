//! Navigation errors.

use thiserror::Error;

/// Reasons a navigation request was refused.
///
/// None of these reach the user: input adapters log them at `debug` and
/// move on. They exist so embedders and tests can tell a refused request
/// from an accepted one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Page {target} is outside 1..={total}")]
    OutOfRange { target: u32, total: u32 },

    #[error("Page {0} is already displayed")]
    AlreadyCurrent(u32),

    #[error("Transition to page {to} still in flight")]
    TransitionInFlight { to: u32 },

    #[error("Page element '{0}' not found")]
    MissingElement(String),

    #[error("Guard '{guard}' blocked navigation to page {target}")]
    Blocked { guard: String, target: u32 },
}
