//! Core deck state and logic.
//!
//! This module contains the pure part of the deck:
//! - The page index and transition phase via `PresentationState`
//! - Guard predicates for navigation requests
//! - Immutable navigation history
//!
//! Nothing in this module touches the document or schedules timers.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{NavigationHistory, NavigationSource, PageVisit};
pub use state::{PresentationState, StateError, TransitionPhase};

/// Marker class of the displayed page and of its navigation control.
pub const ACTIVE: &str = "active";

/// Marker class of a page that is fading in.
pub const FADE_IN: &str = "fade-in";

/// Marker class of a page that is fading out.
pub const FADE_OUT: &str = "fade-out";

/// Class of navigation controls carrying `data-page`.
pub const NAV_CONTROL: &str = "nav-btn";

/// Class of the keyboard hint dismissed after the first interaction.
pub const KEYBOARD_HINT: &str = "keyboard-hint";

/// Class of text elements that react to hover and press.
pub const PAGE_TEXT: &str = "page-text";

/// Data attribute (without the `data-` prefix) holding a control's page.
pub const PAGE_ATTR: &str = "page";

/// Data attribute (without the `data-` prefix) holding a link's target page.
pub const PAGE_LINK_ATTR: &str = "page-link";
