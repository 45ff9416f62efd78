//! Input adapters.
//!
//! Each adapter turns one kind of host event into a [`Navigation`] request
//! or a decoration update. Apart from the swipe tracker, which remembers
//! where a touch started, adapters hold no state. [`InputEvent`] is the
//! host-neutral form of every event the deck listens to; `Deck::handle`
//! dispatches it.

mod attrs;
mod fragment;
mod keyboard;
mod swipe;

pub use attrs::{page_from_number, parse_page_number};
pub use fragment::{fragment_for, parse_fragment};
pub use keyboard::map_key;
pub use swipe::SwipeTracker;

use crate::decor::PointerPhase;

/// A navigation request produced by an input adapter.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Navigation {
    Next,
    Previous,
    GoTo(u32),
}

/// An event delivered by the host, generic over its element handle.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent<E> {
    /// Key pressed anywhere, carrying `KeyboardEvent.key`.
    Key(String),

    /// Click on a navigation control.
    NavClick(E),

    /// Click on an in-page link carrying `data-page-link`.
    LinkClick(E),

    /// Click anywhere else in the document.
    Click,

    TouchStart { x: f64 },

    TouchEnd { x: f64 },

    /// The URL fragment changed, including through back/forward.
    FragmentChanged(String),

    /// A CSS transition on `element` finished.
    TransitionEnd { element: E, property: String },

    /// Pointer activity on a hover-animated text element.
    Pointer { element: E, phase: PointerPhase },

    Resize,
}

/// What the host should do with the original event after dispatch.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Handled {
    /// Suppress the browser's default action.
    pub prevent_default: bool,
}

impl Handled {
    pub(crate) fn pass() -> Self {
        Self {
            prevent_default: false,
        }
    }

    pub(crate) fn consume() -> Self {
        Self {
            prevent_default: true,
        }
    }
}
