//! Presentation state and the phases of a page transition.
//!
//! All methods here are pure. The state only changes through
//! [`PresentationState::begin`], [`PresentationState::commit`] and
//! [`PresentationState::settle`], which the page controller calls as the
//! cross-fade timers elapse.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where the deck is within a cross-fade.
///
/// Transitions are linear: `Idle -> FadingOut -> FadingIn -> Idle`.
/// Every in-flight phase carries the sequence number of the transition that
/// started it, so timers left over from an earlier transition can be told
/// apart from the current one.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TransitionPhase {
    /// No transition in flight.
    Idle,

    /// The old page is fading out; the index still points at `from`.
    FadingOut { from: u32, to: u32, transition: u64 },

    /// The new page has been committed and is fading in.
    FadingIn { page: u32, transition: u64 },
}

impl TransitionPhase {
    /// Get the phase name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::FadingOut { .. } => "FadingOut",
            Self::FadingIn { .. } => "FadingIn",
        }
    }

    /// Check whether no transition is in flight.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Sequence number of the in-flight transition, if any.
    pub fn transition(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::FadingOut { transition, .. } | Self::FadingIn { transition, .. } => {
                Some(*transition)
            }
        }
    }
}

/// Why a serialized state was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("Deck needs at least one page")]
    NoPages,

    #[error("Page {page} is outside 1..={total}")]
    PageOutOfRange { page: u32, total: u32 },

    #[error("Phase {phase} does not match current page {current}")]
    PhaseMismatch { phase: &'static str, current: u32 },
}

/// Current page index of the deck.
///
/// The index is 1-based and always satisfies `1 <= current <= total`.
/// `total` is fixed at construction.
///
/// # Example
///
/// ```rust
/// use pageflip::core::PresentationState;
///
/// let state = PresentationState::new(3);
/// assert_eq!(state.current(), 1);
/// assert!(state.contains(3));
/// assert!(!state.contains(4));
/// assert_eq!(state.next(), 2);
/// assert_eq!(state.previous(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawState")]
pub struct PresentationState {
    current: u32,
    total: u32,
    phase: TransitionPhase,
}

impl PresentationState {
    /// Create a state positioned on page 1.
    ///
    /// A `total` of zero is raised to one so the index invariant holds;
    /// configuration validation rejects such decks before they get here.
    pub fn new(total: u32) -> Self {
        Self {
            current: 1,
            total: total.max(1),
            phase: TransitionPhase::Idle,
        }
    }

    /// Rebuild a state from its parts, checking the index invariant and
    /// that the phase agrees with the current page.
    pub fn restore(current: u32, total: u32, phase: TransitionPhase) -> Result<Self, StateError> {
        if total == 0 {
            return Err(StateError::NoPages);
        }
        let state = Self {
            current,
            total,
            phase,
        };
        for page in state.pages_in_use() {
            if !state.contains(page) {
                return Err(StateError::PageOutOfRange { page, total });
            }
        }
        let consistent = match phase {
            TransitionPhase::Idle => true,
            TransitionPhase::FadingOut { from, .. } => from == current,
            TransitionPhase::FadingIn { page, .. } => page == current,
        };
        if !consistent {
            return Err(StateError::PhaseMismatch {
                phase: phase.name(),
                current,
            });
        }
        Ok(state)
    }

    fn pages_in_use(&self) -> Vec<u32> {
        match self.phase {
            TransitionPhase::Idle => vec![self.current],
            TransitionPhase::FadingOut { from, to, .. } => vec![self.current, from, to],
            TransitionPhase::FadingIn { page, .. } => vec![self.current, page],
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        !self.phase.is_settled()
    }

    /// Check whether `page` names a page of this deck.
    pub fn contains(&self, page: u32) -> bool {
        (1..=self.total).contains(&page)
    }

    /// Page after the current one, wrapping from the last page to the first.
    pub fn next(&self) -> u32 {
        if self.current >= self.total {
            1
        } else {
            self.current + 1
        }
    }

    /// Page before the current one, wrapping from the first page to the last.
    pub fn previous(&self) -> u32 {
        if self.current <= 1 {
            self.total
        } else {
            self.current - 1
        }
    }

    /// Enter the fade-out phase towards `to`.
    pub(crate) fn begin(&mut self, to: u32, transition: u64) {
        self.phase = TransitionPhase::FadingOut {
            from: self.current,
            to,
            transition,
        };
    }

    /// Move the index to the target of the fade-out and enter the fade-in
    /// phase. Returns `(from, to)` on success, `None` if `transition` is not
    /// the one fading out.
    pub(crate) fn commit(&mut self, transition: u64) -> Option<(u32, u32)> {
        match self.phase {
            TransitionPhase::FadingOut {
                from,
                to,
                transition: active,
            } if active == transition => {
                self.current = to;
                self.phase = TransitionPhase::FadingIn {
                    page: to,
                    transition,
                };
                Some((from, to))
            }
            _ => None,
        }
    }

    /// Return to idle once the fade-in of `transition` is over. Returns the
    /// page that finished fading in.
    pub(crate) fn settle(&mut self, transition: u64) -> Option<u32> {
        match self.phase {
            TransitionPhase::FadingIn {
                page,
                transition: active,
            } if active == transition => {
                self.phase = TransitionPhase::Idle;
                Some(page)
            }
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawState {
    current: u32,
    total: u32,
    phase: TransitionPhase,
}

impl TryFrom<RawState> for PresentationState {
    type Error = StateError;

    fn try_from(raw: RawState) -> Result<Self, Self::Error> {
        Self::restore(raw.current, raw.total, raw.phase)
    }
}
