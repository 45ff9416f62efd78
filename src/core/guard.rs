//! Guard predicates for navigation requests.
//!
//! Guards are pure boolean functions that decide whether the deck may move
//! to a requested page. The controller always checks bounds, the current
//! page and in-flight transitions itself; guards add deck-specific rules on
//! top, such as locking a page until some condition holds.

use super::state::PresentationState;

/// Pure predicate that determines if a navigation request may proceed.
///
/// # Example
///
/// ```rust
/// use pageflip::core::{Guard, PresentationState};
///
/// // Only allow moving forward through the deck.
/// let forward_only = Guard::new("forward-only", |state: &PresentationState, target| {
///     target > state.current()
/// });
///
/// let state = PresentationState::new(3);
/// assert!(forward_only.check(&state, 2));
/// assert_eq!(forward_only.name(), "forward-only");
/// ```
pub struct Guard {
    name: String,
    predicate: Box<dyn Fn(&PresentationState, u32) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a name and a pure predicate.
    ///
    /// The name is reported in [`NavigationError::Blocked`](crate::effects::NavigationError::Blocked)
    /// when the predicate refuses a request.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&PresentationState, u32) -> bool + Send + Sync + 'static,
    {
        Guard {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard allows moving from `state` to `target`.
    pub fn check(&self, state: &PresentationState, target: u32) -> bool {
        (self.predicate)(state, target)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_allows_matching_targets() {
        let guard = Guard::new("not-three", |_s: &PresentationState, target| target != 3);
        let state = PresentationState::new(3);

        assert!(guard.check(&state, 2));
        assert!(!guard.check(&state, 3));
    }

    #[test]
    fn guard_sees_current_state() {
        let guard = Guard::new("from-first", |s: &PresentationState, _target| s.current() == 1);
        let state = PresentationState::new(3);

        assert!(guard.check(&state, 2));
        assert!(guard.check(&state, 3));
    }

    #[test]
    fn guard_is_deterministic() {
        let state = PresentationState::new(5);
        let guard = Guard::new("even", |_s: &PresentationState, target| target % 2 == 0);

        assert_eq!(guard.check(&state, 4), guard.check(&state, 4));
    }

    #[test]
    fn debug_shows_name_only() {
        let guard = Guard::new("locked", |_s: &PresentationState, _t| false);
        assert_eq!(format!("{guard:?}"), "Guard { name: \"locked\" }");
    }
}
