//! Horizontal swipe detection.

use super::Navigation;

/// Tracks one touch gesture at a time.
///
/// Only horizontal movement counts; a gesture must travel strictly more
/// than the threshold to navigate. Swiping left goes forward, swiping right
/// goes back.
///
/// # Example
///
/// ```rust
/// use pageflip::input::{Navigation, SwipeTracker};
///
/// let mut swipe = SwipeTracker::new(50.0);
/// swipe.touch_start(200.0);
/// assert_eq!(swipe.touch_end(149.0), Some(Navigation::Next));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Record where a touch started.
    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finish the gesture at `x`. A touch end with no recorded start is
    /// ignored.
    pub fn touch_end(&mut self, x: f64) -> Option<Navigation> {
        let start = self.start_x.take()?;
        if x < start - self.threshold {
            Some(Navigation::Next)
        } else if x > start + self.threshold {
            Some(Navigation::Previous)
        } else {
            None
        }
    }
}
