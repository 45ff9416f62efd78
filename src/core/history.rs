//! Navigation history tracking.
//!
//! Provides immutable tracking of committed page changes over the lifetime
//! of a deck. Nothing here is persisted; the history lives as long as the
//! controller that records it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What asked the deck to change page.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum NavigationSource {
    /// Direct call through the public API.
    Api,
    /// A navigation control carrying `data-page`.
    Click,
    /// An in-page link carrying `data-page-link`.
    Link,
    /// Arrow or digit key.
    Keyboard,
    /// Horizontal touch gesture.
    Swipe,
    /// URL fragment change or initial fragment.
    Fragment,
}

impl NavigationSource {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Click => "click",
            Self::Link => "link",
            Self::Keyboard => "keyboard",
            Self::Swipe => "swipe",
            Self::Fragment => "fragment",
        }
    }
}

/// Record of a single committed page change.
///
/// # Example
///
/// ```rust
/// use pageflip::core::{NavigationSource, PageVisit};
/// use chrono::Utc;
///
/// let visit = PageVisit {
///     from: 1,
///     to: 2,
///     source: NavigationSource::Keyboard,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(visit.to, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageVisit {
    /// The page being left
    pub from: u32,
    /// The page being shown
    pub to: u32,
    /// What triggered the change
    pub source: NavigationSource,
    /// When the new page was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed page changes.
///
/// History is immutable - the `record` method returns a new history with
/// the visit added.
///
/// # Example
///
/// ```rust
/// use pageflip::core::{NavigationHistory, NavigationSource, PageVisit};
/// use chrono::Utc;
///
/// let history = NavigationHistory::new();
/// let history = history.record(PageVisit {
///     from: 1,
///     to: 3,
///     source: NavigationSource::Api,
///     timestamp: Utc::now(),
/// });
/// let history = history.record(PageVisit {
///     from: 3,
///     to: 1,
///     source: NavigationSource::Swipe,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.path(), vec![1, 3, 1]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationHistory {
    visits: Vec<PageVisit>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self { visits: Vec::new() }
    }

    /// Record a visit, returning a new history.
    ///
    /// This does not mutate the existing history.
    pub fn record(&self, visit: PageVisit) -> Self {
        let mut history = self.clone();
        history.push(visit);
        history
    }

    /// Append a visit in place. The controller owns its history, so it
    /// records without copying earlier visits.
    pub(crate) fn push(&mut self, visit: PageVisit) {
        self.visits.push(visit);
    }

    /// Get the sequence of pages shown: the page of the first departure,
    /// then the destination of every visit.
    pub fn path(&self) -> Vec<u32> {
        let mut path = Vec::with_capacity(self.visits.len() + 1);
        if let Some(first) = self.visits.first() {
            path.push(first.from);
        }
        path.extend(self.visits.iter().map(|v| v.to));
        path
    }

    /// Time between the first and the last recorded visit.
    ///
    /// Returns `None` if nothing was recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.visits.first()?, self.visits.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn visits(&self) -> &[PageVisit] {
        &self.visits
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}
