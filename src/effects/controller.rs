//! Page controller that drives the cross-fade between pages.

use crate::core::{
    Guard, NavigationHistory, NavigationSource, PageVisit, PresentationState, TransitionPhase,
    ACTIVE, FADE_IN, FADE_OUT, NAV_CONTROL, PAGE_ATTR,
};
use crate::effects::document::Document;
use crate::effects::error::NavigationError;
use crate::effects::scheduler::{Scheduler, Timer};
use crate::input::parse_page_number;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, warn};

/// Delays of the two cross-fade phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionTiming {
    /// From marking the old page `fade-out` to committing the new page.
    pub fade_out: Duration,
    /// From committing the new page to stripping its `fade-in` marker.
    pub fade_in: Duration,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            fade_out: Duration::from_millis(300),
            fade_in: Duration::from_millis(400),
        }
    }
}

/// Owns the page index and performs validated, animated transitions.
///
/// The controller holds no document and no clock. Every effectful
/// operation borrows them, so the same controller runs against the browser
/// or against [`MemoryDocument`](crate::effects::MemoryDocument) and
/// [`ManualScheduler`](crate::effects::ManualScheduler).
///
/// A transition runs in three steps:
/// 1. [`go_to_page`](Self::go_to_page) marks the current page `fade-out`
///    and schedules [`Timer::CommitPage`].
/// 2. The commit swaps `active` to the new page, adds `fade-in`, moves the
///    index, refreshes navigation controls and schedules
///    [`Timer::ClearFadeIn`].
/// 3. The clear strips `fade-in` and returns the controller to idle.
///
/// Requests made before step 3 are rejected.
#[derive(Debug)]
pub struct PageController {
    state: PresentationState,
    page_id_prefix: String,
    timing: TransitionTiming,
    guards: Vec<Guard>,
    history: NavigationHistory,
    last_transition: u64,
    in_flight_source: NavigationSource,
}

impl PageController {
    /// Create a controller on page 1 of a `total`-page deck whose page
    /// elements are `{page_id_prefix}1..={page_id_prefix}{total}`.
    pub fn new(total: u32, page_id_prefix: impl Into<String>, timing: TransitionTiming) -> Self {
        Self {
            state: PresentationState::new(total),
            page_id_prefix: page_id_prefix.into(),
            timing,
            guards: Vec::new(),
            history: NavigationHistory::new(),
            last_transition: 0,
            in_flight_source: NavigationSource::Api,
        }
    }

    /// Add a guard consulted after the built-in checks.
    pub fn add_guard(&mut self, guard: Guard) {
        self.guards.push(guard);
    }

    pub fn current_page(&self) -> u32 {
        self.state.current()
    }

    pub fn total_pages(&self) -> u32 {
        self.state.total()
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning()
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// Id of the element holding `page`.
    pub fn page_id(&self, page: u32) -> String {
        format!("{}{}", self.page_id_prefix, page)
    }

    /// Check a request without acting on it.
    pub fn validate(&self, target: u32) -> Result<(), NavigationError> {
        if !self.state.contains(target) {
            return Err(NavigationError::OutOfRange {
                target,
                total: self.state.total(),
            });
        }

        match self.state.phase() {
            TransitionPhase::Idle => {}
            TransitionPhase::FadingOut { to, .. } | TransitionPhase::FadingIn { page: to, .. } => {
                return Err(NavigationError::TransitionInFlight { to });
            }
        }

        if target == self.state.current() {
            return Err(NavigationError::AlreadyCurrent(target));
        }

        if let Some(guard) = self.guards.iter().find(|g| !g.check(&self.state, target)) {
            return Err(NavigationError::Blocked {
                guard: guard.name().to_string(),
                target,
            });
        }

        Ok(())
    }

    /// Start a transition to `target`.
    ///
    /// On success the current page is fading out and the commit is
    /// scheduled. On error nothing in the document or the controller has
    /// changed.
    pub fn go_to_page<D, S>(
        &mut self,
        target: u32,
        source: NavigationSource,
        doc: &mut D,
        timers: &mut S,
    ) -> Result<(), NavigationError>
    where
        D: Document,
        S: Scheduler,
    {
        self.validate(target)?;

        let from = self.state.current();
        let current_el = self.require_page(from, doc)?;
        self.require_page(target, doc)?;

        self.last_transition += 1;
        let transition = self.last_transition;

        doc.add_class(&current_el, FADE_OUT);
        self.state.begin(target, transition);
        self.in_flight_source = source;
        timers.schedule(self.timing.fade_out, Timer::CommitPage { transition });

        debug!(
            from,
            to = target,
            source = source.name(),
            transition,
            "page transition started"
        );
        Ok(())
    }

    /// Go to the page after the current one, wrapping to page 1.
    pub fn next_page<D, S>(
        &mut self,
        source: NavigationSource,
        doc: &mut D,
        timers: &mut S,
    ) -> Result<(), NavigationError>
    where
        D: Document,
        S: Scheduler,
    {
        let next = self.state.next();
        self.go_to_page(next, source, doc, timers)
    }

    /// Go to the page before the current one, wrapping to the last page.
    pub fn prev_page<D, S>(
        &mut self,
        source: NavigationSource,
        doc: &mut D,
        timers: &mut S,
    ) -> Result<(), NavigationError>
    where
        D: Document,
        S: Scheduler,
    {
        let previous = self.state.previous();
        self.go_to_page(previous, source, doc, timers)
    }

    /// Deliver a transition timer. Returns `false` for timers the
    /// controller does not own.
    pub fn on_timer<D, S>(&mut self, timer: Timer, doc: &mut D, timers: &mut S) -> bool
    where
        D: Document,
        S: Scheduler,
    {
        match timer {
            Timer::CommitPage { transition } => {
                self.commit(transition, doc, timers);
                true
            }
            Timer::ClearFadeIn { transition } => {
                self.settle(transition, doc);
                true
            }
            _ => false,
        }
    }

    /// Mark every navigation control whose `data-page` matches the current
    /// page `active` and clear the marker everywhere else.
    pub fn refresh_nav_indicators<D: Document>(&self, doc: &mut D) {
        let current = self.state.current();
        for control in doc.elements_with_class(NAV_CONTROL) {
            let page = doc
                .data_attribute(&control, PAGE_ATTR)
                .and_then(|raw| parse_page_number(&raw));
            if page == Some(current) {
                doc.add_class(&control, ACTIVE);
            } else {
                doc.remove_class(&control, ACTIVE);
            }
        }
    }

    /// Make the current page the only `active` page and clear any fade
    /// markers. Used once when the deck starts.
    pub fn sync_pages<D: Document>(&self, doc: &mut D) {
        let current = self.state.current();
        for page in 1..=self.state.total() {
            let Some(el) = doc.element_by_id(&self.page_id(page)) else {
                continue;
            };
            doc.remove_class(&el, FADE_IN);
            doc.remove_class(&el, FADE_OUT);
            if page == current {
                doc.add_class(&el, ACTIVE);
            } else {
                doc.remove_class(&el, ACTIVE);
            }
        }
    }

    /// Strip residual fade markers when the opacity transition of `element`
    /// finishes. Other properties are ignored.
    pub fn on_transition_end<D: Document>(&self, element: &D::Element, property: &str, doc: &mut D) {
        if property != "opacity" {
            return;
        }
        doc.remove_class(element, FADE_IN);
        doc.remove_class(element, FADE_OUT);
    }

    fn require_page<D: Document>(&self, page: u32, doc: &D) -> Result<D::Element, NavigationError> {
        let id = self.page_id(page);
        doc.element_by_id(&id)
            .ok_or(NavigationError::MissingElement(id))
    }

    fn commit<D, S>(&mut self, transition: u64, doc: &mut D, timers: &mut S)
    where
        D: Document,
        S: Scheduler,
    {
        let Some((from, to)) = self.state.commit(transition) else {
            debug!(transition, "ignoring stale commit timer");
            return;
        };

        match doc.element_by_id(&self.page_id(from)) {
            Some(el) => {
                doc.remove_class(&el, ACTIVE);
                doc.remove_class(&el, FADE_OUT);
            }
            None => warn!(page = from, "departing page element vanished mid-transition"),
        }
        match doc.element_by_id(&self.page_id(to)) {
            Some(el) => {
                doc.add_class(&el, ACTIVE);
                doc.add_class(&el, FADE_IN);
            }
            None => warn!(page = to, "arriving page element vanished mid-transition"),
        }

        self.refresh_nav_indicators(doc);
        self.history.push(PageVisit {
            from,
            to,
            source: self.in_flight_source,
            timestamp: Utc::now(),
        });
        timers.schedule(self.timing.fade_in, Timer::ClearFadeIn { transition });
    }

    fn settle<D: Document>(&mut self, transition: u64, doc: &mut D) {
        let Some(page) = self.state.settle(transition) else {
            debug!(transition, "ignoring stale fade-in timer");
            return;
        };
        if let Some(el) = doc.element_by_id(&self.page_id(page)) {
            doc.remove_class(&el, FADE_IN);
        }
        debug!(page, transition, "page transition finished");
    }
}
