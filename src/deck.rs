//! A complete deck: controller, input adapters and decorations over one
//! document and one scheduler.

use crate::config::DeckConfig;
use crate::core::{
    NavigationHistory, NavigationSource, PresentationState, StateError, TransitionPhase,
    PAGE_ATTR, PAGE_LINK_ATTR,
};
use crate::decor::{apply_pointer, preload_assets, KeyboardHint, ResizeDebouncer};
use crate::effects::{
    Document, ManualScheduler, NavigationError, PageController, Scheduler, Timer,
};
use crate::input::{
    map_key, parse_fragment, parse_page_number, Handled, InputEvent, Navigation, SwipeTracker,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Serializable view of a deck for embedding and debugging.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct DeckSnapshot {
    pub current_page: u32,
    pub total_pages: u32,
    pub phase: TransitionPhase,
    pub history: NavigationHistory,
}

impl DeckSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Deserialize)]
struct RawSnapshot {
    current_page: u32,
    total_pages: u32,
    phase: TransitionPhase,
    history: NavigationHistory,
}

impl TryFrom<RawSnapshot> for DeckSnapshot {
    type Error = StateError;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        PresentationState::restore(raw.current_page, raw.total_pages, raw.phase)?;
        Ok(Self {
            current_page: raw.current_page,
            total_pages: raw.total_pages,
            phase: raw.phase,
            history: raw.history,
        })
    }
}

/// A running deck.
///
/// Build one with [`DeckBuilder`](crate::builder::DeckBuilder), call
/// [`start`](Self::start) once the document is ready, then feed it host
/// events through [`handle`](Self::handle) and elapsed timers through
/// [`fire`](Self::fire).
pub struct Deck<D: Document, S: Scheduler> {
    config: DeckConfig,
    doc: D,
    timers: S,
    controller: PageController,
    swipe: SwipeTracker,
    hint: KeyboardHint,
    resize: ResizeDebouncer,
}

impl<D: Document, S: Scheduler> Deck<D, S> {
    pub(crate) fn assemble(config: DeckConfig, controller: PageController, doc: D, timers: S) -> Self {
        Self {
            swipe: SwipeTracker::new(config.swipe_threshold_px),
            hint: KeyboardHint::new(config.hint_delay(), config.hint_hide()),
            resize: ResizeDebouncer::new(config.resize_debounce()),
            config,
            doc,
            timers,
            controller,
        }
    }

    /// Bring the document in line with the controller, warm the image
    /// cache and honour the initial URL fragment, if any.
    pub fn start(&mut self, fragment: Option<&str>) {
        self.controller.sync_pages(&mut self.doc);
        self.controller.refresh_nav_indicators(&mut self.doc);
        let preloaded = preload_assets(&mut self.doc, &self.config.asset_urls);

        info!(
            pages = self.controller.total_pages(),
            preloaded, "interactive pages initialized"
        );

        if let Some(fragment) = fragment {
            self.follow_fragment(fragment);
        }
    }

    pub fn go_to_page(&mut self, target: u32) -> Result<(), NavigationError> {
        self.controller
            .go_to_page(target, NavigationSource::Api, &mut self.doc, &mut self.timers)
    }

    pub fn next_page(&mut self) -> Result<(), NavigationError> {
        self.navigate(Navigation::Next, NavigationSource::Api)
    }

    pub fn prev_page(&mut self) -> Result<(), NavigationError> {
        self.navigate(Navigation::Previous, NavigationSource::Api)
    }

    /// Act on a navigation request from any source.
    pub fn navigate(
        &mut self,
        navigation: Navigation,
        source: NavigationSource,
    ) -> Result<(), NavigationError> {
        let (doc, timers) = (&mut self.doc, &mut self.timers);
        match navigation {
            Navigation::Next => self.controller.next_page(source, doc, timers),
            Navigation::Previous => self.controller.prev_page(source, doc, timers),
            Navigation::GoTo(page) => self.controller.go_to_page(page, source, doc, timers),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.controller.current_page()
    }

    pub fn total_pages(&self) -> u32 {
        self.controller.total_pages()
    }

    pub fn is_transitioning(&self) -> bool {
        self.controller.is_transitioning()
    }

    pub fn state(&self) -> &PresentationState {
        self.controller.state()
    }

    pub fn history(&self) -> &NavigationHistory {
        self.controller.history()
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn scheduler(&self) -> &S {
        &self.timers
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.timers
    }

    pub fn hint_dismissed(&self) -> bool {
        self.hint.has_interacted()
    }

    /// Number of resize bursts that have settled.
    pub fn resizes_settled(&self) -> u64 {
        self.resize.settled()
    }

    pub fn snapshot(&self) -> DeckSnapshot {
        let state = self.controller.state();
        DeckSnapshot {
            current_page: state.current(),
            total_pages: state.total(),
            phase: state.phase(),
            history: self.controller.history().clone(),
        }
    }

    /// Deliver an elapsed timer.
    pub fn fire(&mut self, timer: Timer) {
        if self
            .controller
            .on_timer(timer, &mut self.doc, &mut self.timers)
        {
            return;
        }
        if self.hint.on_timer(timer, &mut self.doc, &mut self.timers) {
            return;
        }
        if timer == Timer::ResizeSettled {
            self.resize.on_settled();
        }
    }

    /// Dispatch a host event.
    ///
    /// Refused navigation requests are logged and otherwise ignored.
    pub fn handle(&mut self, event: InputEvent<D::Element>) -> Handled {
        match event {
            InputEvent::Key(key) => {
                self.hint.notice(&self.doc, &mut self.timers);
                match map_key(&key, self.controller.total_pages()) {
                    Some(navigation) => {
                        self.request(navigation, NavigationSource::Keyboard);
                        Handled::consume()
                    }
                    None => Handled::pass(),
                }
            }
            InputEvent::NavClick(control) => {
                self.hint.notice(&self.doc, &mut self.timers);
                self.follow_attribute(&control, PAGE_ATTR, NavigationSource::Click);
                Handled::pass()
            }
            InputEvent::LinkClick(link) => {
                self.hint.notice(&self.doc, &mut self.timers);
                self.follow_attribute(&link, PAGE_LINK_ATTR, NavigationSource::Link);
                Handled::consume()
            }
            InputEvent::Click => {
                self.hint.notice(&self.doc, &mut self.timers);
                Handled::pass()
            }
            InputEvent::TouchStart { x } => {
                self.swipe.touch_start(x);
                Handled::pass()
            }
            InputEvent::TouchEnd { x } => {
                if let Some(navigation) = self.swipe.touch_end(x) {
                    self.request(navigation, NavigationSource::Swipe);
                }
                Handled::pass()
            }
            InputEvent::FragmentChanged(fragment) => {
                self.follow_fragment(&fragment);
                Handled::pass()
            }
            InputEvent::TransitionEnd { element, property } => {
                self.controller
                    .on_transition_end(&element, &property, &mut self.doc);
                Handled::pass()
            }
            InputEvent::Pointer { element, phase } => {
                apply_pointer(&mut self.doc, &element, phase);
                Handled::pass()
            }
            InputEvent::Resize => {
                self.resize.on_resize(&mut self.timers);
                Handled::pass()
            }
        }
    }

    fn request(&mut self, navigation: Navigation, source: NavigationSource) {
        if let Err(error) = self.navigate(navigation, source) {
            debug!(%error, source = source.name(), "navigation request ignored");
        }
    }

    fn follow_attribute(&mut self, element: &D::Element, attribute: &str, source: NavigationSource) {
        match self
            .doc
            .data_attribute(element, attribute)
            .and_then(|raw| parse_page_number(&raw))
        {
            Some(page) => self.request(Navigation::GoTo(page), source),
            None => debug!(attribute, "element has no usable page number"),
        }
    }

    fn follow_fragment(&mut self, fragment: &str) {
        match parse_fragment(fragment, &self.config.fragment_prefix) {
            Some(page) if self.controller.state().contains(page) => {
                self.request(Navigation::GoTo(page), NavigationSource::Fragment)
            }
            _ => debug!(fragment, "ignoring fragment"),
        }
    }
}

impl<D: Document> Deck<D, ManualScheduler> {
    /// Move the virtual clock forward by `by`, delivering every timer that
    /// falls due on the way, including timers scheduled by earlier ones.
    pub fn advance(&mut self, by: Duration) {
        let until = self.timers.now() + by;
        while let Some(timer) = self.timers.pop_due(until) {
            self.fire(timer);
        }
        self.timers.set_now(until);
    }

    /// Deliver timers until no transition is in flight.
    pub fn finish_transition(&mut self) {
        let timing = self.config.timing();
        self.advance(timing.fade_out + timing.fade_in);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DeckBuilder;
    use crate::core::{ACTIVE, FADE_IN, KEYBOARD_HINT};
    use crate::decor::PointerPhase;
    use crate::effects::MemoryDocument;

    fn deck() -> Deck<MemoryDocument, ManualScheduler> {
        let mut deck = DeckBuilder::new()
            .document(MemoryDocument::deck_markup("page", 3))
            .scheduler(ManualScheduler::new())
            .build()
            .unwrap();
        deck.start(None);
        deck
    }

    fn key(k: &str) -> InputEvent<String> {
        InputEvent::Key(k.to_string())
    }

    #[test]
    fn start_preloads_and_marks_navigation() {
        let deck = deck();
        assert_eq!(deck.document().preloaded().len(), 3);
        assert!(deck.document().class_of("nav-1", ACTIVE));
        assert!(!deck.document().class_of("nav-2", ACTIVE));
    }

    #[test]
    fn start_follows_initial_fragment() {
        let mut deck = DeckBuilder::new()
            .document(MemoryDocument::deck_markup("page", 3))
            .scheduler(ManualScheduler::new())
            .build()
            .unwrap();
        deck.start(Some("#page3"));
        deck.finish_transition();

        assert_eq!(deck.current_page(), 3);
        assert_eq!(deck.history().visits()[0].source, NavigationSource::Fragment);
    }

    #[test]
    fn recognised_keys_prevent_default() {
        let mut deck = deck();

        assert!(deck.handle(key("ArrowRight")).prevent_default);
        deck.finish_transition();
        assert_eq!(deck.current_page(), 2);

        assert!(!deck.handle(key("Enter")).prevent_default);
        assert!(!deck.handle(key("7")).prevent_default);
    }

    #[test]
    fn digit_key_jumps() {
        let mut deck = deck();
        deck.handle(key("3"));
        deck.finish_transition();
        assert_eq!(deck.current_page(), 3);
    }

    #[test]
    fn nav_click_follows_data_page() {
        let mut deck = deck();
        let handled = deck.handle(InputEvent::NavClick("nav-2".to_string()));
        deck.finish_transition();

        assert!(!handled.prevent_default);
        assert_eq!(deck.current_page(), 2);
        assert!(deck.document().class_of("nav-2", ACTIVE));
        assert_eq!(deck.history().visits()[0].source, NavigationSource::Click);
    }

    #[test]
    fn link_click_always_prevents_default() {
        let doc = MemoryDocument::deck_markup("page", 3)
            .with_element("cta", &[])
            .with_data("cta", PAGE_LINK_ATTR, "3")
            .with_element("broken", &[])
            .with_data("broken", PAGE_LINK_ATTR, "soon");
        let mut deck = DeckBuilder::new()
            .document(doc)
            .scheduler(ManualScheduler::new())
            .build()
            .unwrap();
        deck.start(None);

        assert!(deck.handle(InputEvent::LinkClick("broken".to_string())).prevent_default);
        assert!(!deck.is_transitioning());

        assert!(deck.handle(InputEvent::LinkClick("cta".to_string())).prevent_default);
        deck.finish_transition();
        assert_eq!(deck.current_page(), 3);
    }

    #[test]
    fn swipes_navigate_past_threshold_only() {
        let mut deck = deck();

        deck.handle(InputEvent::TouchStart { x: 300.0 });
        deck.handle(InputEvent::TouchEnd { x: 250.0 });
        assert!(!deck.is_transitioning());

        deck.handle(InputEvent::TouchStart { x: 300.0 });
        deck.handle(InputEvent::TouchEnd { x: 249.0 });
        deck.finish_transition();
        assert_eq!(deck.current_page(), 2);

        deck.handle(InputEvent::TouchStart { x: 100.0 });
        deck.handle(InputEvent::TouchEnd { x: 151.0 });
        deck.finish_transition();
        assert_eq!(deck.current_page(), 1);
    }

    #[test]
    fn fragments_in_range_navigate() {
        let mut deck = deck();

        deck.handle(InputEvent::FragmentChanged("#page9".to_string()));
        assert!(!deck.is_transitioning());

        deck.handle(InputEvent::FragmentChanged("#page2".to_string()));
        deck.finish_transition();
        assert_eq!(deck.current_page(), 2);
    }

    #[test]
    fn first_interaction_dismisses_hint() {
        let mut deck = deck();
        deck.handle(InputEvent::Click);
        deck.handle(key("x"));
        assert!(deck.hint_dismissed());

        deck.advance(Duration::from_millis(5000));
        assert_eq!(deck.document().style_of("hint", "opacity"), Some("0"));
        deck.advance(Duration::from_millis(300));
        assert_eq!(deck.document().style_of("hint", "display"), Some("none"));
        assert_eq!(deck.document().ids_with_class(KEYBOARD_HINT), vec!["hint"]);
    }

    #[test]
    fn resize_bursts_settle_once() {
        let mut deck = deck();
        for _ in 0..4 {
            deck.handle(InputEvent::Resize);
            deck.advance(Duration::from_millis(100));
        }
        assert_eq!(deck.resizes_settled(), 0);

        deck.advance(Duration::from_millis(150));
        assert_eq!(deck.resizes_settled(), 1);
    }

    #[test]
    fn pointer_events_set_transform() {
        let mut deck = deck();
        deck.handle(InputEvent::Pointer {
            element: "text-1".to_string(),
            phase: PointerPhase::Enter,
        });
        assert_eq!(
            deck.document().style_of("text-1", "transform"),
            Some("scale(1.05) rotate(-1deg)")
        );
    }

    #[test]
    fn transition_end_cleans_up_early() {
        let mut deck = deck();
        deck.go_to_page(2).unwrap();
        deck.advance(Duration::from_millis(300));
        assert!(deck.document().class_of("page2", FADE_IN));

        deck.handle(InputEvent::TransitionEnd {
            element: "page2".to_string(),
            property: "opacity".to_string(),
        });
        assert!(!deck.document().class_of("page2", FADE_IN));
    }

    #[test]
    fn snapshot_serializes() {
        let mut deck = deck();
        deck.go_to_page(3).unwrap();
        deck.finish_transition();

        let snapshot = deck.snapshot();
        assert_eq!(snapshot.current_page, 3);
        assert_eq!(snapshot.phase, TransitionPhase::Idle);

        let json = snapshot.to_json().unwrap();
        let back: DeckSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn snapshot_outside_deck_is_refused() {
        let json = r#"{"current_page":0,"total_pages":3,"phase":"Idle","history":{"visits":[]}}"#;
        assert!(serde_json::from_str::<DeckSnapshot>(json).is_err());

        let json = r#"{"current_page":2,"total_pages":3,"phase":"Idle","history":{"visits":[]}}"#;
        let snapshot: DeckSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.current_page, 2);
    }
}
