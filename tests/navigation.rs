//! End-to-end navigation scenarios against the in-memory document.

use pageflip::builder::DeckBuilder;
use pageflip::core::{NavigationSource, TransitionPhase, ACTIVE, FADE_IN, FADE_OUT};
use pageflip::deck::Deck;
use pageflip::effects::{ManualScheduler, MemoryDocument, NavigationError};
use pageflip::input::InputEvent;
use std::time::Duration;

fn deck() -> Deck<MemoryDocument, ManualScheduler> {
    let mut deck = DeckBuilder::new()
        .document(MemoryDocument::deck_markup("page", 3))
        .scheduler(ManualScheduler::new())
        .build()
        .unwrap();
    deck.start(None);
    deck
}

fn active_pages(deck: &Deck<MemoryDocument, ManualScheduler>) -> Vec<String> {
    let doc = deck.document();
    doc.ids_with_class("page")
        .into_iter()
        .filter(|id| doc.class_of(id, ACTIVE))
        .map(str::to_string)
        .collect()
}

#[test]
fn go_to_page_three_from_page_one() {
    let mut deck = deck();

    deck.go_to_page(3).unwrap();
    deck.finish_transition();

    let doc = deck.document();
    assert_eq!(deck.current_page(), 3);
    assert!(doc.class_of("page3", ACTIVE));
    assert!(!doc.class_of("page1", ACTIVE));
    assert!(doc.class_of("nav-3", ACTIVE));
    assert!(!doc.class_of("nav-1", ACTIVE));
    assert!(!doc.class_of("nav-2", ACTIVE));
}

#[test]
fn cross_fade_runs_in_two_steps() {
    let mut deck = deck();
    deck.go_to_page(2).unwrap();

    assert!(deck.document().class_of("page1", FADE_OUT));
    assert!(deck.document().class_of("page1", ACTIVE));
    assert_eq!(deck.current_page(), 1);
    assert_eq!(deck.state().phase().name(), "FadingOut");

    deck.advance(Duration::from_millis(299));
    assert_eq!(deck.current_page(), 1);

    deck.advance(Duration::from_millis(1));
    assert_eq!(deck.current_page(), 2);
    assert!(!deck.document().class_of("page1", ACTIVE));
    assert!(!deck.document().class_of("page1", FADE_OUT));
    assert!(deck.document().class_of("page2", ACTIVE));
    assert!(deck.document().class_of("page2", FADE_IN));
    assert!(deck.is_transitioning());

    deck.advance(Duration::from_millis(400));
    assert!(!deck.document().class_of("page2", FADE_IN));
    assert_eq!(deck.state().phase(), TransitionPhase::Idle);
}

#[test]
fn next_wraps_from_last_page() {
    let mut deck = deck();
    deck.go_to_page(3).unwrap();
    deck.finish_transition();

    deck.next_page().unwrap();
    deck.finish_transition();
    assert_eq!(deck.current_page(), 1);

    deck.prev_page().unwrap();
    deck.finish_transition();
    assert_eq!(deck.current_page(), 3);
}

#[test]
fn fragment_changes_drive_navigation() {
    let mut deck = deck();

    deck.handle(InputEvent::FragmentChanged("#page2".to_string()));
    deck.finish_transition();
    assert_eq!(deck.current_page(), 2);

    deck.handle(InputEvent::FragmentChanged("#page9".to_string()));
    deck.finish_transition();
    assert_eq!(deck.current_page(), 2);

    deck.handle(InputEvent::FragmentChanged("#about".to_string()));
    assert!(!deck.is_transitioning());
}

#[test]
fn overlapping_requests_are_refused() {
    let mut deck = deck();
    deck.go_to_page(2).unwrap();

    assert_eq!(
        deck.go_to_page(3),
        Err(NavigationError::TransitionInFlight { to: 2 })
    );

    deck.advance(Duration::from_millis(300));
    assert_eq!(
        deck.next_page(),
        Err(NavigationError::TransitionInFlight { to: 2 })
    );

    deck.advance(Duration::from_millis(400));
    assert_eq!(active_pages(&deck), vec!["page2"]);
    deck.next_page().unwrap();
    deck.finish_transition();
    assert_eq!(deck.current_page(), 3);
}

#[test]
fn keyboard_and_swipe_share_one_controller() {
    let mut deck = deck();

    deck.handle(InputEvent::Key("ArrowDown".to_string()));
    deck.finish_transition();
    deck.handle(InputEvent::TouchStart { x: 400.0 });
    deck.handle(InputEvent::TouchEnd { x: 349.0 });
    deck.finish_transition();

    assert_eq!(deck.current_page(), 3);
    let sources: Vec<NavigationSource> = deck.history().visits().iter().map(|v| v.source).collect();
    assert_eq!(
        sources,
        vec![NavigationSource::Keyboard, NavigationSource::Swipe]
    );
    assert_eq!(deck.history().path(), vec![1, 2, 3]);
}

#[test]
fn missing_target_page_aborts_without_side_effects() {
    let mut deck = deck();
    deck.document_mut().remove_element("page3");

    assert_eq!(
        deck.go_to_page(3),
        Err(NavigationError::MissingElement("page3".to_string()))
    );
    assert!(!deck.document().class_of("page1", FADE_OUT));
    assert!(!deck.is_transitioning());
    assert_eq!(deck.current_page(), 1);
}

#[test]
fn guards_block_requests() {
    let mut deck = DeckBuilder::new()
        .document(MemoryDocument::deck_markup("page", 3))
        .scheduler(ManualScheduler::new())
        .when("forward-only", |state, target| target > state.current())
        .build()
        .unwrap();
    deck.start(None);

    deck.go_to_page(2).unwrap();
    deck.finish_transition();

    assert_eq!(
        deck.prev_page(),
        Err(NavigationError::Blocked {
            guard: "forward-only".to_string(),
            target: 1,
        })
    );
    assert_eq!(deck.current_page(), 2);
}

#[test]
fn configured_deck_uses_its_own_prefixes() {
    let mut deck = DeckBuilder::new()
        .config_toml(
            r##"
            total_pages = 4
            page_id_prefix = "slide"
            fragment_prefix = "#s"
            asset_urls = []
            "##,
        )
        .unwrap()
        .document(MemoryDocument::deck_markup("slide", 4))
        .scheduler(ManualScheduler::new())
        .build()
        .unwrap();
    deck.start(Some("#s4"));
    deck.finish_transition();

    assert_eq!(deck.current_page(), 4);
    assert!(deck.document().class_of("slide4", ACTIVE));
    assert!(deck.document().preloaded().is_empty());
}
