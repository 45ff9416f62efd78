//! Headless Deck Tour
//!
//! This example drives a three-page deck without a browser.
//!
//! Key concepts:
//! - In-memory document standing in for the DOM
//! - Virtual clock delivering the cross-fade timers
//! - Every input source funnelled through one controller
//! - Overlapping requests refused while a transition is in flight
//!
//! Run with: RUST_LOG=debug cargo run --example headless_tour

use pageflip::builder::DeckBuilder;
use pageflip::core::ACTIVE;
use pageflip::deck::Deck;
use pageflip::effects::{ManualScheduler, MemoryDocument};
use pageflip::input::InputEvent;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    println!("=== Headless Deck Tour ===\n");

    let mut deck = DeckBuilder::new()
        .document(MemoryDocument::deck_markup("page", 3))
        .scheduler(ManualScheduler::new())
        .build()
        .expect("default configuration is valid");
    deck.start(None);
    show(&deck, "After start");

    println!("\n1. API call: go to page 3");
    deck.go_to_page(3).expect("page 3 exists");
    deck.finish_transition();
    show(&deck, "   Now");

    println!("\n2. ArrowRight wraps to the first page");
    deck.handle(InputEvent::Key("ArrowRight".to_string()));
    deck.finish_transition();
    show(&deck, "   Now");

    println!("\n3. Swipe left by 80px");
    deck.handle(InputEvent::TouchStart { x: 300.0 });
    deck.handle(InputEvent::TouchEnd { x: 220.0 });
    deck.finish_transition();
    show(&deck, "   Now");

    println!("\n4. A second request while fading");
    deck.go_to_page(1).expect("page 1 exists");
    match deck.go_to_page(3) {
        Ok(()) => println!("   Unexpectedly accepted"),
        Err(error) => println!("   Refused: {error}"),
    }
    deck.finish_transition();
    show(&deck, "   Now");

    println!("\n5. Fragment #page9 is out of range");
    deck.handle(InputEvent::FragmentChanged("#page9".to_string()));
    deck.finish_transition();
    show(&deck, "   Now");

    println!("\nPath taken: {:?}", deck.history().path());
    match deck.snapshot().to_json() {
        Ok(json) => println!("Snapshot: {json}"),
        Err(error) => println!("Snapshot failed: {error}"),
    }

    println!("\n=== Tour Complete ===");
}

fn show(deck: &Deck<MemoryDocument, ManualScheduler>, label: &str) {
    let doc = deck.document();
    let active: Vec<&str> = doc
        .ids_with_class("page")
        .into_iter()
        .filter(|id| doc.class_of(id, ACTIVE))
        .collect();
    println!("{label}: page {} of {} (active: {active:?})", deck.current_page(), deck.total_pages());
}
