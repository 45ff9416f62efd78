//! Pageflip: a cross-fading slide deck controller
//!
//! Pageflip drives a small, fixed set of full-screen pages. Navigation
//! buttons, arrow and digit keys, swipes and URL fragments all end up as
//! requests to one page controller, which validates them and runs a
//! two-step cross-fade by toggling marker classes on page elements.
//!
//! # Core Concepts
//!
//! - **State**: the page index and transition phase (`core`)
//! - **Shell**: document and timer access behind traits (`effects`)
//! - **Adapters**: host events turned into navigation requests (`input`)
//! - **Decorations**: preloading, hover effects, hint and resize handling (`decor`)
//!
//! The browser binding lives behind the `web` feature. Everything else runs
//! headless against [`effects::MemoryDocument`] and
//! [`effects::ManualScheduler`].
//!
//! # Example
//!
//! ```rust
//! use pageflip::builder::DeckBuilder;
//! use pageflip::effects::{ManualScheduler, MemoryDocument};
//! use pageflip::input::InputEvent;
//!
//! let mut deck = DeckBuilder::new()
//!     .document(MemoryDocument::deck_markup("page", 3))
//!     .scheduler(ManualScheduler::new())
//!     .build()
//!     .unwrap();
//! deck.start(None);
//!
//! deck.handle(InputEvent::Key("ArrowLeft".to_string()));
//! deck.finish_transition();
//!
//! assert_eq!(deck.current_page(), 3);
//! assert!(deck.document().class_of("page3", "active"));
//! assert!(!deck.document().class_of("page1", "active"));
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod deck;
pub mod decor;
pub mod effects;
pub mod input;

#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used types
pub use builder::{BuildError, DeckBuilder};
pub use config::{ConfigError, DeckConfig};
pub use core::{Guard, NavigationSource, PresentationState, TransitionPhase};
pub use deck::{Deck, DeckSnapshot};
pub use effects::{Document, NavigationError, PageController, Scheduler};
