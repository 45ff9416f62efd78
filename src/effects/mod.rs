//! The imperative shell around the pure deck state.
//!
//! This module owns everything that touches the outside world:
//!
//! - **Document**: element lookup and class-list mutation behind a trait
//! - **Scheduler**: delayed callbacks behind a trait
//! - **PageController**: the transition sequence that drives both
//!
//! `MemoryDocument` and `ManualScheduler` implement the traits without a
//! browser, for headless decks and tests.

mod controller;
mod document;
mod error;
mod memory;
mod scheduler;

pub use controller::{PageController, TransitionTiming};
pub use document::Document;
pub use error::NavigationError;
pub use memory::MemoryDocument;
pub use scheduler::{ManualScheduler, Scheduler, Timer, TimerHandle};
