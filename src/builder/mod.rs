//! Builder API for ergonomic deck construction.

pub mod deck;
pub mod error;

pub use deck::DeckBuilder;
pub use error::BuildError;
