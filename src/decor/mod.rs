//! Decorative effects.
//!
//! None of these share state with the page controller: the preloader warms
//! the image cache, text elements wobble under the pointer, the keyboard
//! hint disappears after the first interaction and resize bursts are
//! debounced into a single log line.

mod hint;
mod hover;
mod preload;
mod resize;

pub use hint::KeyboardHint;
pub use hover::{apply_pointer, PointerPhase};
pub use preload::preload_assets;
pub use resize::ResizeDebouncer;
