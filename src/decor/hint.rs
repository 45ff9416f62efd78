//! One-shot dismissal of the keyboard hint.

use crate::core::KEYBOARD_HINT;
use crate::effects::{Document, Scheduler, Timer};
use std::time::Duration;
use tracing::debug;

/// Fades and then hides the keyboard hint after the first interaction.
///
/// The latch closes on the first click or key press whether or not a hint
/// element exists, so the dismissal is scheduled at most once per deck.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardHint {
    fade_after: Duration,
    hide_after: Duration,
    interacted: bool,
}

impl KeyboardHint {
    /// `fade_after` runs from the first interaction to the fade,
    /// `hide_after` from the fade to hiding the element.
    pub fn new(fade_after: Duration, hide_after: Duration) -> Self {
        Self {
            fade_after,
            hide_after,
            interacted: false,
        }
    }

    pub fn has_interacted(&self) -> bool {
        self.interacted
    }

    /// Note a click or key press.
    pub fn notice<D, S>(&mut self, doc: &D, timers: &mut S)
    where
        D: Document,
        S: Scheduler,
    {
        if self.interacted {
            return;
        }
        self.interacted = true;

        if doc.elements_with_class(KEYBOARD_HINT).is_empty() {
            debug!("no keyboard hint to dismiss");
            return;
        }
        timers.schedule(self.fade_after, Timer::HintFade);
    }

    /// Deliver a hint timer. Returns `false` for timers the hint does not
    /// own.
    pub fn on_timer<D, S>(&self, timer: Timer, doc: &mut D, timers: &mut S) -> bool
    where
        D: Document,
        S: Scheduler,
    {
        match timer {
            Timer::HintFade => {
                for hint in doc.elements_with_class(KEYBOARD_HINT) {
                    doc.set_style(&hint, "opacity", "0");
                }
                timers.schedule(self.hide_after, Timer::HintHide);
                true
            }
            Timer::HintHide => {
                for hint in doc.elements_with_class(KEYBOARD_HINT) {
                    doc.set_style(&hint, "display", "none");
                }
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{ManualScheduler, MemoryDocument};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn first_interaction_schedules_fade_once() {
        let doc = MemoryDocument::new().with_element("hint", &[KEYBOARD_HINT]);
        let mut timers = ManualScheduler::new();
        let mut hint = KeyboardHint::new(ms(5000), ms(300));

        hint.notice(&doc, &mut timers);
        hint.notice(&doc, &mut timers);

        assert!(hint.has_interacted());
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn fade_then_hide() {
        let mut doc = MemoryDocument::new().with_element("hint", &[KEYBOARD_HINT]);
        let mut timers = ManualScheduler::new();
        let mut hint = KeyboardHint::new(ms(5000), ms(300));
        hint.notice(&doc, &mut timers);

        assert_eq!(timers.pop_due(ms(4999)), None);
        let fade = timers.pop_due(ms(5000)).unwrap();
        assert!(hint.on_timer(fade, &mut doc, &mut timers));
        assert_eq!(doc.style_of("hint", "opacity"), Some("0"));
        assert_eq!(doc.style_of("hint", "display"), None);

        let hide = timers.pop_due(ms(5300)).unwrap();
        assert!(hint.on_timer(hide, &mut doc, &mut timers));
        assert_eq!(doc.style_of("hint", "display"), Some("none"));
    }

    #[test]
    fn missing_hint_still_latches() {
        let doc = MemoryDocument::new();
        let mut timers = ManualScheduler::new();
        let mut hint = KeyboardHint::new(ms(5000), ms(300));

        hint.notice(&doc, &mut timers);
        assert!(hint.has_interacted());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn foreign_timers_are_declined() {
        let mut doc = MemoryDocument::new();
        let mut timers = ManualScheduler::new();
        let hint = KeyboardHint::new(ms(1), ms(1));

        assert!(!hint.on_timer(Timer::ResizeSettled, &mut doc, &mut timers));
    }
}
