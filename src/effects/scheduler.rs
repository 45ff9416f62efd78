//! Delayed callbacks.
//!
//! The deck never sleeps. It asks a [`Scheduler`] to deliver a [`Timer`]
//! after a delay, and the host hands the timer back through
//! `Deck::fire` when it elapses.

use std::time::Duration;

/// A delayed continuation the deck is waiting for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Timer {
    /// Fade-out of transition `transition` is over; commit the new page.
    CommitPage { transition: u64 },

    /// Fade-in of transition `transition` is over; strip the fade marker.
    ClearFadeIn { transition: u64 },

    /// No resize for the debounce interval.
    ResizeSettled,

    /// Time to fade the keyboard hint out.
    HintFade,

    /// Fade of the keyboard hint is over; hide it.
    HintHide,
}

/// Handle of a scheduled timer, used to cancel it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TimerHandle(pub u64);

/// Source of delayed callbacks.
pub trait Scheduler {
    /// Deliver `timer` once `delay` has passed.
    fn schedule(&mut self, delay: Duration, timer: Timer) -> TimerHandle;

    /// Forget a scheduled timer. Unknown or already delivered handles are
    /// ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Clone, Debug)]
struct Pending {
    due: Duration,
    handle: TimerHandle,
    timer: Timer,
}

/// Virtual clock that delivers timers only when told to.
///
/// Time starts at zero and moves forward through [`ManualScheduler::pop_due`]
/// and [`ManualScheduler::set_now`]. Timers due at the same instant are
/// delivered in the order they were scheduled.
///
/// # Example
///
/// ```rust
/// use pageflip::effects::{ManualScheduler, Scheduler, Timer};
/// use std::time::Duration;
///
/// let mut clock = ManualScheduler::new();
/// clock.schedule(Duration::from_millis(250), Timer::ResizeSettled);
///
/// assert_eq!(clock.pop_due(Duration::from_millis(100)), None);
/// assert_eq!(clock.pop_due(Duration::from_millis(300)), Some(Timer::ResizeSettled));
/// assert_eq!(clock.now(), Duration::from_millis(250));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_handle: u64,
    pending: Vec<Pending>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers waiting to be delivered.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<Timer> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.handle.0))
            .map(|(i, _)| i)?;
        let pending = self.pending.remove(index);
        self.now = self.now.max(pending.due);
        Some(pending.timer)
    }

    /// Move the clock forward to `now`. The clock never goes backwards.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, timer: Timer) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.pending.push(Pending {
            due: self.now + delay,
            handle,
            timer,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|p| p.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn timers_are_delivered_in_due_order() {
        let mut clock = ManualScheduler::new();
        clock.schedule(ms(400), Timer::HintHide);
        clock.schedule(ms(300), Timer::HintFade);

        assert_eq!(clock.pop_due(ms(1000)), Some(Timer::HintFade));
        assert_eq!(clock.now(), ms(300));
        assert_eq!(clock.pop_due(ms(1000)), Some(Timer::HintHide));
        assert_eq!(clock.pop_due(ms(1000)), None);
    }

    #[test]
    fn equal_due_times_keep_schedule_order() {
        let mut clock = ManualScheduler::new();
        clock.schedule(ms(10), Timer::ResizeSettled);
        clock.schedule(ms(10), Timer::HintFade);

        assert_eq!(clock.pop_due(ms(10)), Some(Timer::ResizeSettled));
        assert_eq!(clock.pop_due(ms(10)), Some(Timer::HintFade));
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut clock = ManualScheduler::new();
        clock.set_now(ms(100));
        clock.schedule(ms(50), Timer::ResizeSettled);

        assert_eq!(clock.pop_due(ms(149)), None);
        assert_eq!(clock.pop_due(ms(150)), Some(Timer::ResizeSettled));
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut clock = ManualScheduler::new();
        let handle = clock.schedule(ms(10), Timer::ResizeSettled);
        clock.cancel(handle);
        clock.cancel(TimerHandle(99));

        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.pop_due(ms(100)), None);
    }

    #[test]
    fn clock_never_goes_backwards() {
        let mut clock = ManualScheduler::new();
        clock.set_now(ms(50));
        clock.set_now(ms(10));
        assert_eq!(clock.now(), ms(50));
    }
}
