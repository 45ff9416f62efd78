//! Resize debouncing.

use crate::effects::{Scheduler, Timer, TimerHandle};
use std::time::Duration;
use tracing::info;

/// Collapses bursts of resize notifications into one settle per quiet
/// period.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeDebouncer {
    quiet: Duration,
    pending: Option<TimerHandle>,
    settled: u64,
}

impl ResizeDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            settled: 0,
        }
    }

    /// Restart the quiet period.
    pub fn on_resize<S: Scheduler>(&mut self, timers: &mut S) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
        self.pending = Some(timers.schedule(self.quiet, Timer::ResizeSettled));
    }

    /// The quiet period elapsed.
    pub fn on_settled(&mut self) {
        self.pending = None;
        self.settled += 1;
        info!("window resized");
    }

    /// Number of quiet periods that elapsed so far.
    pub fn settled(&self) -> u64 {
        self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::ManualScheduler;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(debouncer: &mut ResizeDebouncer, timers: &mut ManualScheduler, until: u64) {
        while let Some(timer) = timers.pop_due(ms(until)) {
            assert_eq!(timer, Timer::ResizeSettled);
            debouncer.on_settled();
        }
        timers.set_now(ms(until));
    }

    #[test]
    fn burst_settles_once() {
        let mut timers = ManualScheduler::new();
        let mut debouncer = ResizeDebouncer::new(ms(250));

        for step in 0..5 {
            drain(&mut debouncer, &mut timers, step * 100);
            debouncer.on_resize(&mut timers);
        }
        assert_eq!(timers.pending(), 1);

        drain(&mut debouncer, &mut timers, 649);
        assert_eq!(debouncer.settled(), 0);
        drain(&mut debouncer, &mut timers, 650);
        assert_eq!(debouncer.settled(), 1);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn separated_resizes_settle_separately() {
        let mut timers = ManualScheduler::new();
        let mut debouncer = ResizeDebouncer::new(ms(250));

        debouncer.on_resize(&mut timers);
        drain(&mut debouncer, &mut timers, 300);
        debouncer.on_resize(&mut timers);
        drain(&mut debouncer, &mut timers, 600);

        assert_eq!(debouncer.settled(), 2);
    }
}
