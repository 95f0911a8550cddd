use std::time::{Duration, Instant};

/// A periodic source of game ticks. The game starts it once, stops it on game over and resumes
/// it on restart; whoever drives the event loop asks it when the next tick is due.
pub trait Ticker {
    fn start(&mut self);
    fn stop(&mut self);
    /// Resumes a stopped ticker, counting a full interval from now.
    fn restart(&mut self);
    fn is_active(&self) -> bool;
}

/// Fires every `interval`, measured from the previous firing.
pub struct IntervalTicker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        IntervalTicker { interval, next_due: None }
    }

    /// How long until the next tick, or `None` while stopped.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Consumes a due tick and schedules the one after it. Returns `false` if nothing is due.
    ///
    /// If the loop fell behind by more than a whole interval the missed ticks are dropped rather
    /// than fired in a burst.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                let next = due + self.interval;
                self.next_due = Some(if next <= now { now + self.interval } else { next });
                true
            }
            _ => false,
        }
    }

    fn schedule_from(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }
}

impl Ticker for IntervalTicker {
    fn start(&mut self) {
        self.schedule_from(Instant::now());
    }

    fn stop(&mut self) {
        self.next_due = None;
    }

    fn restart(&mut self) {
        self.schedule_from(Instant::now());
    }

    fn is_active(&self) -> bool {
        self.next_due.is_some()
    }
}
