use std::cell::Cell;
use std::time::{Duration, Instant};

/// What the timer should do after a game step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Schedule {
    /// Run the next tick right away.
    Immediate,
    /// Run the next tick one interval from now.
    Next,
    /// Do not re-arm the timer.
    Stop,
}

/// Time source driving the scheduler.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Single re-armable timer for the game loop.
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
    due: Option<Instant>,
}

impl Scheduler {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            due: None,
        }
    }

    /// Re-arms or disarms the timer according to `schedule`.
    pub fn apply(&mut self, schedule: Schedule, now: Instant) {
        self.due = match schedule {
            Schedule::Immediate => Some(now),
            Schedule::Next => Some(now + self.interval),
            Schedule::Stop => None,
        };
    }

    /// Returns true and disarms the timer when the armed tick is due.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the armed tick, `None` while disarmed.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Clock, ManualClock, Schedule, Scheduler};

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn next_fires_after_one_interval() {
        let clock = ManualClock::new();
        let mut scheduler = Scheduler::new(INTERVAL);

        scheduler.apply(Schedule::Next, clock.now());
        clock.advance(Duration::from_millis(99));
        assert!(!scheduler.take_due(clock.now()));
        assert_eq!(
            scheduler.time_until_due(clock.now()),
            Some(Duration::from_millis(1))
        );

        clock.advance(Duration::from_millis(1));
        assert!(scheduler.take_due(clock.now()));
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn immediate_is_due_now() {
        let clock = ManualClock::new();
        let mut scheduler = Scheduler::new(INTERVAL);

        scheduler.apply(Schedule::Immediate, clock.now());

        assert_eq!(scheduler.time_until_due(clock.now()), Some(Duration::ZERO));
        assert!(scheduler.take_due(clock.now()));
    }

    #[test]
    fn stop_disarms_pending_tick() {
        let clock = ManualClock::new();
        let mut scheduler = Scheduler::new(INTERVAL);
        scheduler.apply(Schedule::Next, clock.now());

        scheduler.apply(Schedule::Stop, clock.now());
        clock.advance(INTERVAL * 5);

        assert!(!scheduler.take_due(clock.now()));
        assert_eq!(scheduler.time_until_due(clock.now()), None);
        assert_eq!(scheduler.interval(), INTERVAL);
    }
}
