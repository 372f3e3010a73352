//! Tick timer - generation-guarded scheduling for the progress engine.
//!
//! The engine never sleeps. It only records *what* should tick and how
//! often ([`Schedule`]); the event loop turns that into deadlines with a
//! [`TickDriver`]. Every cancel bumps the generation, so a token that was
//! handed out before a cancel can never tick again.
//!
//! # Pattern
//!
//! ```
//! use std::time::{Duration, Instant};
//! use spark_storyboard::progress::{TickDriver, TickTimer};
//!
//! let mut timer = TickTimer::default();
//! let token = timer.arm(Duration::from_millis(200));
//!
//! let mut driver = TickDriver::default();
//! let start = Instant::now();
//! driver.sync(timer.schedule(), start);
//! assert_eq!(driver.take_due(start + Duration::from_millis(200)), Some(token));
//!
//! timer.cancel();
//! assert!(!timer.is_current(token));
//! ```

use std::time::{Duration, Instant};

// =============================================================================
// TOKENS
// =============================================================================

/// Identifies one armed timer. Stale tokens are ignored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// The timer the engine currently wants running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub token: TimerToken,
    pub period: Duration,
}

// =============================================================================
// TICK TIMER
// =============================================================================

/// A single repeating timer slot with a generation counter.
#[derive(Debug, Default)]
pub struct TickTimer {
    generation: u64,
    armed: Option<Duration>,
}

impl TickTimer {
    /// Cancel whatever is armed and arm a new repeating timer.
    pub fn arm(&mut self, period: Duration) -> TimerToken {
        self.cancel();
        self.armed = Some(period);
        TimerToken(self.generation)
    }

    /// Disarm. Any token handed out so far becomes stale.
    pub fn cancel(&mut self) {
        self.armed = None;
        self.generation += 1;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn is_current(&self, token: TimerToken) -> bool {
        self.armed.is_some() && token.0 == self.generation
    }

    pub fn schedule(&self) -> Option<Schedule> {
        self.armed.map(|period| Schedule {
            token: TimerToken(self.generation),
            period,
        })
    }
}

// =============================================================================
// TICK DRIVER
// =============================================================================

/// Wall-clock side of the timer, owned by the event loop.
#[derive(Debug, Default)]
pub struct TickDriver {
    pending: Option<(Schedule, Instant)>,
}

impl TickDriver {
    /// Follow the engine's schedule.
    ///
    /// An unchanged schedule keeps its deadline (the timer repeats); a new
    /// one is armed a full period from `now`; none clears the deadline.
    pub fn sync(&mut self, schedule: Option<Schedule>, now: Instant) {
        match (schedule, self.pending) {
            (None, _) => self.pending = None,
            (Some(next), Some((current, _))) if next == current => {}
            (Some(next), _) => self.pending = Some((next, now + next.period)),
        }
    }

    /// Next deadline, if a timer is pending.
    pub fn due(&self) -> Option<Instant> {
        self.pending.map(|(_, due)| due)
    }

    /// How long the loop may block before the next tick.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.due().map(|due| due.saturating_duration_since(now))
    }

    /// Take the token if its deadline has passed and re-arm one period later.
    ///
    /// Missed periods are not replayed in a burst: a deadline already behind
    /// `now` after re-arming is pushed to `now + period`.
    pub fn take_due(&mut self, now: Instant) -> Option<TimerToken> {
        let (schedule, due) = self.pending?;
        if due > now {
            return None;
        }
        let mut next = due + schedule.period;
        if next <= now {
            next = now + schedule.period;
        }
        self.pending = Some((schedule, next));
        Some(schedule.token)
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: Duration = Duration::from_millis(200);
    const SLOW: Duration = Duration::from_millis(400);

    #[test]
    fn test_arm_cancels_previous() {
        let mut timer = TickTimer::default();
        let first = timer.arm(FAST);
        let second = timer.arm(SLOW);

        assert!(!timer.is_current(first));
        assert!(timer.is_current(second));
        assert_eq!(timer.schedule().unwrap().period, SLOW);
    }

    #[test]
    fn test_cancel_makes_token_stale() {
        let mut timer = TickTimer::default();
        let token = timer.arm(FAST);
        timer.cancel();

        assert!(!timer.is_armed());
        assert!(!timer.is_current(token));
        assert_eq!(timer.schedule(), None);
    }

    #[test]
    fn test_driver_repeats_same_schedule() {
        let mut timer = TickTimer::default();
        let token = timer.arm(FAST);
        let mut driver = TickDriver::default();
        let t0 = Instant::now();

        driver.sync(timer.schedule(), t0);
        assert_eq!(driver.take_due(t0 + Duration::from_millis(199)), None);
        assert_eq!(driver.take_due(t0 + FAST), Some(token));

        // Same schedule again: deadline is kept, not restarted.
        driver.sync(timer.schedule(), t0 + Duration::from_millis(250));
        assert_eq!(driver.due(), Some(t0 + FAST * 2));
    }

    #[test]
    fn test_driver_rearms_on_new_schedule() {
        let mut timer = TickTimer::default();
        timer.arm(FAST);
        let mut driver = TickDriver::default();
        let t0 = Instant::now();
        driver.sync(timer.schedule(), t0);

        let later = t0 + Duration::from_millis(50);
        let token = timer.arm(SLOW);
        driver.sync(timer.schedule(), later);

        assert_eq!(driver.due(), Some(later + SLOW));
        assert_eq!(driver.take_due(later + SLOW), Some(token));
    }

    #[test]
    fn test_driver_clears_when_cancelled() {
        let mut timer = TickTimer::default();
        timer.arm(FAST);
        let mut driver = TickDriver::default();
        let t0 = Instant::now();
        driver.sync(timer.schedule(), t0);

        timer.cancel();
        driver.sync(timer.schedule(), t0);
        assert_eq!(driver.due(), None);
        assert_eq!(driver.take_due(t0 + SLOW), None);
    }

    #[test]
    fn test_driver_does_not_burst_after_stall() {
        let mut timer = TickTimer::default();
        let token = timer.arm(FAST);
        let mut driver = TickDriver::default();
        let t0 = Instant::now();
        driver.sync(timer.schedule(), t0);

        let stalled = t0 + Duration::from_secs(2);
        assert_eq!(driver.take_due(stalled), Some(token));
        assert_eq!(driver.take_due(stalled), None);
        assert_eq!(driver.due(), Some(stalled + FAST));
    }
}
