//! Progress Engine - the step-progression state machine.
//!
//! Owns [`EngineState`] and a [`TickTimer`]. Three operations change state:
//! [`tick`](ProgressEngine::tick), [`toggle_autoplay`](ProgressEngine::toggle_autoplay)
//! and [`reset`](ProgressEngine::reset). Whenever the active step or the
//! autoplay flag changes, the timer is cancelled and re-armed with the
//! interval of the (new) active step's latency class.
//!
//! # Example
//!
//! ```
//! use spark_storyboard::catalog::Catalog;
//! use spark_storyboard::progress::ProgressEngine;
//! use spark_storyboard::steps::demo_steps;
//!
//! let steps = demo_steps();
//! let mut engine = ProgressEngine::new(&steps, &Catalog::builtin()).unwrap();
//!
//! engine.toggle_autoplay();
//! for _ in 0..10 {
//!     engine.tick();
//! }
//! assert_eq!(engine.state().progress(), 100);
//!
//! engine.tick();
//! assert_eq!(engine.state().active_index(), 1);
//! ```

mod state;
mod timer;

use std::time::Duration;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::steps::Step;

pub use state::{EngineState, PROGRESS_MAX, PROGRESS_STEP};
pub use timer::{Schedule, TickDriver, TickTimer, TimerToken};

// =============================================================================
// TICK OUTCOME
// =============================================================================

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Autoplay off or nothing to play.
    Idle,
    /// The token belonged to a cancelled timer.
    Stale,
    /// Active step progress grew.
    Progressed { progress: u8 },
    /// Moved on to the next step.
    Advanced { active_index: usize },
    /// Last step reached 100%; autoplay switched off.
    Finished,
}

// =============================================================================
// PROGRESS ENGINE
// =============================================================================

/// Drives the active step, its progress and autoplay.
#[derive(Debug)]
pub struct ProgressEngine {
    /// Tick period per step, resolved from the catalog at composition.
    intervals: Vec<Duration>,
    state: EngineState,
    timer: TickTimer,
}

impl ProgressEngine {
    /// Compose an engine for `steps`.
    ///
    /// Fails if any step's type is missing from `catalog`; nothing is looked
    /// up again after this point.
    pub fn new(steps: &[Step], catalog: &Catalog) -> Result<Self> {
        catalog.validate(steps)?;
        let intervals = steps
            .iter()
            .filter_map(|step| catalog.get(step.step_type))
            .map(|meta| meta.latency.interval())
            .collect();
        Ok(Self::from_intervals(intervals))
    }

    /// Engine over pre-resolved tick periods, one per step.
    pub fn from_intervals(intervals: Vec<Duration>) -> Self {
        Self {
            intervals,
            state: EngineState::INITIAL,
            timer: TickTimer::default(),
        }
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[inline]
    pub fn step_count(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal(self.step_count())
    }

    /// Tick period of the active step while autoplay is on.
    pub fn current_interval(&self) -> Option<Duration> {
        if !self.state.autoplay() {
            return None;
        }
        self.intervals.get(self.state.active_index()).copied()
    }

    /// The timer that should be running right now.
    pub fn schedule(&self) -> Option<Schedule> {
        self.timer.schedule()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Advance the state machine by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        let n = self.step_count();
        if !self.state.autoplay() || self.state.is_terminal(n) {
            return TickOutcome::Idle;
        }

        if self.state.progress() < PROGRESS_MAX {
            self.state.bump_progress();
            debug!(
                active_index = self.state.active_index(),
                progress = self.state.progress(),
                "tick"
            );
            TickOutcome::Progressed {
                progress: self.state.progress(),
            }
        } else if self.state.active_index() + 1 < n {
            self.state.advance(n);
            info!(
                active_index = self.state.active_index(),
                revealed = self.state.revealed_count(),
                "advanced to next step"
            );
            self.reschedule();
            TickOutcome::Advanced {
                active_index: self.state.active_index(),
            }
        } else {
            self.state.set_autoplay(false);
            info!(steps = n, "all steps complete, autoplay stopped");
            self.reschedule();
            TickOutcome::Finished
        }
    }

    /// Timer callback: tick only if `token` is the armed timer.
    pub fn fire(&mut self, token: TimerToken) -> TickOutcome {
        if !self.timer.is_current(token) {
            debug!(generation = token.generation(), "ignoring stale tick");
            return TickOutcome::Stale;
        }
        self.tick()
    }

    /// Flip autoplay. Nothing else changes.
    pub fn toggle_autoplay(&mut self) {
        let autoplay = !self.state.autoplay();
        self.state.set_autoplay(autoplay);
        info!(
            autoplay,
            active_index = self.state.active_index(),
            progress = self.state.progress(),
            "autoplay toggled"
        );
        self.reschedule();
    }

    /// Back to the initial state, unconditionally.
    pub fn reset(&mut self) {
        self.state = EngineState::INITIAL;
        self.timer.cancel();
        info!("storyboard reset");
    }

    /// Teardown: make sure nothing can tick any more.
    pub fn cancel_timer(&mut self) {
        self.timer.cancel();
    }

    fn reschedule(&mut self) {
        self.timer.cancel();
        if let Some(period) = self.current_interval() {
            let token = self.timer.arm(period);
            debug!(
                generation = token.generation(),
                period_ms = period.as_millis() as u64,
                "timer armed"
            );
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
