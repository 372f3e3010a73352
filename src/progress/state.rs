//! Engine state - the single mutable value behind the storyboard.
//!
//! Fields are private. Only [`ProgressEngine`](super::ProgressEngine) changes
//! its own instance; everyone else reads copies.

/// Progress gained per tick.
pub const PROGRESS_STEP: u8 = 10;
/// Progress at which a step counts as finished.
pub const PROGRESS_MAX: u8 = 100;

/// Snapshot of the progression state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineState {
    active_index: usize,
    progress: u8,
    autoplay: bool,
    revealed_count: usize,
}

impl EngineState {
    /// State at mount and after reset.
    pub const INITIAL: Self = Self {
        active_index: 0,
        progress: 0,
        autoplay: false,
        revealed_count: 1,
    };

    /// Build an arbitrary snapshot, e.g. to preview a view.
    ///
    /// Progress is clamped to 100 and revealed count to at least 1.
    pub fn new(active_index: usize, progress: u8, autoplay: bool, revealed_count: usize) -> Self {
        Self {
            active_index,
            progress: progress.min(PROGRESS_MAX),
            autoplay,
            revealed_count: revealed_count.max(1),
        }
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Percentage of the active step, 0-100. Meaningless when terminal.
    #[inline]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    #[inline]
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    #[inline]
    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    /// `active_index == step_count`: every step has completed.
    #[inline]
    pub fn is_terminal(&self, step_count: usize) -> bool {
        self.active_index >= step_count
    }

    pub(super) fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    pub(super) fn bump_progress(&mut self) {
        self.progress = self.progress.saturating_add(PROGRESS_STEP).min(PROGRESS_MAX);
    }

    pub(super) fn advance(&mut self, step_count: usize) {
        self.progress = 0;
        self.active_index += 1;
        self.revealed_count = (self.revealed_count + 1).min(step_count.max(1));
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::INITIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        let state = EngineState::default();
        assert_eq!(state.active_index(), 0);
        assert_eq!(state.progress(), 0);
        assert!(!state.autoplay());
        assert_eq!(state.revealed_count(), 1);
    }

    #[test]
    fn test_new_clamps() {
        let state = EngineState::new(2, 250, true, 0);
        assert_eq!(state.progress(), 100);
        assert_eq!(state.revealed_count(), 1);
    }

    #[test]
    fn test_advance_resets_progress_and_caps_reveal() {
        let mut state = EngineState::new(0, 100, true, 2);
        state.advance(2);
        assert_eq!(state.active_index(), 1);
        assert_eq!(state.progress(), 0);
        assert_eq!(state.revealed_count(), 2);
    }

    #[test]
    fn test_terminal() {
        assert!(EngineState::INITIAL.is_terminal(0));
        assert!(!EngineState::INITIAL.is_terminal(1));
        assert!(EngineState::new(3, 0, false, 3).is_terminal(3));
    }
}
