//! Reveal/Ordering Policy - which cards are visible, in what order.
//!
//! [`render_view`] is a pure function of the step list and an
//! [`EngineState`]. It is recomputed after every state change; nothing is
//! memoized here.
//!
//! Two policies exist:
//!
//! - [`RevealPolicy::StatusOrdered`] (default): active step on top, completed
//!   steps below it newest first. When everything is complete all steps show,
//!   newest first.
//! - [`RevealPolicy::ProgressiveReveal`]: the first `revealed_count` steps by
//!   index, reversed, so the most recently revealed card is on top.

use std::fmt;

use crate::catalog::StepType;
use crate::progress::{EngineState, PROGRESS_MAX};
use crate::steps::Step;

// =============================================================================
// TYPES
// =============================================================================

/// Per-card status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepStatus {
    Pending,
    Active,
    Completed,
}

/// Animation identity of a card: stable across status changes and reorders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub index: usize,
    pub title: String,
    pub step_type: StepType,
}

impl ItemKey {
    pub fn for_step(index: usize, step: &Step) -> Self {
        Self {
            index,
            title: step.title.clone(),
            step_type: step.step_type,
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.title, self.step_type, self.index)
    }
}

/// One card to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem<'a> {
    /// Position of the step in the step list.
    pub index: usize,
    pub step: &'a Step,
    pub status: StepStatus,
    pub display_progress: u8,
}

impl RenderItem<'_> {
    pub fn key(&self) -> ItemKey {
        ItemKey::for_step(self.index, self.step)
    }

    /// The card shows a check mark instead of a spinner.
    pub fn is_done(&self) -> bool {
        self.status == StepStatus::Completed || self.display_progress >= PROGRESS_MAX
    }
}

/// Presentation policy for [`render_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealPolicy {
    #[default]
    StatusOrdered,
    ProgressiveReveal,
}

// =============================================================================
// RENDER VIEW
// =============================================================================

/// Compute the ordered list of cards for `state`.
pub fn render_view<'a>(steps: &'a [Step], state: EngineState, policy: RevealPolicy) -> Vec<RenderItem<'a>> {
    match policy {
        RevealPolicy::StatusOrdered => status_ordered(steps, state),
        RevealPolicy::ProgressiveReveal => progressive_reveal(steps, state),
    }
}

fn completed(index: usize, step: &Step) -> RenderItem<'_> {
    RenderItem {
        index,
        step,
        status: StepStatus::Completed,
        display_progress: PROGRESS_MAX,
    }
}

fn status_ordered(steps: &[Step], state: EngineState) -> Vec<RenderItem<'_>> {
    let active = state.active_index();

    if state.is_terminal(steps.len()) {
        return steps
            .iter()
            .enumerate()
            .rev()
            .map(|(index, step)| completed(index, step))
            .collect();
    }

    let mut items = Vec::with_capacity(active + 1);
    items.push(RenderItem {
        index: active,
        step: &steps[active],
        status: StepStatus::Active,
        display_progress: state.progress(),
    });
    items.extend(
        steps[..active]
            .iter()
            .enumerate()
            .rev()
            .map(|(index, step)| completed(index, step)),
    );
    items
}

fn progressive_reveal(steps: &[Step], state: EngineState) -> Vec<RenderItem<'_>> {
    let active = state.active_index();
    let count = state.revealed_count().min(steps.len());

    steps[..count]
        .iter()
        .enumerate()
        .rev()
        .map(|(index, step)| {
            if index < active {
                completed(index, step)
            } else if index == active {
                RenderItem {
                    index,
                    step,
                    status: StepStatus::Active,
                    display_progress: state.progress(),
                }
            } else {
                RenderItem {
                    index,
                    step,
                    status: StepStatus::Pending,
                    display_progress: 0,
                }
            }
        })
        .collect()
}

// =============================================================================
// READOUTS
// =============================================================================

/// Header readout, e.g. `"Step 3 of 9"`.
pub fn status_line(state: EngineState, step_count: usize) -> String {
    format!(
        "Step {} of {}",
        (state.active_index() + 1).min(step_count),
        step_count
    )
}

/// Overall completion in percent for the top progress bar.
///
/// An empty sequence counts as complete.
pub fn completion_percent(state: EngineState, step_count: usize) -> f32 {
    if step_count == 0 {
        return 100.0;
    }
    let done = state.active_index() as f32 + f32::from(state.progress()) / 100.0;
    (done / step_count as f32).min(1.0) * 100.0
}

// =============================================================================
// TESTS
// =============================================================================
