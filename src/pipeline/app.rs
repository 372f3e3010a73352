//! Storyboard - the composed application.
//!
//! Ties the progress engine, the reveal policy, the animated card list,
//! hover tilt and the theme together. The event loop feeds it commands,
//! timer tokens and elapsed time, and asks it for frames.
//!
//! After every state change the view is recomputed from scratch and handed
//! to the animated list; the list skips the work when nothing changed.

use std::time::Duration;

use tracing::debug;

use crate::animate::{AnimatedList, Entry, Phase, Spring, Target};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::layout::stack_layout;
use crate::progress::{EngineState, ProgressEngine, Schedule, TickOutcome, TimerToken};
use crate::renderer::FrameBuffer;
use crate::steps::Step;
use crate::theme::{self, Palette};
use crate::types::{Attr, Rect};
use crate::view::{completion_percent, render_view, status_line, ItemKey, RenderItem, RevealPolicy, StepStatus};
use crate::widgets::{
    draw_footer, draw_header, Area, CardWidget, HeaderModel, HoverTilt, Paint, Tilted, Widget,
    HEADER_HEIGHT,
};

use super::input::{Command, HitMap};

const MAX_CARD_WIDTH: u16 = 64;
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);
const EMPTY_MESSAGE: &str = "No steps to display";

/// What the animated list tracks per card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardState {
    pub index: usize,
    pub status: StepStatus,
    pub progress: u8,
}

impl CardState {
    fn from_item(item: &RenderItem<'_>) -> Self {
        Self {
            index: item.index,
            status: item.status,
            progress: item.display_progress,
        }
    }
}

/// The whole storyboard screen.
pub struct Storyboard {
    steps: Vec<Step>,
    catalog: Catalog,
    policy: RevealPolicy,
    engine: ProgressEngine,
    cards: AnimatedList<ItemKey, CardState>,
    overall: Spring,
    hover: HoverTilt<ItemKey>,
    spinner_frame: usize,
    spinner_elapsed: Duration,
    viewport: (u16, u16),
    hits: HitMap,
    running: bool,
}

impl Storyboard {
    /// Compose a storyboard. Fails if a step type is missing from `catalog`.
    pub fn new(steps: Vec<Step>, catalog: Catalog, policy: RevealPolicy) -> Result<Self> {
        let engine = ProgressEngine::new(&steps, &catalog)?;
        let mut storyboard = Self {
            steps,
            catalog,
            policy,
            engine,
            cards: AnimatedList::new(),
            overall: Spring::at(0.0),
            hover: HoverTilt::new(),
            spinner_frame: 0,
            spinner_elapsed: Duration::ZERO,
            viewport: (80, 24),
            hits: HitMap::new(),
            running: true,
        };
        storyboard.sync()?;
        Ok(storyboard)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn policy(&self) -> RevealPolicy {
        self.policy
    }

    /// The timer the event loop should be running.
    pub fn schedule(&self) -> Option<Schedule> {
        self.engine.schedule()
    }

    pub fn cards(&self) -> &[Entry<ItemKey, CardState>] {
        self.cards.entries()
    }

    /// Width of the overall completion bar, 0.0..=1.0, as currently animated.
    pub fn overall_progress(&self) -> f32 {
        self.overall.value()
    }

    pub fn hits(&self) -> &HitMap {
        &self.hits
    }

    pub fn hovered(&self) -> Option<&ItemKey> {
        self.hover.hovered()
    }

    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Something on screen is still moving and needs frames.
    pub fn is_animating(&self) -> bool {
        self.is_spinning() || self.cards.is_animating() || !self.overall.is_settled()
    }

    /// The spinner only turns while autoplay runs an unfinished card.
    fn is_spinning(&self) -> bool {
        self.engine.state().autoplay()
            && self
                .cards
                .entries()
                .iter()
                .any(|entry| entry.phase() != Phase::Exiting && !self.is_done(entry.item()))
    }

    fn is_done(&self, card: &CardState) -> bool {
        card.status == StepStatus::Completed || card.progress >= 100
    }

    // =========================================================================
    // Input
    // =========================================================================

    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        debug!(?command, "dispatch");
        match command {
            Command::TogglePlay => {
                self.engine.toggle_autoplay();
                self.sync()
            }
            Command::Reset => {
                self.engine.reset();
                self.sync()
            }
            Command::ToggleTheme => {
                theme::toggle_theme();
                Ok(())
            }
            Command::Quit => {
                self.engine.cancel_timer();
                self.running = false;
                Ok(())
            }
            Command::Hover(Some(target)) => {
                self.hover.pointer_move(target.key, target.rect, target.x, target.y);
                Ok(())
            }
            Command::Hover(None) => {
                self.hover.pointer_leave();
                Ok(())
            }
            Command::Resize(width, height) => {
                self.resize(width, height);
                Ok(())
            }
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    /// Timer callback from the event loop.
    pub fn fire_timer(&mut self, token: TimerToken) -> Result<TickOutcome> {
        let outcome = self.engine.fire(token);
        if !matches!(outcome, TickOutcome::Idle | TickOutcome::Stale) {
            self.sync()?;
        }
        Ok(outcome)
    }

    /// Step all animations by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.cards.advance(dt);
        self.overall.step(dt);

        if !self.is_spinning() {
            self.spinner_elapsed = Duration::ZERO;
            return;
        }
        self.spinner_elapsed += dt;
        while self.spinner_elapsed >= SPINNER_INTERVAL {
            self.spinner_elapsed -= SPINNER_INTERVAL;
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// Recompute the view and retarget the animations.
    fn sync(&mut self) -> Result<()> {
        let state = self.engine.state();
        let items = render_view(&self.steps, state, self.policy);
        let heights: Vec<u16> = items
            .iter()
            .map(|item| CardWidget::height_for(item.step.payload.len()))
            .collect();
        let slots = stack_layout(self.card_width(), &heights)?;

        let targets = items
            .iter()
            .zip(&slots)
            .map(|(item, slot)| Target::new(item.key(), CardState::from_item(item), f32::from(slot.y)))
            .collect();
        self.cards.reconcile(targets);

        self.overall
            .set_target(completion_percent(state, self.steps.len()) / 100.0);
        Ok(())
    }

    // =========================================================================
    // Composition
    // =========================================================================

    fn card_width(&self) -> u16 {
        self.viewport.0.saturating_sub(4).min(MAX_CARD_WIDTH)
    }

    fn card_region(&self) -> Rect {
        let (width, height) = self.viewport;
        Rect::new(0, HEADER_HEIGHT, width, height.saturating_sub(HEADER_HEIGHT + 1))
    }

    /// Draw the current frame and remember its hit regions.
    pub fn compose(&mut self) -> FrameBuffer {
        let (width, height) = self.viewport;
        let palette = Palette::for_mode(theme::active_mode());
        let mut buffer = FrameBuffer::filled(width, height, palette.background);
        let mut hits = HitMap::new();

        let state = self.engine.state();
        let header = HeaderModel {
            status: status_line(state, self.steps.len()),
            autoplay: state.autoplay(),
            mode: palette.mode,
            completion: self.overall.value(),
        };
        for (rect, control) in draw_header(&mut buffer, &header, &palette) {
            hits.add_control(rect, control);
        }
        draw_footer(&mut buffer, &palette);

        let region = self.card_region();
        if self.steps.is_empty() {
            let x = (i32::from(width) - EMPTY_MESSAGE.chars().count() as i32) / 2;
            let y = i32::from(region.y) + 1;
            buffer.print(x.max(0), y, EMPTY_MESSAGE, palette.text_muted, Attr::ITALIC, &region);
        } else {
            self.draw_cards(&mut buffer, &palette, region, &mut hits);
        }

        self.hits = hits;
        buffer
    }

    fn draw_cards(&self, buffer: &mut FrameBuffer, palette: &Palette, region: Rect, hits: &mut HitMap) {
        let card_width = self.card_width();
        let x = i32::from((self.viewport.0.saturating_sub(card_width)) / 2);
        let top = i32::from(region.y) + 1;
        let paint = Paint::new(palette, region);

        // Last entry first so the top of the stack ends up on top.
        for entry in self.cards.entries().iter().rev() {
            let card = entry.item();
            let Some(step) = self.steps.get(card.index) else {
                continue;
            };
            let Some(meta) = self.catalog.get(step.step_type) else {
                continue;
            };
            let item = RenderItem {
                index: card.index,
                step,
                status: card.status,
                display_progress: card.progress,
            };

            let pose = entry.pose();
            let widget = CardWidget::new(&item, meta)
                .scaled(pose.scale)
                .spinner(self.spinner_frame);
            let tilted = Tilted::new(widget, self.hover.rotation_for(entry.key()));
            let area = Area::new(x, top + pose.y.round() as i32, card_width, tilted.height());
            tilted.draw(buffer, area, &paint.with_opacity(pose.opacity));

            if entry.phase() != Phase::Exiting {
                if let Some(rect) = area.visible_in(&region) {
                    hits.add_card(rect, entry.key().clone());
                }
            }
        }
    }
}
