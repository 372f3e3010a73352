//! Mount API - terminal lifecycle and the event loop.
//!
//! [`mount`] takes over the terminal (raw mode, alternate screen, mouse
//! capture) and returns a [`MountHandle`]; dropping the handle gives the
//! terminal back, even when the loop exits with an error.
//!
//! # Example
//!
//! ```ignore
//! use spark_storyboard::pipeline::{mount, Storyboard};
//!
//! let mut storyboard = Storyboard::new(steps, catalog, policy)?;
//! let mut handle = mount::mount()?;
//!
//! // Option 1: Run blocking event loop
//! mount::run(&mut handle, &mut storyboard)?;
//!
//! // Option 2: Tick manually in your own loop
//! while mount::tick(&mut handle, &mut storyboard)? {
//!     // Your logic here
//! }
//!
//! handle.unmount();
//! ```

use std::cell::Cell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use crossterm::terminal;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::progress::TickDriver;
use crate::renderer::DiffRenderer;
use crate::theme;

use super::app::Storyboard;
use super::input::translate;

/// Poll timeout while something is moving (~60fps).
const FRAME: Duration = Duration::from_millis(16);
/// Poll timeout when the screen is still.
const IDLE: Duration = Duration::from_millis(250);

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by mount() that owns the terminal session.
///
/// Holds:
/// - The differential renderer writing to stdout
/// - The wall-clock side of the progress timer
/// - The theme subscription that forces a full redraw on theme change
pub struct MountHandle {
    renderer: DiffRenderer<Stdout>,
    driver: TickDriver,
    last_frame: Instant,
    theme_changed: Rc<Cell<bool>>,
    unsubscribe_theme: Option<Box<dyn FnOnce()>>,
    active: bool,
}

impl MountHandle {
    /// Restore the terminal and drop the theme subscription.
    pub fn unmount(mut self) {
        if let Err(err) = self.restore() {
            warn!(error = %err, "failed to restore terminal");
        }
    }

    fn restore(&mut self) -> io::Result<()> {
        if let Some(unsubscribe) = self.unsubscribe_theme.take() {
            unsubscribe();
        }
        self.driver.clear();
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let exit = self.renderer.exit_fullscreen();
        let raw = terminal::disable_raw_mode();
        info!("terminal restored");
        exit.and(raw)
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        // Best effort
        let _ = self.restore();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Take over the terminal.
pub fn mount() -> Result<MountHandle> {
    terminal::enable_raw_mode()?;
    let mut renderer = DiffRenderer::new(io::stdout());
    if let Err(err) = renderer.enter_fullscreen() {
        let _ = terminal::disable_raw_mode();
        return Err(err.into());
    }

    let theme_changed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&theme_changed);
    let unsubscribe = theme::subscribe(move |_| flag.set(true));

    info!("terminal mounted");
    Ok(MountHandle {
        renderer,
        driver: TickDriver::default(),
        last_frame: Instant::now(),
        theme_changed,
        unsubscribe_theme: Some(unsubscribe),
        active: true,
    })
}

// =============================================================================
// Event Loop
// =============================================================================

/// Run the event loop once.
///
/// Renders a frame, waits for input until the next timer deadline or
/// animation frame, handles at most one event, fires a due tick and steps
/// the animations.
///
/// Returns `Ok(false)` once the storyboard has been asked to quit.
pub fn tick(handle: &mut MountHandle, storyboard: &mut Storyboard) -> Result<bool> {
    if !storyboard.is_running() {
        return Ok(false);
    }

    let now = Instant::now();
    handle.driver.sync(storyboard.schedule(), now);

    if handle.theme_changed.replace(false) {
        handle.renderer.invalidate();
    }
    let frame = storyboard.compose();
    handle.renderer.render(&frame)?;

    let mut timeout = if storyboard.is_animating() { FRAME } else { IDLE };
    if let Some(until_due) = handle.driver.time_until_due(now) {
        timeout = timeout.min(until_due);
    }

    if event::poll(timeout)? {
        let event = event::read()?;
        if let Event::Resize(..) = event {
            handle.renderer.invalidate();
        }
        if let Some(command) = translate(&event, storyboard.hits()) {
            storyboard.dispatch(command)?;
        }
    }

    let now = Instant::now();
    handle.driver.sync(storyboard.schedule(), now);
    if let Some(token) = handle.driver.take_due(now) {
        let outcome = storyboard.fire_timer(token)?;
        debug!(?outcome, "timer fired");
        handle.driver.sync(storyboard.schedule(), now);
    }

    storyboard.advance(now.saturating_duration_since(handle.last_frame));
    handle.last_frame = now;

    Ok(storyboard.is_running())
}

/// Run the event loop until the storyboard quits.
pub fn run(handle: &mut MountHandle, storyboard: &mut Storyboard) -> Result<()> {
    let (width, height) = terminal::size()?;
    storyboard.resize(width, height);
    handle.last_frame = Instant::now();

    while tick(handle, storyboard)? {}
    Ok(())
}
