//! Process-wide theme cell.
//!
//! Holds the active [`ThemeMode`] and the store it persists to. The cell is
//! initialised once from the store, falling back to the system signal, and
//! the resolved value is written straight back. Later changes persist too;
//! a failing store only logs a warning and the in-memory mode still changes.
//!
//! # Example
//!
//! ```
//! use spark_storyboard::theme::{self, MemoryThemeStore, ThemeMode};
//!
//! theme::init_theme(Box::new(MemoryThemeStore::new()), ThemeMode::Dark);
//! assert_eq!(theme::active_mode(), ThemeMode::Dark);
//!
//! let stop = theme::subscribe(|mode| println!("theme is now {mode}"));
//! theme::toggle_theme();
//! stop();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{info, warn};

use super::store::{system_mode, ThemeStore, THEME_KEY};
use super::ThemeMode;

type Subscriber = Rc<dyn Fn(ThemeMode)>;

struct ThemeCell {
    mode: ThemeMode,
    store: Option<Box<dyn ThemeStore>>,
    initialized: bool,
}

impl ThemeCell {
    const fn new() -> Self {
        Self {
            mode: ThemeMode::Light,
            store: None,
            initialized: false,
        }
    }

    fn persist(&mut self) {
        let mode = self.mode;
        if let Some(store) = self.store.as_mut() {
            if let Err(err) = store.set(THEME_KEY, mode.as_str()) {
                warn!(error = ?err, %mode, "failed to persist theme");
            }
        }
    }
}

thread_local! {
    static THEME: RefCell<ThemeCell> = const { RefCell::new(ThemeCell::new()) };
    static SUBSCRIBERS: RefCell<Vec<(usize, Subscriber)>> = const { RefCell::new(Vec::new()) };
    static NEXT_ID: Cell<usize> = const { Cell::new(0) };
}

// =============================================================================
// INITIALIZATION
// =============================================================================

/// Resolve the initial mode from `store`, else `system`, and write it back.
pub fn init_theme(store: Box<dyn ThemeStore>, system: ThemeMode) -> ThemeMode {
    let saved = match store.get(THEME_KEY) {
        Ok(Some(value)) => {
            let parsed = ThemeMode::parse(&value);
            if parsed.is_none() {
                warn!(value = %value, "ignoring unknown saved theme");
            }
            parsed
        }
        Ok(None) => None,
        Err(err) => {
            warn!(error = ?err, "could not read saved theme");
            None
        }
    };
    let mode = saved.unwrap_or(system);

    THEME.with(|cell| {
        let mut cell = cell.borrow_mut();
        cell.mode = mode;
        cell.store = Some(store);
        cell.initialized = true;
        cell.persist();
    });
    info!(%mode, from_store = saved.is_some(), "theme initialised");
    mode
}

fn ensure_initialized() {
    let initialized = THEME.with(|cell| cell.borrow().initialized);
    if !initialized {
        THEME.with(|cell| {
            let mut cell = cell.borrow_mut();
            cell.mode = system_mode();
            cell.initialized = true;
        });
    }
}

// =============================================================================
// ACCESS
// =============================================================================

/// The current mode. Uses the system signal if nothing initialised the cell.
pub fn active_mode() -> ThemeMode {
    ensure_initialized();
    THEME.with(|cell| cell.borrow().mode)
}

/// Switch to `mode`, persist it and notify subscribers.
pub fn set_mode(mode: ThemeMode) {
    ensure_initialized();
    let changed = THEME.with(|cell| {
        let mut cell = cell.borrow_mut();
        if cell.mode == mode {
            return false;
        }
        cell.mode = mode;
        cell.persist();
        true
    });
    if changed {
        info!(%mode, "theme changed");
        notify(mode);
    }
}

/// Flip light/dark. Returns the new mode.
pub fn toggle_theme() -> ThemeMode {
    let next = active_mode().toggled();
    set_mode(next);
    next
}

// =============================================================================
// SUBSCRIPTIONS
// =============================================================================

/// Call `f` after every change. Returns the unsubscribe function.
pub fn subscribe<F>(f: F) -> Box<dyn FnOnce()>
where
    F: Fn(ThemeMode) + 'static,
{
    let id = NEXT_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });
    SUBSCRIBERS.with(|subs| subs.borrow_mut().push((id, Rc::new(f))));

    Box::new(move || {
        SUBSCRIBERS.with(|subs| subs.borrow_mut().retain(|(sub_id, _)| *sub_id != id));
    })
}

fn notify(mode: ThemeMode) {
    // Snapshot first so a subscriber may (un)subscribe or read the mode.
    let subscribers: Vec<Subscriber> =
        SUBSCRIBERS.with(|subs| subs.borrow().iter().map(|(_, f)| Rc::clone(f)).collect());
    for subscriber in subscribers {
        subscriber(mode);
    }
}

/// Drop the store and subscribers and forget the mode (for testing).
pub fn reset_theme_state() {
    THEME.with(|cell| *cell.borrow_mut() = ThemeCell::new());
    SUBSCRIBERS.with(|subs| subs.borrow_mut().clear());
}

// =============================================================================
// TESTS
// =============================================================================
