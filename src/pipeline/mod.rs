//! Pipeline - from terminal events to frames on screen.
//!
//! ```text
//! crossterm Event → input::translate → Storyboard::dispatch
//! TickDriver deadline → Storyboard::fire_timer → ProgressEngine
//! Storyboard::compose → FrameBuffer → DiffRenderer → terminal
//! ```

pub mod app;
pub mod input;
pub mod mount;

pub use app::{CardState, Storyboard};
pub use input::{translate, Command, HitMap, HoverTarget};
pub use mount::{mount, run, tick, MountHandle};
