//! # spark-storyboard
//!
//! Animated processing storyboard for the terminal.
//!
//! A fixed sequence of steps plays back as a stack of cards: the active card
//! fills its progress bar in +10% ticks at a pace set by the step's latency
//! class, then the next step takes over and the finished card slides below
//! it. Play/pause, reset and a persisted light/dark theme are the only
//! controls.
//!
//! ## Architecture
//!
//! ```text
//! Step list + Catalog → ProgressEngine → render_view → AnimatedList → widgets → FrameBuffer → DiffRenderer
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Step types and their display/latency metadata
//! - [`steps`] - The step sequence and its JSON form
//! - [`progress`] - Progress engine state machine and tick timer
//! - [`view`] - Reveal/ordering policy (pure derived view)
//! - [`animate`] - Keyed list reconciliation with springs
//! - [`layout`] - Taffy column layout for the cards
//! - [`theme`] - Light/dark palettes, persistence, theme cell
//! - [`widgets`] - Card, header, hover tilt
//! - [`renderer`] - Frame buffer and differential terminal output
//! - [`pipeline`] - Input translation, the composed app, event loop
//! - [`config`] - Command-line configuration

pub mod animate;
pub mod catalog;
pub mod config;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod progress;
pub mod renderer;
pub mod steps;
pub mod theme;
pub mod types;
pub mod view;
pub mod widgets;

// Re-export commonly used items
pub use catalog::{Catalog, LatencyClass, OperationMeta, StepType};
pub use error::{Error, Result};
pub use pipeline::Storyboard;
pub use progress::{EngineState, ProgressEngine, TickOutcome};
pub use steps::{demo_steps, PayloadItem, PayloadValue, Step};
pub use view::{render_view, RenderItem, RevealPolicy, StepStatus};
