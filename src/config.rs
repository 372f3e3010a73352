//! Command-line configuration for the `storyboard` binary.
//!
//! Host configuration only: which steps to play, how to reveal them, where
//! to keep the theme setting and where to log. The engine itself has no
//! options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::Result;
use crate::steps::{demo_steps, load_steps, Step};
use crate::theme::FileThemeStore;
use crate::view::RevealPolicy;

const APP_DIR: &str = "spark-storyboard";
const LOG_FILE: &str = "storyboard.log";

/// Card reveal policy as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Reveal {
    /// Active step on top, completed steps below it
    #[default]
    Status,
    /// Reveal steps one by one as they are reached
    Progressive,
}

impl From<Reveal> for RevealPolicy {
    fn from(reveal: Reveal) -> Self {
        match reveal {
            Reveal::Status => RevealPolicy::StatusOrdered,
            Reveal::Progressive => RevealPolicy::ProgressiveReveal,
        }
    }
}

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "storyboard",
    version,
    about = "Animated processing storyboard for the terminal",
    after_help = "Keys:\n  space, p   play / pause\n  r          reset\n  t          toggle light/dark theme\n  q, Esc     quit"
)]
pub struct Config {
    /// JSON file with the steps to play (defaults to the built-in demo)
    #[arg(long, value_name = "PATH")]
    pub steps: Option<PathBuf>,

    /// How cards are revealed and ordered
    #[arg(long, value_enum, default_value_t = Reveal::Status)]
    pub reveal: Reveal,

    /// Settings file holding the saved theme
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Log file (the terminal is taken by the UI)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn policy(&self) -> RevealPolicy {
        self.reveal.into()
    }

    /// Steps from `--steps`, or the demo sequence.
    pub fn load_steps(&self) -> Result<Vec<Step>> {
        match &self.steps {
            Some(path) => load_steps(path),
            None => Ok(demo_steps()),
        }
    }

    /// `--settings`, else the platform config location.
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.settings.clone().or_else(FileThemeStore::default_location)
    }

    /// `--log-file`, else `<cache_dir>/spark-storyboard/storyboard.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join(APP_DIR).join(LOG_FILE)))
    }
}
