use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use spark_storyboard::catalog::Catalog;
use spark_storyboard::config::Config;
use spark_storyboard::pipeline::{self, Storyboard};
use spark_storyboard::theme::{self, FileThemeStore, MemoryThemeStore, ThemeStore};

const DEFAULT_FILTER: &str = "spark_storyboard=info";

/// Create the log file and its directory.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

fn init_logging(path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    // The terminal belongs to the UI, so logs only ever go to a file.
    let file = match open_log_file(path) {
        Ok(file) => file,
        Err(err) => {
            // Still before mount, so stderr is visible.
            eprintln!("storyboard: logging disabled, cannot open {}: {err}", path.display());
            return;
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(config.log_path().as_deref());

    // Everything that can fail on bad input happens before the terminal is taken.
    let steps = config.load_steps().context("failed to load steps")?;
    let mut storyboard = Storyboard::new(steps, Catalog::builtin(), config.policy())
        .context("invalid storyboard configuration")?;

    let store: Box<dyn ThemeStore> = match config.settings_path() {
        Some(path) => Box::new(FileThemeStore::new(path)),
        None => {
            warn!("no config directory, theme will not be saved");
            Box::new(MemoryThemeStore::new())
        }
    };
    theme::init_theme(store, theme::system_mode());

    info!(
        steps = storyboard.steps().len(),
        policy = ?storyboard.policy(),
        "starting storyboard"
    );

    let mut handle = pipeline::mount().context("failed to set up the terminal")?;
    let result = pipeline::run(&mut handle, &mut storyboard);
    handle.unmount();

    result.context("terminal error")?;
    info!("bye");
    Ok(())
}
