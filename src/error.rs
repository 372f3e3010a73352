//! Error types for spark-storyboard.
//!
//! Configuration problems (unknown step types, unreadable step files) are
//! fatal and surface when the storyboard is composed. Everything else either
//! degrades gracefully or is a terminal I/O failure.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::StepType;

#[derive(Debug, Error)]
pub enum Error {
    #[error("step {index} ({title:?}) uses step type `{step_type}` which is missing from the operation catalog")]
    UnknownStepType {
        index: usize,
        title: String,
        step_type: StepType,
    },
    #[error("failed to read steps from {path}")]
    StepsFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid steps file {path}")]
    StepsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not access theme settings at {path}")]
    ThemeStore {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("theme settings at {path} are not a JSON object")]
    ThemeFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("layout failed: {0}")]
    Layout(String),
    #[error(transparent)]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_source_is_chained_not_repeated() {
        let err = Error::StepsFile {
            path: PathBuf::from("steps.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "failed to read steps from steps.json");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("no such file"));
    }

    #[test]
    fn test_format_errors_keep_serde_detail_in_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let detail = source.to_string();
        let err = Error::ThemeFormat {
            path: PathBuf::from("settings.json"),
            source,
        };
        assert!(!err.to_string().contains(&detail));
        assert_eq!(err.source().map(|s| s.to_string()), Some(detail));
    }
}
