//! Step sequence - the ordered input the storyboard animates.
//!
//! Steps are supplied once per composition and never mutated. The demo
//! sequence mirrors a typical request pipeline; [`load_steps`] reads the same
//! shape from a JSON file.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::StepType;
use crate::error::{Error, Result};

// =============================================================================
// PAYLOAD
// =============================================================================

/// Value half of a payload row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Number(f64),
    Text(String),
}

impl PayloadValue {
    /// Blank values render the key alone, without a value badge.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }
}

impl fmt::Display for PayloadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PayloadValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for PayloadValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for PayloadValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

/// One key/value row shown inside a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadItem {
    pub key: String,
    pub value: PayloadValue,
}

impl PayloadItem {
    pub fn new(key: impl Into<String>, value: impl Into<PayloadValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// STEP
// =============================================================================

/// One unit of the demo sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    #[serde(default)]
    pub payload: Vec<PayloadItem>,
}

impl Step {
    pub fn new(title: impl Into<String>, step_type: StepType) -> Self {
        Self {
            title: title.into(),
            step_type,
            payload: Vec::new(),
        }
    }

    /// Builder-style payload row.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PayloadValue>) -> Self {
        self.payload.push(PayloadItem::new(key, value));
        self
    }
}

// =============================================================================
// SOURCES
// =============================================================================

/// Read a JSON array of steps.
pub fn load_steps(path: &Path) -> Result<Vec<Step>> {
    let raw = fs::read_to_string(path).map_err(|source| Error::StepsFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Error::StepsFormat {
        path: path.to_path_buf(),
        source,
    })
}

/// The built-in nine-step demo sequence.
pub fn demo_steps() -> Vec<Step> {
    vec![
        Step::new("Initial Setup", StepType::Validate)
            .with("Configuration", "Completed")
            .with("Environment", "Development")
            .with("Version", "1.0.1")
            .with("Features", "Core, Advanced"),
        Step::new("Data Collection", StepType::Enrich)
            .with("Source", "Primary")
            .with("Format", "JSON")
            .with("Size", "2.5MB")
            .with("Records", "1,000"),
        Step::new("Data Validation", StepType::External)
            .with("Schema Check", "Passed")
            .with("Data Types", "Valid")
            .with("Required Fields", "Complete")
            .with("Format Check", "Success"),
        Step::new("Security Check", StepType::Fraud)
            .with("Authentication", "Verified")
            .with("Authorization", "Confirmed")
            .with("Encryption", "Active")
            .with("Compliance", "Met"),
        Step::new("Processing", StepType::Risk)
            .with("Status", "In Progress")
            .with("Progress", "75%")
            .with("Queue Position", "1")
            .with("Estimated Time", "2 minutes"),
        Step::new("Data Storage", StepType::Persist)
            .with("Database", "Connected")
            .with("Storage Type", "Primary")
            .with("Backup", "Enabled")
            .with("Last Updated", "2024-03-20T15:30:00Z"),
        Step::new("Notification Setup", StepType::Notify)
            .with("Channel", "Webhook")
            .with("Recipients", "3")
            .with("Template", "Standard")
            .with("Status", "Active"),
        Step::new("Action Execution", StepType::Payment)
            .with("Action ID", "act_123456789")
            .with("Priority", "High")
            .with("Status", "Pending")
            .with("Schedule", "Immediate"),
        Step::new("Process Complete", StepType::Success)
            .with("Status", "Success")
            .with("Process ID", "proc_123456789")
            .with("Duration", "3.2s")
            .with("Next Steps", "Monitor results"),
    ]
}

// =============================================================================
// TESTS
// =============================================================================
