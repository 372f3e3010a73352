//! Operation catalog - display metadata and latency per step type.
//!
//! The catalog is read-only configuration: every [`StepType`] a step uses
//! must have an entry, and [`Catalog::validate`] checks that before anything
//! is mounted.
//!
//! # Example
//!
//! ```
//! use spark_storyboard::catalog::{Catalog, StepType, LatencyClass};
//!
//! let catalog = Catalog::builtin();
//! let meta = catalog.get(StepType::External).unwrap();
//! assert_eq!(meta.latency, LatencyClass::Slow);
//! assert_eq!(meta.latency.interval_ms(), 400);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::steps::Step;

// =============================================================================
// STEP TYPE
// =============================================================================

/// Category of a processing step. Selects display metadata from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    /// Input validation and sanitization
    Validate,
    /// Data enrichment
    Enrich,
    /// External API calls
    External,
    /// Fraud and sanctions screening
    Fraud,
    /// Risk assessment and scoring
    Risk,
    /// Data persistence
    Persist,
    /// Notifications and webhooks
    Notify,
    /// Payment processing
    Payment,
    /// Operation completion
    Success,
    /// Error handling and fallback (never driven by the demo data)
    Error,
}

impl StepType {
    pub const ALL: [StepType; 10] = [
        StepType::Validate,
        StepType::Enrich,
        StepType::External,
        StepType::Fraud,
        StepType::Risk,
        StepType::Persist,
        StepType::Notify,
        StepType::Payment,
        StepType::Success,
        StepType::Error,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Enrich => "enrich",
            Self::External => "external",
            Self::Fraud => "fraud",
            Self::Risk => "risk",
            Self::Persist => "persist",
            Self::Notify => "notify",
            Self::Payment => "payment",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// LATENCY
// =============================================================================

/// Coarse speed bucket controlling how fast a step's progress bar fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyClass {
    Slow,
    Average,
    Fast,
}

impl LatencyClass {
    /// Tick period in milliseconds while a step of this class is active.
    pub const fn interval_ms(&self) -> u64 {
        match self {
            Self::Slow => 400,
            Self::Average => 300,
            Self::Fast => 200,
        }
    }

    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms())
    }
}

// =============================================================================
// COLOR TOKENS
// =============================================================================

/// Accent color of an operation. Resolved to concrete colors by the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Blue,
    Purple,
    Green,
    Red,
    Orange,
    Indigo,
    Pink,
    Teal,
    Emerald,
    Rose,
}

// =============================================================================
// OPERATION META
// =============================================================================

/// Display metadata and latency for one step type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationMeta {
    pub title: String,
    pub description: String,
    /// Single-cell glyph drawn in the card's icon slot.
    pub icon: char,
    pub color: ColorToken,
    pub latency: LatencyClass,
}

impl OperationMeta {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        icon: char,
        color: ColorToken,
        latency: LatencyClass,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            icon,
            color,
            latency,
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// Immutable lookup table from [`StepType`] to [`OperationMeta`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: BTreeMap<StepType, OperationMeta>,
}

impl Catalog {
    /// Empty catalog. Use [`Catalog::with`] to populate it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, step_type: StepType, meta: OperationMeta) -> Self {
        self.entries.insert(step_type, meta);
        self
    }

    /// The catalog shipped with the demo, covering every step type.
    pub fn builtin() -> Self {
        use ColorToken::*;
        use LatencyClass::*;

        Self::new()
            .with(
                StepType::Validate,
                OperationMeta::new("Validate / Sanitize", "Validate and sanitize input data", '◈', Blue, Fast),
            )
            .with(
                StepType::Enrich,
                OperationMeta::new("Enrich Data", "Enhance data with additional information", '✦', Purple, Average),
            )
            .with(
                StepType::External,
                OperationMeta::new("External API Call", "Make external API requests", '◎', Green, Slow),
            )
            .with(
                StepType::Fraud,
                OperationMeta::new("Fraud / Sanctions Screening", "Screen for fraud and sanctions", '⌕', Red, Slow),
            )
            .with(
                StepType::Risk,
                OperationMeta::new("Risk Scoring", "Calculate risk scores", '∿', Orange, Average),
            )
            .with(
                StepType::Persist,
                OperationMeta::new("Persistence / DB Write", "Store data in database", '▤', Indigo, Fast),
            )
            .with(
                StepType::Notify,
                OperationMeta::new("Notification / Webhook", "Send notifications and webhooks", '♪', Pink, Fast),
            )
            .with(
                StepType::Payment,
                OperationMeta::new("Payment Capture", "Process payment transactions", '¤', Teal, Slow),
            )
            .with(
                StepType::Success,
                OperationMeta::new("Success / Complete", "Operation completed successfully", '✔', Emerald, Fast),
            )
            .with(
                StepType::Error,
                OperationMeta::new("Error / Fallback", "Operation failed or fallback triggered", '✖', Rose, Fast),
            )
    }

    pub fn get(&self, step_type: StepType) -> Option<&OperationMeta> {
        self.entries.get(&step_type)
    }

    pub fn contains(&self, step_type: StepType) -> bool {
        self.entries.contains_key(&step_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that every step's type has an entry.
    ///
    /// Fails on the first offending step so the error names it precisely.
    pub fn validate(&self, steps: &[Step]) -> Result<()> {
        for (index, step) in steps.iter().enumerate() {
            if !self.contains(step.step_type) {
                return Err(Error::UnknownStepType {
                    index,
                    title: step.title.clone(),
                    step_type: step.step_type,
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_step_type() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), StepType::ALL.len());
        for step_type in StepType::ALL {
            assert!(catalog.contains(step_type), "missing {step_type}");
        }
    }

    #[test]
    fn test_latency_intervals() {
        assert_eq!(LatencyClass::Slow.interval(), Duration::from_millis(400));
        assert_eq!(LatencyClass::Average.interval(), Duration::from_millis(300));
        assert_eq!(LatencyClass::Fast.interval(), Duration::from_millis(200));
    }

    #[test]
    fn test_builtin_latency_classes() {
        let catalog = Catalog::builtin();
        let latency = |t| catalog.get(t).unwrap().latency;
        assert_eq!(latency(StepType::Validate), LatencyClass::Fast);
        assert_eq!(latency(StepType::Enrich), LatencyClass::Average);
        assert_eq!(latency(StepType::External), LatencyClass::Slow);
        assert_eq!(latency(StepType::Fraud), LatencyClass::Slow);
        assert_eq!(latency(StepType::Risk), LatencyClass::Average);
        assert_eq!(latency(StepType::Payment), LatencyClass::Slow);
    }

    #[test]
    fn test_validate_rejects_missing_type() {
        let catalog = Catalog::new().with(
            StepType::Validate,
            OperationMeta::new("V", "v", 'v', ColorToken::Blue, LatencyClass::Fast),
        );
        let steps = vec![
            Step::new("First", StepType::Validate),
            Step::new("Second", StepType::Persist),
        ];

        let err = catalog.validate(&steps).unwrap_err();
        match err {
            Error::UnknownStepType { index, ref title, step_type } => {
                assert_eq!(index, 1);
                assert_eq!(title, "Second");
                assert_eq!(step_type, StepType::Persist);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("persist"));
    }

    #[test]
    fn test_validate_accepts_empty_steps() {
        assert!(Catalog::new().validate(&[]).is_ok());
    }

    #[test]
    fn test_step_type_serde_is_lowercase() {
        let json = serde_json::to_string(&StepType::External).unwrap();
        assert_eq!(json, "\"external\"");
        let parsed: StepType = serde_json::from_str("\"notify\"").unwrap();
        assert_eq!(parsed, StepType::Notify);
    }
}
