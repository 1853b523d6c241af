//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;

use mutuals_core::{RateLimitState, Reconciliation};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for the diff command.
///
/// Field names follow the flattened reconciliation's snake_case keys.
#[derive(Debug, Serialize)]
pub struct DiffOutput {
    pub subject: String,
    #[serde(flatten)]
    pub reconciliation: Reconciliation,
}

impl DiffOutput {
    /// Builds the diff payload for one subject.
    pub fn new(subject: &str, reconciliation: &Reconciliation) -> Self {
        Self {
            subject: subject.to_string(),
            reconciliation: reconciliation.clone(),
        }
    }
}

/// JSON output for the status command.
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub login: String,
    pub followers: usize,
    pub following: usize,
    pub rate_limit: RateLimitState,
}

// ============================================================================
// Formatter
// ============================================================================

/// JSON formatter, optionally pretty-printed.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Serializes a value to a JSON string.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(rendered)
    }
}
