//! User-facing progress events.
//!
//! Distinct from `tracing` logs: events are product output (fetch progress,
//! per-item outcomes, rate-limit warnings, phase summaries) that the caller
//! renders or persists. The core emits them through the [`Reporter`] trait
//! and never decides how they look.

use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Severity
// ============================================================================

/// Severity of a progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Routine progress.
    Info,
    /// A completed operation.
    Success,
    /// Advisory, never blocks execution.
    Warning,
    /// Something failed.
    Error,
}

impl Severity {
    /// Short uppercase label for log-style rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "OK",
            Self::Warning => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Event
// ============================================================================

/// One timestamped progress event.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// When the event was emitted.
    pub timestamp: DateTime<Utc>,
    /// Severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
}

impl Event {
    /// Creates an event stamped with the current time.
    pub fn now(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            message: message.into(),
        }
    }
}

// ============================================================================
// Reporter
// ============================================================================

/// Observer interface for progress events.
///
/// Implementations decide rendering and persistence. The convenience
/// methods keep call sites terse.
pub trait Reporter: Send + Sync {
    /// Delivers one event.
    fn report(&self, event: Event);

    /// Emits an info event.
    fn info(&self, message: &str) {
        self.report(Event::now(Severity::Info, message));
    }

    /// Emits a success event.
    fn success(&self, message: &str) {
        self.report(Event::now(Severity::Success, message));
    }

    /// Emits a warning event.
    fn warning(&self, message: &str) {
        self.report(Event::now(Severity::Warning, message));
    }

    /// Emits an error event.
    fn error(&self, message: &str) {
        self.report(Event::now(Severity::Error, message));
    }
}

/// Reporter that discards everything.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: Event) {}
}

/// Reporter that records events in memory, for headless tests.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the lock panicked.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Messages of all recorded events with the given severity.
    pub fn messages_with(&self, severity: Severity) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.severity == severity)
            .map(|e| e.message)
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Info.label(), "INFO");
        assert_eq!(Severity::Warning.label(), "WARN");
    }

    #[test]
    fn test_recording_reporter_collects_in_order() {
        let reporter = RecordingReporter::new();
        reporter.info("first");
        reporter.warning("second");
        reporter.success("third");

        let events = reporter.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].message, "first");
        assert_eq!(events[1].severity, Severity::Warning);
        assert_eq!(events[2].severity, Severity::Success);
    }

    #[test]
    fn test_messages_with_filters_by_severity() {
        let reporter = RecordingReporter::new();
        reporter.info("a");
        reporter.warning("b");
        reporter.warning("c");

        assert_eq!(reporter.messages_with(Severity::Warning), vec!["b", "c"]);
    }

    #[test]
    fn test_event_serializes_severity_snake_case() {
        let event = Event::now(Severity::Success, "done");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["severity"], "success");
        assert_eq!(json["message"], "done");
    }
}
