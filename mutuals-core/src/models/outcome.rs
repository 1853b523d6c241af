//! Outcomes of bulk follow/unfollow runs.

use std::fmt;

use serde::Serialize;

// ============================================================================
// Action Kind
// ============================================================================

/// The state-changing action applied to a target identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Start following the target.
    Follow,
    /// Stop following the target.
    Unfollow,
}

impl ActionKind {
    /// Imperative verb for prompts and progress lines.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Unfollow => "unfollow",
        }
    }

    /// Past-tense verb for summaries.
    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Follow => "followed",
            Self::Unfollow => "unfollowed",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

// ============================================================================
// Action Status
// ============================================================================

/// Per-target result status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// The API call succeeded.
    Succeeded,
    /// The API call failed; the batch continued.
    Failed,
    /// Dry run: no call was made.
    SkippedDryRun,
}

// ============================================================================
// Action Outcome
// ============================================================================

/// The result of applying one action to one identifier.
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    /// Target handle, original casing.
    pub identifier: String,
    /// The action that was applied (or skipped).
    pub action: ActionKind,
    /// How it went.
    pub status: ActionStatus,
    /// Failure detail, present only for [`ActionStatus::Failed`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ActionOutcome {
    /// Records a successful action.
    pub fn succeeded(identifier: impl Into<String>, action: ActionKind) -> Self {
        Self {
            identifier: identifier.into(),
            action,
            status: ActionStatus::Succeeded,
            detail: None,
        }
    }

    /// Records a failed action with its error message.
    pub fn failed(
        identifier: impl Into<String>,
        action: ActionKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            action,
            status: ActionStatus::Failed,
            detail: Some(detail.into()),
        }
    }

    /// Records a dry-run skip.
    pub fn skipped_dry_run(identifier: impl Into<String>, action: ActionKind) -> Self {
        Self {
            identifier: identifier.into(),
            action,
            status: ActionStatus::SkippedDryRun,
            detail: None,
        }
    }
}

// ============================================================================
// Run Summary
// ============================================================================

/// Aggregate result of one bulk execution.
///
/// Partial failure is not an error: failed targets are recorded here and
/// the caller decides what to do about them.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// The action this run applied.
    pub action: ActionKind,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Per-target outcomes, in target order.
    pub outcomes: Vec<ActionOutcome>,
}

impl RunSummary {
    /// Creates an empty summary for a run.
    pub fn new(action: ActionKind, dry_run: bool) -> Self {
        Self {
            action,
            dry_run,
            outcomes: Vec::new(),
        }
    }

    /// Appends one outcome.
    pub fn push(&mut self, outcome: ActionOutcome) {
        self.outcomes.push(outcome);
    }

    /// Total number of targets processed.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of successful actions.
    pub fn succeeded(&self) -> usize {
        self.count(ActionStatus::Succeeded)
    }

    /// Number of failed actions.
    pub fn failed(&self) -> usize {
        self.count(ActionStatus::Failed)
    }

    /// Number of dry-run skips.
    pub fn skipped(&self) -> usize {
        self.count(ActionStatus::SkippedDryRun)
    }

    fn count(&self, status: ActionStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// One-line textual summary, e.g. `3 attempted, 2 unfollowed, 1 failed`.
    pub fn describe(&self) -> String {
        if self.dry_run {
            format!(
                "{} would be {} (dry run)",
                self.attempted(),
                self.action.past_tense()
            )
        } else {
            format!(
                "{} attempted, {} {}, {} failed",
                self.attempted(),
                self.succeeded(),
                self.action.past_tense(),
                self.failed()
            )
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut summary = RunSummary::new(ActionKind::Unfollow, false);
        summary.push(ActionOutcome::succeeded("a", ActionKind::Unfollow));
        summary.push(ActionOutcome::failed("b", ActionKind::Unfollow, "HTTP 500"));
        summary.push(ActionOutcome::succeeded("c", ActionKind::Unfollow));

        assert_eq!(summary.attempted(), 3);
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.skipped(), 0);
    }

    #[test]
    fn test_dry_run_describe() {
        let mut summary = RunSummary::new(ActionKind::Follow, true);
        summary.push(ActionOutcome::skipped_dry_run("a", ActionKind::Follow));
        summary.push(ActionOutcome::skipped_dry_run("b", ActionKind::Follow));

        assert_eq!(summary.skipped(), 2);
        assert_eq!(summary.describe(), "2 would be followed (dry run)");
    }

    #[test]
    fn test_live_describe() {
        let mut summary = RunSummary::new(ActionKind::Unfollow, false);
        summary.push(ActionOutcome::succeeded("a", ActionKind::Unfollow));
        summary.push(ActionOutcome::failed("b", ActionKind::Unfollow, "boom"));

        assert_eq!(summary.describe(), "2 attempted, 1 unfollowed, 1 failed");
    }

    #[test]
    fn test_failed_outcome_serializes_detail() {
        let outcome = ActionOutcome::failed("b", ActionKind::Follow, "HTTP 404: Not Found");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["detail"], "HTTP 404: Not Found");
    }
}
