//! Text output formatting with colors.

use mutuals_core::{ActionStatus, IdentifierSet, Reconciliation, RunSummary};
use mutuals_sync::SyncReport;

use super::json::StatusOutput;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the three reconciled sets for a subject.
    pub fn format_reconciliation(&self, subject: &str, rec: &Reconciliation) -> String {
        let mut lines = Vec::new();

        lines.push(format!("{} (@{subject})", self.bold("Reconciliation")));
        lines.push(String::new());

        self.push_set(
            &mut lines,
            "Not following you back",
            &rec.not_following_back,
            YELLOW,
        );
        self.push_set(
            &mut lines,
            "You don't follow back",
            &rec.not_followed_back,
            YELLOW,
        );
        self.push_set(&mut lines, "Mutuals", &rec.mutual, GREEN);

        lines.join("\n")
    }

    /// Formats one bulk-run summary, listing failures individually.
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        let mut lines = vec![self.bold(&summary.describe())];

        for outcome in &summary.outcomes {
            if outcome.status == ActionStatus::Failed {
                let detail = outcome.detail.as_deref().unwrap_or("unknown error");
                lines.push(format!(
                    "  {} {}: {detail}",
                    self.colored("✗", RED),
                    outcome.identifier
                ));
            }
        }

        lines.join("\n")
    }

    /// Formats the two-phase sync report.
    pub fn format_sync(&self, report: &SyncReport) -> String {
        let mut lines = Vec::new();

        if let Some(unfollow) = &report.unfollow {
            lines.push(format!("{}:", self.bold("Unfollow phase")));
            lines.push(indent(&self.format_summary(unfollow)));
        }
        if report.refreshed_following {
            lines.push(self.dim("(following list refreshed between phases)"));
        }
        if let Some(follow) = &report.follow {
            lines.push(format!("{}:", self.bold("Follow-back phase")));
            lines.push(indent(&self.format_summary(follow)));
        }

        lines.push(format!(
            "{} {} unfollowed, {} followed",
            self.colored("Done:", GREEN),
            report.unfollowed(),
            report.followed()
        ));

        lines.join("\n")
    }

    /// Formats the status command output.
    pub fn format_status(&self, status: &StatusOutput) -> String {
        let mut lines = vec![
            format!("{} @{}", self.bold("Account:"), status.login),
            format!("Followers: {}", status.followers),
            format!("Following: {}", status.following),
        ];

        match status.rate_limit.remaining {
            Some(remaining) => {
                let line = format!(
                    "Rate limit: {remaining} remaining, resets {}",
                    status.rate_limit.reset_human()
                );
                if remaining < 10 {
                    lines.push(self.colored(&line, YELLOW));
                } else {
                    lines.push(line);
                }
            }
            None => lines.push(self.dim("Rate limit: unknown")),
        }

        lines.join("\n")
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn push_set(&self, lines: &mut Vec<String>, title: &str, set: &IdentifierSet, color: &str) {
        lines.push(format!("{} ({}):", self.colored(title, color), set.len()));
        if set.is_empty() {
            lines.push(self.dim("  (none)"));
        } else {
            for identifier in set {
                lines.push(format!("  {}", identifier.as_str()));
            }
        }
        lines.push(String::new());
    }

    fn colored(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.colored(text, BOLD)
    }

    fn dim(&self, text: &str) -> String {
        self.colored(text, DIM)
    }
}

fn indent(block: &str) -> String {
    block
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
