//! Terminal-facing progress reporting and confirmation.
//!
//! Progress events go to stderr so `--format json` output on stdout
//! stays machine-parseable even during a chatty run.

use std::io::{self, BufRead, Write};

use mutuals_core::{Event, Reporter, Severity};
use mutuals_sync::Confirmer;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// ============================================================================
// Terminal Reporter
// ============================================================================

/// Reporter that prints events to stderr with optional colors.
pub struct TermReporter {
    use_colors: bool,
}

impl TermReporter {
    /// Creates a reporter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn color_for(severity: Severity) -> &'static str {
        match severity {
            Severity::Info => CYAN,
            Severity::Success => GREEN,
            Severity::Warning => YELLOW,
            Severity::Error => RED,
        }
    }
}

impl Reporter for TermReporter {
    fn report(&self, event: Event) {
        if self.use_colors {
            let color = Self::color_for(event.severity);
            eprintln!("{color}[{}]{RESET} {}", event.severity.label(), event.message);
        } else {
            eprintln!("[{}] {}", event.severity.label(), event.message);
        }
    }
}

// ============================================================================
// Stdin Confirmer
// ============================================================================

/// Confirmer that prompts on stderr and reads a y/n answer from stdin.
///
/// Anything other than an explicit yes declines, including EOF. A piped
/// stdin therefore never applies mutations by accident.
pub struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&self, question: &str) -> bool {
        eprint!("{question} [y/N] ");
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

// ============================================================================
// Tests
// ============================================================================
