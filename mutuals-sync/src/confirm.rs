//! Confirmation capability.
//!
//! Interactive prompts are injected as a trait rather than embedded in
//! the control flow, so the orchestrator's state machine runs headlessly
//! under always-yes, always-no, or scripted implementations. Declining a
//! prompt is the caller-driven cancellation point between batches.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Asks the caller a yes/no question before a destructive step.
pub trait Confirmer: Send + Sync {
    /// Returns true to proceed, false to decline.
    fn confirm(&self, question: &str) -> bool;
}

/// Answers yes to everything. The `-y/--yes` flag.
#[derive(Debug, Default)]
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&self, _question: &str) -> bool {
        true
    }
}

/// Declines everything. Preview-only callers.
#[derive(Debug, Default)]
pub struct NeverConfirm;

impl Confirmer for NeverConfirm {
    fn confirm(&self, _question: &str) -> bool {
        false
    }
}

/// Replays a fixed sequence of answers and records the questions asked.
///
/// Once the script is exhausted every further question is declined.
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    answers: Mutex<VecDeque<bool>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    /// Creates a confirmer that replays `answers` in order.
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// The questions asked so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the lock panicked.
    pub fn questions(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, question: &str) -> bool {
        self.asked.lock().unwrap().push(question.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }
}

// ============================================================================
// Tests
// ============================================================================
