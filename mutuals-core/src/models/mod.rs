//! Domain models for mutuals.
//!
//! This module contains the value types shared across the workspace:
//! identifiers and identifier sets, rate-limit state, and the outcome
//! types produced by bulk action runs.

mod identifier;
mod outcome;
mod ratelimit;

pub use identifier::{Identifier, IdentifierSet};
pub use outcome::{ActionKind, ActionOutcome, ActionStatus, RunSummary};
pub use ratelimit::RateLimitState;
