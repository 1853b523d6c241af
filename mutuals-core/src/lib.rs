// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # mutuals Core
//!
//! Core types and the reconciliation logic for the `mutuals` workspace.
//!
//! This crate is pure: no I/O, no network, no clocks beyond event
//! timestamps. Everything here is exercised by the API and sync crates.
//!
//! ## Key Types
//!
//! - [`Identifier`] / [`IdentifierSet`] - case-insensitive account handles
//!   and the deduplicated sets built from paginated API pages
//! - [`Reconciliation`] - the three derived sets (not following back,
//!   not followed back, mutual)
//! - [`RateLimitState`] - remaining quota and reset time as reported by
//!   the platform's rate-limit headers
//! - [`ActionOutcome`] / [`RunSummary`] - per-target results of bulk
//!   follow/unfollow runs
//! - [`Reporter`] - observer interface for user-facing progress events

pub mod events;
pub mod models;
pub mod reconcile;

// Re-export model types
pub use models::{
    ActionKind, ActionOutcome, ActionStatus, Identifier, IdentifierSet, RateLimitState, RunSummary,
};

// Re-export reconciliation
pub use reconcile::{Reconciliation, difference, intersection};

// Re-export event types
pub use events::{Event, NullReporter, RecordingReporter, Reporter, Severity};
