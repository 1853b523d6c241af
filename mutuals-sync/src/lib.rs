// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # mutuals Sync
//!
//! The reconciliation-side behavior of the `mutuals` workspace:
//!
//! - [`executor`] - [`ActionExecutor`], bulk follow/unfollow with dry-run
//!   preview, inter-action pacing, and per-item failure isolation
//! - [`confirm`] - the [`Confirmer`] capability that replaces interactive
//!   prompts in the control flow, so every workflow runs headlessly
//! - [`orchestrator`] - [`SyncOrchestrator`], the fetch -> reconcile ->
//!   execute state machine including the two-phase auto-sync workflow
//!
//! Everything here is sequential by design: pacing, not parallelism, is
//! the concurrency model.

pub mod confirm;
pub mod error;
pub mod executor;
pub mod orchestrator;

pub use confirm::{AlwaysConfirm, Confirmer, NeverConfirm, ScriptedConfirmer};
pub use error::SyncError;
pub use executor::{ActionExecutor, ExecutorSettings};
pub use orchestrator::{SyncOrchestrator, SyncReport};
