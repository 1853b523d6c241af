//! The auto-sync orchestrator.
//!
//! Composes fetch -> reconcile -> (dry-run preview -> confirm)? ->
//! execute, twice: an unfollow phase over `following - followers` and a
//! follow-back phase over `followers - following`. Both phases share one
//! initial fetch; the following set is re-fetched between phases only
//! when phase 1 actually mutated it. There is no rollback: a failure in
//! phase 2 leaves phase 1's effects in place, and that partial
//! completion is a valid terminal state.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use mutuals_api::{ApiClient, RelationKind, SetFetcher};
use mutuals_core::{ActionKind, IdentifierSet, Reconciliation, RunSummary, difference};

use crate::confirm::Confirmer;
use crate::error::SyncError;
use crate::executor::ActionExecutor;

// ============================================================================
// Sync Report
// ============================================================================

/// Terminal summary of an orchestrated operation.
#[derive(Debug, Serialize)]
pub struct SyncReport {
    /// Final summary of the unfollow phase, if it ran.
    pub unfollow: Option<RunSummary>,
    /// Final summary of the follow-back phase, if it ran.
    pub follow: Option<RunSummary>,
    /// Whether the following set was re-fetched between phases.
    pub refreshed_following: bool,
}

impl SyncReport {
    /// Number of accounts actually unfollowed.
    pub fn unfollowed(&self) -> usize {
        self.unfollow.as_ref().map_or(0, count_live)
    }

    /// Number of accounts actually followed.
    pub fn followed(&self) -> usize {
        self.follow.as_ref().map_or(0, count_live)
    }
}

fn count_live(summary: &RunSummary) -> usize {
    if summary.dry_run { 0 } else { summary.succeeded() }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Drives the reconciliation workflows against one authenticated account.
pub struct SyncOrchestrator<'a> {
    client: &'a ApiClient,
    executor: ActionExecutor<'a>,
    confirmer: Arc<dyn Confirmer>,
}

impl<'a> SyncOrchestrator<'a> {
    /// Creates an orchestrator.
    pub fn new(
        client: &'a ApiClient,
        executor: ActionExecutor<'a>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            client,
            executor,
            confirmer,
        }
    }

    /// Resolves the authenticated login. Fatal on failure.
    pub async fn identity(&self) -> Result<String, SyncError> {
        self.client.viewer().await.map_err(SyncError::from_identity)
    }

    /// View-only reconciliation for `subject`, or for the authenticated
    /// account when `subject` is `None`.
    #[instrument(skip(self))]
    pub async fn preview(&self, subject: Option<&str>) -> Result<Reconciliation, SyncError> {
        let subject = match subject {
            Some(s) => s.to_string(),
            None => self.identity().await?,
        };
        let followers = self.fetch(&subject, RelationKind::Followers).await?;
        let following = self.fetch(&subject, RelationKind::Following).await?;
        Ok(Reconciliation::compute(&followers, &following))
    }

    /// Unfollows every account that does not follow back.
    ///
    /// `only` narrows the reconciled target list to an explicit picklist.
    #[instrument(skip(self, only))]
    pub async fn unfollow_non_followers(
        &self,
        dry_run: bool,
        only: Option<&[String]>,
    ) -> Result<RunSummary, SyncError> {
        let subject = self.identity().await?;
        let followers = self.fetch(&subject, RelationKind::Followers).await?;
        let following = self.fetch(&subject, RelationKind::Following).await?;

        let targets = narrow(difference(&following, &followers), only);
        self.run_phase(&targets, ActionKind::Unfollow, dry_run).await
    }

    /// Follows back every follower not currently followed.
    #[instrument(skip(self, only))]
    pub async fn follow_back(
        &self,
        dry_run: bool,
        only: Option<&[String]>,
    ) -> Result<RunSummary, SyncError> {
        let subject = self.identity().await?;
        let followers = self.fetch(&subject, RelationKind::Followers).await?;
        let following = self.fetch(&subject, RelationKind::Following).await?;

        let targets = narrow(difference(&followers, &following), only);
        self.run_phase(&targets, ActionKind::Follow, dry_run).await
    }

    /// The combined two-phase workflow: unfollow non-followers, then
    /// follow back un-followed followers.
    ///
    /// Any live unfollow with at least one success makes the cached
    /// following set stale, so it is re-fetched before phase 2 computes
    /// its targets. That rule applies whether the live run was requested
    /// directly or reached through a confirmed dry-run preview.
    #[instrument(skip(self))]
    pub async fn auto_sync(&self, dry_run: bool) -> Result<SyncReport, SyncError> {
        let reporter = self.client.reporter();
        let subject = self.identity().await?;

        let followers = self.fetch(&subject, RelationKind::Followers).await?;
        let mut following = self.fetch(&subject, RelationKind::Following).await?;

        // Phase 1: unfollow accounts that do not follow back.
        let unfollow_targets = difference(&following, &followers);
        let unfollow = self
            .run_phase(&unfollow_targets, ActionKind::Unfollow, dry_run)
            .await?;

        // The following data is stale only after live unfollows landed.
        let mut refreshed = false;
        if count_live(&unfollow) > 0 {
            debug!("Live unfollows landed, refreshing following set");
            reporter.info("Refreshing following list after unfollows");
            following = self.fetch(&subject, RelationKind::Following).await?;
            refreshed = true;
        }

        // Phase 2: follow back, reconciled against current data.
        let follow_targets = difference(&followers, &following);
        let follow = self
            .run_phase(&follow_targets, ActionKind::Follow, dry_run)
            .await?;

        let report = SyncReport {
            unfollow: Some(unfollow),
            follow: Some(follow),
            refreshed_following: refreshed,
        };
        reporter.success(&format!(
            "Sync complete: {} unfollowed, {} followed",
            report.unfollowed(),
            report.followed()
        ));
        Ok(report)
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    async fn fetch(
        &self,
        subject: &str,
        kind: RelationKind,
    ) -> Result<IdentifierSet, SyncError> {
        SetFetcher::new(self.client)
            .fetch_all(subject, kind)
            .await
            .map_err(|e| SyncError::from_fetch(kind.path_segment(), e))
    }

    /// Runs one phase: execute, and after a non-empty dry run ask whether
    /// to re-execute for real on the same target list.
    ///
    /// Returns the summary that counts: the live one when the caller
    /// confirmed, otherwise the first run's.
    async fn run_phase(
        &self,
        targets: &IdentifierSet,
        action: ActionKind,
        dry_run: bool,
    ) -> Result<RunSummary, SyncError> {
        let reporter = self.client.reporter();

        if targets.is_empty() {
            reporter.info(&format!("No accounts to {}", action.verb()));
            return Ok(self.executor.execute(targets, action, dry_run).await);
        }

        let summary = self.executor.execute(targets, action, dry_run).await;
        reporter.info(&summary.describe());

        if dry_run {
            let question = format!(
                "Apply for real: {} {} account(s)?",
                action.verb(),
                targets.len()
            );
            if self.confirmer.confirm(&question) {
                let live = self.executor.execute(targets, action, false).await;
                reporter.info(&live.describe());
                return Ok(live);
            }
        }

        Ok(summary)
    }
}

fn narrow(targets: IdentifierSet, only: Option<&[String]>) -> IdentifierSet {
    match only {
        Some(names) if !names.is_empty() => targets.select(names),
        _ => targets,
    }
}
