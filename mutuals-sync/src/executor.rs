//! Bulk action execution.
//!
//! Iterates a reconciled target list and applies one follow or unfollow
//! per item. Dry runs short-circuit before any network call. A failed
//! item is recorded and the batch continues; partial failure is a
//! property of the summary, never an error.

use std::time::Duration;

use tracing::{instrument, warn};

use mutuals_api::ApiClient;
use mutuals_core::{ActionKind, ActionOutcome, IdentifierSet, RunSummary};

/// Fixed delay after every successful mutating call. Back-pressure
/// against the platform's abuse detection.
const DEFAULT_ACTION_DELAY: Duration = Duration::from_secs(5);

// ============================================================================
// Settings
// ============================================================================

/// Tunables for bulk execution.
#[derive(Debug, Clone)]
pub struct ExecutorSettings {
    /// Delay after each successful action before the next target.
    pub action_delay: Duration,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            action_delay: DEFAULT_ACTION_DELAY,
        }
    }
}

impl ExecutorSettings {
    /// Settings with no inter-action delay, for tests.
    pub fn undelayed() -> Self {
        Self {
            action_delay: Duration::ZERO,
        }
    }
}

// ============================================================================
// Action Executor
// ============================================================================

/// Executes one action across an ordered target list.
pub struct ActionExecutor<'a> {
    client: &'a ApiClient,
    settings: ExecutorSettings,
}

impl<'a> ActionExecutor<'a> {
    /// Creates an executor with default pacing.
    pub fn new(client: &'a ApiClient) -> Self {
        Self::with_settings(client, ExecutorSettings::default())
    }

    /// Creates an executor with custom pacing.
    pub fn with_settings(client: &'a ApiClient, settings: ExecutorSettings) -> Self {
        Self { client, settings }
    }

    /// Applies `action` to every target, in target order.
    ///
    /// An empty target list is a no-op success. With `dry_run` set, no
    /// network call and no delay happen; each target gets a
    /// skipped-dry-run outcome. Otherwise each failure is recorded and
    /// execution continues with the next target.
    #[instrument(skip(self, targets), fields(action = %action, targets = targets.len(), dry_run))]
    pub async fn execute(
        &self,
        targets: &IdentifierSet,
        action: ActionKind,
        dry_run: bool,
    ) -> RunSummary {
        let reporter = self.client.reporter();
        let mut summary = RunSummary::new(action, dry_run);
        let total = targets.len();

        for (index, target) in targets.iter().enumerate() {
            let position = index + 1;

            if dry_run {
                reporter.info(&format!(
                    "[dry run] {position}/{total} would {} {target}",
                    action.verb()
                ));
                summary.push(ActionOutcome::skipped_dry_run(target.as_str(), action));
                continue;
            }

            let result = match action {
                ActionKind::Follow => self.client.follow(target.as_str()).await,
                ActionKind::Unfollow => self.client.unfollow(target.as_str()).await,
            };

            match result {
                Ok(()) => {
                    reporter.success(&format!(
                        "{position}/{total} {} {target}",
                        action.past_tense()
                    ));
                    summary.push(ActionOutcome::succeeded(target.as_str(), action));
                    if !self.settings.action_delay.is_zero() {
                        tokio::time::sleep(self.settings.action_delay).await;
                    }
                }
                Err(e) => {
                    warn!(target = %target, error = %e, "Action failed, continuing");
                    reporter.error(&format!(
                        "{position}/{total} failed to {} {target}: {e}",
                        action.verb()
                    ));
                    summary.push(ActionOutcome::failed(target.as_str(), action, e.to_string()));
                }
            }
        }

        summary
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mutuals_api::{
        ApiError, ApiRequest, ClientSettings, HttpTransport, RawResponse,
    };
    use mutuals_core::{ActionStatus, NullReporter, RecordingReporter, Reporter, Severity};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Transport that replays one scripted status per call.
    struct StatusTransport {
        statuses: Mutex<Vec<u16>>,
        calls: AtomicUsize,
    }

    impl StatusTransport {
        fn new(statuses: Vec<u16>) -> Self {
            Self {
                statuses: Mutex::new(statuses),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HttpTransport for StatusTransport {
        async fn execute(&self, _request: ApiRequest) -> Result<RawResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut statuses = self.statuses.lock().unwrap();
            let status = if statuses.is_empty() { 204 } else { statuses.remove(0) };
            Ok(RawResponse {
                status,
                body: r#"{"message": "scripted failure"}"#.to_string(),
                headers: Vec::new(),
            })
        }
    }

    fn client(transport: Arc<StatusTransport>, reporter: Arc<dyn Reporter>) -> ApiClient {
        ApiClient::with_settings(
            transport,
            "token",
            reporter,
            ClientSettings::undelayed("https://api.github.com"),
        )
    }

    fn targets(names: &[&str]) -> IdentifierSet {
        IdentifierSet::from_raw(names.iter().copied())
    }

    #[tokio::test]
    async fn test_dry_run_issues_no_network_calls() {
        let transport = Arc::new(StatusTransport::new(vec![]));
        let client = client(Arc::clone(&transport), Arc::new(NullReporter));
        let executor = ActionExecutor::with_settings(&client, ExecutorSettings::undelayed());

        let summary = executor
            .execute(&targets(&["a", "b", "c"]), ActionKind::Unfollow, true)
            .await;

        assert_eq!(transport.calls(), 0);
        assert_eq!(summary.attempted(), 3);
        assert_eq!(summary.skipped(), 3);
        let order: Vec<&str> = summary.outcomes.iter().map(|o| o.identifier.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert!(summary
            .outcomes
            .iter()
            .all(|o| o.status == ActionStatus::SkippedDryRun));
    }

    #[tokio::test]
    async fn test_single_failure_does_not_stop_the_batch() {
        let transport = Arc::new(StatusTransport::new(vec![204, 500, 204]));
        let client = client(Arc::clone(&transport), Arc::new(NullReporter));
        let executor = ActionExecutor::with_settings(&client, ExecutorSettings::undelayed());

        let summary = executor
            .execute(&targets(&["a", "b", "c"]), ActionKind::Follow, false)
            .await;

        assert_eq!(transport.calls(), 3);
        let statuses: Vec<ActionStatus> = summary.outcomes.iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![
                ActionStatus::Succeeded,
                ActionStatus::Failed,
                ActionStatus::Succeeded
            ]
        );
        assert_eq!(summary.outcomes[1].identifier, "b");
        assert!(summary.outcomes[1]
            .detail
            .as_deref()
            .unwrap()
            .contains("scripted failure"));
    }

    #[tokio::test]
    async fn test_empty_targets_is_a_noop_success() {
        let transport = Arc::new(StatusTransport::new(vec![]));
        let client = client(Arc::clone(&transport), Arc::new(NullReporter));
        let executor = ActionExecutor::with_settings(&client, ExecutorSettings::undelayed());

        let summary = executor
            .execute(&IdentifierSet::empty(), ActionKind::Unfollow, false)
            .await;

        assert_eq!(transport.calls(), 0);
        assert_eq!(summary.attempted(), 0);
        assert_eq!(summary.failed(), 0);
    }

    #[tokio::test]
    async fn test_per_item_progress_is_emitted() {
        let transport = Arc::new(StatusTransport::new(vec![204, 204]));
        let reporter = Arc::new(RecordingReporter::new());
        let client = client(Arc::clone(&transport), Arc::clone(&reporter) as _);
        let executor = ActionExecutor::with_settings(&client, ExecutorSettings::undelayed());

        executor
            .execute(&targets(&["a", "b"]), ActionKind::Unfollow, false)
            .await;

        let lines = reporter.messages_with(Severity::Success);
        assert_eq!(lines, vec!["1/2 unfollowed a", "2/2 unfollowed b"]);
    }
}
