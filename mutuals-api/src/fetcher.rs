//! Paginated fetching of follower/following sets.
//!
//! Drives repeated page calls through the client until the platform
//! returns an empty page, then normalizes the accumulated raw handles
//! into an [`IdentifierSet`]. Pages are fetched eagerly and fully before
//! any reconciliation happens.

use std::fmt;

use tracing::{debug, instrument};

use mutuals_core::IdentifierSet;

use crate::client::ApiClient;
use crate::error::ApiError;

/// Page size for relation list endpoints.
const PAGE_SIZE: u32 = 100;

// ============================================================================
// Relation Kind
// ============================================================================

/// Which directed relation set to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Accounts following the subject.
    Followers,
    /// Accounts the subject follows.
    Following,
}

impl RelationKind {
    /// URL path segment for this relation.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Followers => "followers",
            Self::Following => "following",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

// ============================================================================
// Set Fetcher
// ============================================================================

/// Fetches complete, deduplicated relation sets for one subject.
pub struct SetFetcher<'a> {
    client: &'a ApiClient,
}

impl<'a> SetFetcher<'a> {
    /// Creates a fetcher over the given client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetches every page of the subject's relation set.
    ///
    /// Starts at page 1 and stops at the first page from which no handles
    /// could be extracted; that empty page is the termination signal, not
    /// an error. Any failed page call aborts the whole fetch so callers
    /// never reconcile against a partial set.
    #[instrument(skip(self), fields(subject = %subject, relation = %kind))]
    pub async fn fetch_all(
        &self,
        subject: &str,
        kind: RelationKind,
    ) -> Result<IdentifierSet, ApiError> {
        let reporter = self.client.reporter();
        let mut raw: Vec<String> = Vec::new();
        let mut page = 1;

        loop {
            let entries = self
                .client
                .relation_page(subject, kind.path_segment(), page, PAGE_SIZE)
                .await?;
            debug!(page, count = entries.len(), "Fetched relation page");

            if entries.is_empty() {
                break;
            }
            raw.extend(entries);
            reporter.info(&format!("Fetching {kind}: {} so far (page {page})", raw.len()));
            page += 1;
        }

        let set = IdentifierSet::from_raw(raw);
        reporter.success(&format!("Fetched {} {kind} for {subject}", set.len()));
        Ok(set)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientSettings;
    use crate::error::ApiError;
    use crate::http::{ApiRequest, HttpTransport, RawResponse};
    use async_trait::async_trait;
    use mutuals_core::{NullReporter, RecordingReporter, Reporter, Severity};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct PagedTransport {
        pages: Mutex<Vec<RawResponse>>,
        calls: AtomicUsize,
        requests: Mutex<Vec<String>>,
    }

    impl PagedTransport {
        fn new(pages: Vec<&str>) -> Self {
            let pages = pages
                .into_iter()
                .map(|body| RawResponse {
                    status: 200,
                    body: body.to_string(),
                    headers: Vec::new(),
                })
                .collect();
            Self {
                pages: Mutex::new(pages),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HttpTransport for PagedTransport {
        async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.url);
            let mut pages = self.pages.lock().unwrap();
            if pages.is_empty() {
                return Err(ApiError::Transport("script exhausted".to_string()));
            }
            Ok(pages.remove(0))
        }
    }

    fn client_over(transport: Arc<PagedTransport>, reporter: Arc<dyn Reporter>) -> ApiClient {
        ApiClient::with_settings(
            transport,
            "token",
            reporter,
            ClientSettings::undelayed("https://api.github.com"),
        )
    }

    #[tokio::test]
    async fn test_pagination_terminates_on_empty_page() {
        // Two non-empty pages, then an empty one: exactly three calls.
        let transport = Arc::new(PagedTransport::new(vec![
            r#"[{"login": "a"}, {"login": "b"}]"#,
            r#"[{"login": "c"}]"#,
            "[]",
        ]));
        let client = client_over(Arc::clone(&transport), Arc::new(NullReporter));

        let set = SetFetcher::new(&client)
            .fetch_all("me", RelationKind::Followers)
            .await
            .unwrap();

        assert_eq!(transport.calls(), 3);
        assert_eq!(set.len(), 3);
        assert!(set.contains_str("a"));
        assert!(set.contains_str("c"));
    }

    #[tokio::test]
    async fn test_unparseable_page_terminates_without_error() {
        let transport = Arc::new(PagedTransport::new(vec![
            r#"[{"login": "a"}]"#,
            r#"{"message": "pagination exhausted"}"#,
        ]));
        let client = client_over(Arc::clone(&transport), Arc::new(NullReporter));

        let set = SetFetcher::new(&client)
            .fetch_all("me", RelationKind::Following)
            .await
            .unwrap();

        assert_eq!(transport.calls(), 2);
        assert_eq!(set.len(), 1);
    }

    #[tokio::test]
    async fn test_page_error_aborts_fetch() {
        // Second call hits an exhausted script, which surfaces as an error.
        let transport = Arc::new(PagedTransport::new(vec![r#"[{"login": "a"}]"#]));
        let client = client_over(Arc::clone(&transport), Arc::new(NullReporter));

        let result = SetFetcher::new(&client)
            .fetch_all("me", RelationKind::Followers)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_raw_entries_are_cleaned_and_deduplicated() {
        let transport = Arc::new(PagedTransport::new(vec![
            r#"[{"login": "bob"}, {"login": "bob"}, {"login": " bob\r"}, {"login": ""}]"#,
            "[]",
        ]));
        let client = client_over(Arc::clone(&transport), Arc::new(NullReporter));

        let set = SetFetcher::new(&client)
            .fetch_all("me", RelationKind::Followers)
            .await
            .unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains_str("bob"));
    }

    #[tokio::test]
    async fn test_progress_reported_per_page_and_on_completion() {
        let transport = Arc::new(PagedTransport::new(vec![
            r#"[{"login": "a"}]"#,
            r#"[{"login": "b"}]"#,
            "[]",
        ]));
        let reporter = Arc::new(RecordingReporter::new());
        let client = client_over(Arc::clone(&transport), Arc::clone(&reporter) as _);

        SetFetcher::new(&client)
            .fetch_all("me", RelationKind::Followers)
            .await
            .unwrap();

        let progress = reporter.messages_with(Severity::Info);
        assert_eq!(progress.len(), 2);
        assert!(progress[0].contains("page 1"));
        assert!(progress[1].contains("2 so far"));

        let done = reporter.messages_with(Severity::Success);
        assert_eq!(done.len(), 1);
        assert!(done[0].contains("2 followers"));
    }

    #[tokio::test]
    async fn test_request_urls_carry_page_and_size() {
        let transport = Arc::new(PagedTransport::new(vec![r#"[{"login": "a"}]"#, "[]"]));
        let client = client_over(Arc::clone(&transport), Arc::new(NullReporter));

        SetFetcher::new(&client)
            .fetch_all("me", RelationKind::Following)
            .await
            .unwrap();

        let requests = transport.requests.lock().unwrap();
        assert!(requests[0].ends_with("/users/me/following?per_page=100&page=1"));
        assert!(requests[1].ends_with("/users/me/following?per_page=100&page=2"));
    }
}
