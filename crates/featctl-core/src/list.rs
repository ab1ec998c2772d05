//! Feature list controller — pagination, keyword search, tab filter.
//!
//! The source console scattered this state across independent callback
//! closures; here it is one struct with named transitions. Two policies
//! are deliberate:
//!
//! - Editing the query never fetches. Only an explicit search
//!   submission (button / Enter), a page change, or a tab change hits
//!   the backend, so typing alone never re-queries.
//! - Fetches are tagged with a monotonic sequence number and responses
//!   applying under a stale sequence are discarded, so the newest
//!   request wins rather than whichever response lands last.

use tracing::{debug, warn};

use featctl_api::{Error as ApiError, Feature, FeatureId, FeaturePage, RegistryClient};

use crate::notice::Notice;

/// Rows requested per page unless the consumer overrides it.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Coarse ownership filter above the table.
///
/// Tab-specific filtering is a placeholder: switching tabs re-fetches
/// but does not yet alter the request sent to the backend.
// TODO: scope the list request by owner once the registry grows an
// owner-filter query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureTab {
    /// Features owned by the current user.
    #[default]
    Mine,
    /// Every feature in the store.
    All,
}

impl FeatureTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Mine => "My Features",
            Self::All => "All Features",
        }
    }
}

/// View state for the paginated feature table.
pub struct FeatureList {
    page: u32,
    limit: u32,
    total: u64,
    query: String,
    tab: FeatureTab,
    rows: Vec<Feature>,
    loading: bool,
    fetch_seq: u64,
    notices: Vec<Notice>,
    last_error: Option<ApiError>,
}

impl Default for FeatureList {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureList {
    /// A fresh list: page 1, default page size, empty query, `Mine` tab.
    /// Call [`refresh`](Self::refresh) once after construction for the
    /// initial mount fetch.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            total: 0,
            query: String::new(),
            tab: FeatureTab::default(),
            rows: Vec::new(),
            loading: false,
            fetch_seq: 0,
            notices: Vec::new(),
            last_error: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn rows(&self) -> &[Feature] {
        &self.rows
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Total matching records as reported by the backend.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn tab(&self) -> FeatureTab {
        self.tab
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Drain accumulated notices for the UI to render.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Take the structured error from the most recent completed fetch,
    /// if it failed. Cleared by the next successful fetch. Notices
    /// carry the user-facing text; this keeps the typed error for
    /// callers that route failures by kind (status, transport).
    pub fn take_last_error(&mut self) -> Option<ApiError> {
        self.last_error.take()
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Update the keyword filter. Deliberately does not fetch: the
    /// query only takes effect on [`submit_search`](Self::submit_search)
    /// or the next page/tab change.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Explicit search action (button click or Enter): reset to the
    /// first page and fetch with the current query.
    pub async fn submit_search(&mut self, client: &RegistryClient) {
        self.page = 1;
        self.refresh(client).await;
    }

    /// Jump to a page and fetch it. `None` reuses the previous page.
    pub async fn go_to_page(&mut self, client: &RegistryClient, page: Option<u32>) {
        if let Some(p) = page {
            self.page = p.max(1);
        }
        self.refresh(client).await;
    }

    /// Set the tab without fetching. For interactive consumers a tab
    /// change goes through [`select_tab`](Self::select_tab); this is
    /// for choosing the initial tab before the first fetch.
    pub fn set_tab(&mut self, tab: FeatureTab) {
        self.tab = tab;
    }

    /// Switch tabs and re-fetch.
    pub async fn select_tab(&mut self, client: &RegistryClient, tab: FeatureTab) {
        self.tab = tab;
        self.refresh(client).await;
    }

    /// Fetch the current page with the current query.
    pub async fn refresh(&mut self, client: &RegistryClient) {
        let seq = self.begin_fetch();
        let result = client.list(self.page, self.limit, &self.query).await;
        self.apply_fetch(seq, result);
    }

    /// Row-level delete. The outcome becomes a notice either way, and
    /// the list is then unconditionally re-fetched so the rows reflect
    /// server truth — no in-memory row removal, no full-page reload.
    /// The delete outcome is also returned so callers can route a
    /// failure by kind rather than by notice text.
    pub async fn delete(
        &mut self,
        client: &RegistryClient,
        id: &FeatureId,
    ) -> Result<(), ApiError> {
        let outcome = client.delete(id).await;
        match &outcome {
            Ok(()) => self.notices.push(Notice::success(format!("Feature {id} deleted"))),
            Err(err) => {
                warn!(%id, %err, "delete failed");
                self.notices
                    .push(Notice::error(format!("Failed to delete feature {id}: {err}")));
            }
        }
        self.refresh(client).await;
        outcome
    }

    // ── Fetch sequencing ─────────────────────────────────────────────
    //
    // Split out so an event-loop consumer can overlap requests: tag
    // each in-flight fetch with `begin_fetch`, apply results through
    // `apply_fetch`, and stale responses fall on the floor.

    /// Mark a fetch as started and return its sequence tag.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.loading = true;
        self.fetch_seq
    }

    /// Apply a fetch result. Ignored unless `seq` is the newest fetch.
    /// `loading` clears on success and failure alike; a failed fetch
    /// keeps the previous rows and pushes an error notice.
    pub fn apply_fetch(&mut self, seq: u64, result: Result<FeaturePage, ApiError>) {
        if seq != self.fetch_seq {
            debug!(seq, newest = self.fetch_seq, "discarding stale list response");
            return;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.total = page.total;
                self.rows = page.items;
                self.last_error = None;
            }
            Err(err) => {
                warn!(%err, "feature list fetch failed");
                self.notices
                    .push(Notice::error(format!("Failed to load features: {err}")));
                self.last_error = Some(err);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notice::NoticeLevel;

    fn page_of(names: &[&str]) -> FeaturePage {
        let items = names
            .iter()
            .enumerate()
            .map(|(i, n)| Feature {
                id: Some(FeatureId::from(format!("f-{i}"))),
                ..Feature::named(*n)
            })
            .collect::<Vec<_>>();
        let total = items.len() as u64;
        FeaturePage { items, total }
    }

    #[test]
    fn set_query_does_not_touch_rows_or_loading() {
        let mut list = FeatureList::new();
        list.set_query("trips");
        assert_eq!(list.query(), "trips");
        assert!(!list.is_loading());
        assert!(list.rows().is_empty());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut list = FeatureList::new();

        let old_seq = list.begin_fetch();
        let new_seq = list.begin_fetch();

        list.apply_fetch(new_seq, Ok(page_of(&["fresh"])));
        list.apply_fetch(old_seq, Ok(page_of(&["stale_a", "stale_b"])));

        assert_eq!(list.rows().len(), 1);
        assert_eq!(list.rows()[0].name, "fresh");
    }

    #[test]
    fn stale_response_does_not_resurrect_loading() {
        let mut list = FeatureList::new();

        let old_seq = list.begin_fetch();
        let new_seq = list.begin_fetch();
        list.apply_fetch(new_seq, Ok(page_of(&["fresh"])));
        assert!(!list.is_loading());

        list.apply_fetch(old_seq, Ok(page_of(&["stale"])));
        assert!(!list.is_loading());
    }

    #[test]
    fn failed_fetch_keeps_rows_and_clears_loading() {
        let mut list = FeatureList::new();

        let seq = list.begin_fetch();
        list.apply_fetch(seq, Ok(page_of(&["kept"])));

        let seq = list.begin_fetch();
        assert!(list.is_loading());
        list.apply_fetch(
            seq,
            Err(ApiError::Api {
                status: 500,
                body: "boom".into(),
            }),
        );

        assert!(!list.is_loading());
        assert_eq!(list.rows().len(), 1);
        assert_eq!(list.rows()[0].name, "kept");

        let notices = list.drain_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[test]
    fn failed_fetch_keeps_the_typed_error() {
        let mut list = FeatureList::new();
        let seq = list.begin_fetch();
        list.apply_fetch(
            seq,
            Err(ApiError::Api {
                status: 503,
                body: "unavailable".into(),
            }),
        );

        let err = list.take_last_error().unwrap();
        assert_eq!(err.status(), Some(503));
        // take_last_error drains; a second call yields nothing.
        assert!(list.take_last_error().is_none());
    }

    #[test]
    fn successful_fetch_clears_last_error() {
        let mut list = FeatureList::new();
        let seq = list.begin_fetch();
        list.apply_fetch(
            seq,
            Err(ApiError::Api {
                status: 500,
                body: "boom".into(),
            }),
        );

        let seq = list.begin_fetch();
        list.apply_fetch(seq, Ok(page_of(&["recovered"])));
        assert!(list.take_last_error().is_none());
    }

    #[test]
    fn set_tab_does_not_fetch_or_spin() {
        let mut list = FeatureList::new();
        list.set_tab(FeatureTab::All);
        assert_eq!(list.tab(), FeatureTab::All);
        assert!(!list.is_loading());
        assert!(list.rows().is_empty());
    }

    #[test]
    fn total_tracks_backend_count() {
        let mut list = FeatureList::new();
        let seq = list.begin_fetch();
        list.apply_fetch(
            seq,
            Ok(FeaturePage {
                items: page_of(&["a", "b"]).items,
                total: 37,
            }),
        );
        assert_eq!(list.total(), 37);
    }

    #[test]
    fn drain_notices_empties_the_queue() {
        let mut list = FeatureList::new();
        let seq = list.begin_fetch();
        list.apply_fetch(
            seq,
            Err(ApiError::Api {
                status: 500,
                body: "boom".into(),
            }),
        );
        assert_eq!(list.drain_notices().len(), 1);
        assert!(list.drain_notices().is_empty());
    }
}
