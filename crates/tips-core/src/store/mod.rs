//! The lead store: normalized caches plus the fetch orchestration around them.
//!
//! [`LeadStore`] is the single owner of every cache in [`crate::cache`]. Each loading
//! operation follows the same shape:
//!
//! 1. check the cache and return on a hit without touching the network
//! 2. register the fetch in the [`InflightRegistry`] so concurrent callers share it
//! 3. re-check the cache once the fetch slot is ours
//! 4. issue the request and commit the whole response at once, or nothing on failure
//!
//! Observers can [`subscribe`](LeadStore::subscribe) to [`StoreEvent`]s emitted after each
//! commit.

pub mod alerts;
pub mod errors;
pub mod events;
pub mod flags;
pub mod leads;
pub mod session;

pub use errors::StoreError;
pub use events::StoreEvent;

use crate::{
    cache::{
        AlertCache, InflightRegistry, LeadCache, PageCache, QueryRecall, StatsSnapshot,
        StoreStats,
    },
    client::{ApiClient, ApiError, HttpClient},
    config::AppConfig,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::error;

const EVENT_CHANNEL_CAPACITY: usize = 256;

pub struct LeadStore {
    api: Arc<ApiClient>,
    leads: LeadCache,
    pages: PageCache,
    recall: QueryRecall,
    alerts: AlertCache,
    inflight: InflightRegistry,
    stats: StoreStats,
    events: broadcast::Sender<StoreEvent>,
}

impl LeadStore {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self::with_api(Arc::new(api))
    }

    #[must_use]
    pub fn with_api(api: Arc<ApiClient>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            leads: LeadCache::new(),
            pages: PageCache::new(),
            recall: QueryRecall::new(),
            alerts: AlertCache::new(),
            inflight: InflightRegistry::new(),
            stats: StoreStats::new(),
            events,
        }
    }

    /// Builds a store whose client is configured from the `[api]` section.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let http = HttpClient::with_config(&config.api.base_url, config.http_client_config())?;
        Ok(Self::new(ApiClient::new(http)))
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Registers a new observer. Events sent before this call are not replayed.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    #[must_use]
    pub fn lead_count(&self) -> usize {
        self.leads.len()
    }

    /// Number of distinct filter keys with at least one loaded page.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of fetches currently outstanding.
    #[must_use]
    pub fn inflight_count(&self) -> usize {
        self.inflight.len()
    }

    fn emit(&self, event: StoreEvent) {
        // No receivers is the normal case outside of a UI.
        let _ = self.events.send(event);
    }

    fn require_session(&self) -> Result<(), StoreError> {
        if self.api.has_session() {
            Ok(())
        } else {
            Err(StoreError::NotSignedIn)
        }
    }

    fn fetch_failed(&self, operation: &'static str, err: ApiError) -> StoreError {
        self.stats.record_failure();
        error!(operation, error = %err, "request failed");
        StoreError::Api(err)
    }
}
