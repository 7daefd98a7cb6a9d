//! Hit/miss and fetch counters for the store.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct StoreStats {
    lead_hits: AtomicU64,
    lead_misses: AtomicU64,
    page_hits: AtomicU64,
    page_misses: AtomicU64,
    fetches: AtomicU64,
    fetches_joined: AtomicU64,
    fetch_failures: AtomicU64,
}

/// Point-in-time copy of [`StoreStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub lead_hits: u64,
    pub lead_misses: u64,
    pub page_hits: u64,
    pub page_misses: u64,
    /// Network requests issued by the store.
    pub fetches: u64,
    /// Callers that waited on another caller's in-flight fetch.
    pub fetches_joined: u64,
    pub fetch_failures: u64,
}

impl StoreStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_lead_hit(&self) {
        self.lead_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lead_miss(&self) {
        self.lead_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_page_hit(&self) {
        self.page_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_page_miss(&self) {
        self.page_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_joined(&self) {
        self.fetches_joined.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            lead_hits: self.lead_hits.load(Ordering::Relaxed),
            lead_misses: self.lead_misses.load(Ordering::Relaxed),
            page_hits: self.page_hits.load(Ordering::Relaxed),
            page_misses: self.page_misses.load(Ordering::Relaxed),
            fetches: self.fetches.load(Ordering::Relaxed),
            fetches_joined: self.fetches_joined.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
        }
    }
}
