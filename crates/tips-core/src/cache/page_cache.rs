//! Paginated filter results, keyed by [`FilterKey`].
//!
//! Entries only hold lead identifiers; the records themselves live in the
//! [`LeadCache`](super::LeadCache). A page that was fetched once is never replaced, so a
//! filter/page pair is immutable until its entry is dropped, which only happens to
//! flagged-mode entries on sign-out.

use crate::{
    cache::FilterKey,
    types::{LeadId, PageMeta},
};
use ahash::RandomState;
use dashmap::DashMap;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Pagination metadata plus every page fetched so far for one filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageEntry {
    pub num_pages: u32,
    pub num_results: u64,
    pages: HashMap<u32, Vec<LeadId>>,
}

impl PageEntry {
    #[must_use]
    pub fn page(&self, page: u32) -> Option<&[LeadId]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    #[must_use]
    pub fn has_page(&self, page: u32) -> bool {
        self.pages.contains_key(&page)
    }

    #[must_use]
    pub fn meta(&self) -> PageMeta {
        PageMeta { page_count: self.num_pages, num_results: self.num_results }
    }
}

#[derive(Debug, Default)]
pub struct PageCache {
    entries: DashMap<FilterKey, PageEntry, RandomState>,
}

impl PageCache {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: DashMap::with_hasher(RandomState::new()) }
    }

    /// Returns `true` once the page has been committed for this key, even if it is empty.
    #[must_use]
    pub fn has_page(&self, key: &FilterKey, page: u32) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.has_page(page))
    }

    /// Identifiers of one page.
    ///
    /// `None` means the page has not been loaded (unknown key or page never fetched);
    /// `Some(vec![])` is a loaded page with no results.
    #[must_use]
    pub fn page_ids(&self, key: &FilterKey, page: u32) -> Option<Vec<LeadId>> {
        let ids = self.entries.get(key).and_then(|entry| entry.page(page).map(<[LeadId]>::to_vec));
        trace!(filter_key = %key, page, hit = ids.is_some(), "page lookup");
        ids
    }

    #[must_use]
    pub fn meta(&self, key: &FilterKey) -> Option<PageMeta> {
        self.entries.get(key).map(|entry| entry.meta())
    }

    /// Records one fetched page.
    ///
    /// Totals are refreshed from every commit; the identifier list of a page that is
    /// already present is kept. Returns `true` if the page was newly stored.
    pub fn commit(
        &self,
        key: &FilterKey,
        page: u32,
        ids: Vec<LeadId>,
        num_pages: u32,
        num_results: u64,
    ) -> bool {
        let mut entry = self.entries.entry(key.clone()).or_default();
        entry.num_pages = num_pages;
        entry.num_results = num_results;

        if entry.pages.contains_key(&page) {
            debug!(filter_key = %key, page, "page already cached, keeping first result");
            return false;
        }

        debug!(filter_key = %key, page, count = ids.len(), num_pages, num_results, "page cached");
        entry.pages.insert(page, ids);
        true
    }

    /// Drops every flagged-mode entry and returns how many keys were removed.
    ///
    /// General result pages are shared by all users and stay cached.
    pub fn remove_flagged(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.is_flagged());
        let removed = before.saturating_sub(self.entries.len());
        debug!(removed, "flagged pages dropped");
        removed
    }

    /// Number of distinct filter keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
