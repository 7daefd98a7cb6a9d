//! Lead and page loading.

use super::{LeadStore, StoreError, StoreEvent};
use crate::{
    cache::{FetchKey, FilterKey},
    types::{FilterPageResponse, FilterParams, Lead, LeadId, PageMeta},
};
use tracing::{debug, trace};

impl LeadStore {
    /// The cached lead, if present. Never touches the network.
    #[must_use]
    pub fn get(&self, id: LeadId) -> Option<Lead> {
        self.leads.get(id)
    }

    /// Alias for [`get`](Self::get).
    #[must_use]
    pub fn find(&self, id: LeadId) -> Option<Lead> {
        self.get(id)
    }

    /// Inserts or replaces one lead record, flag included.
    pub fn store(&self, lead: Lead) {
        let id = lead.id;
        self.leads.store(lead);
        self.emit(StoreEvent::LeadStored(id));
    }

    /// Ensures the lead is cached, fetching `lead/{id}` at most once.
    ///
    /// Returns immediately on a cache hit. Concurrent calls for the same id share one
    /// request.
    ///
    /// # Errors
    ///
    /// Returns the API error if the fetch fails. Nothing is cached in that case and a later
    /// call will try again.
    pub async fn load_by_id(&self, id: LeadId) -> Result<(), StoreError> {
        if self.leads.contains(id) {
            self.stats.record_lead_hit();
            trace!(lead_id = id, "lead cache hit");
            return Ok(());
        }
        self.stats.record_lead_miss();

        let guard = self.inflight.begin(FetchKey::Lead(id)).await;
        if guard.joined() {
            self.stats.record_joined();
        }
        if self.leads.contains(id) {
            trace!(lead_id = id, "lead loaded by concurrent fetch");
            return Ok(());
        }

        self.stats.record_fetch();
        let lead = self.api.fetch_lead(id).await.map_err(|e| self.fetch_failed("load_by_id", e))?;
        if lead.id != id {
            debug!(requested = id, returned = lead.id, "lead endpoint returned a different id");
        }
        self.store(lead);
        drop(guard);
        Ok(())
    }

    /// Ensures one page of results for `params` in the given mode is cached.
    ///
    /// Every lead in the response is stored, then the page's identifier list and the
    /// filter's totals are committed. Flagged mode requires a session and marks the returned
    /// leads as flagged.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotSignedIn`] for flagged mode without a session, or the API error if
    /// the fetch fails. Nothing is committed on failure.
    pub async fn filter(
        &self,
        params: &FilterParams,
        page: u32,
        flagged: bool,
    ) -> Result<(), StoreError> {
        if flagged {
            self.require_session()?;
        }

        let key = FilterKey::for_mode(params, flagged);
        if self.pages.has_page(&key, page) {
            self.stats.record_page_hit();
            trace!(filter_key = %key, page, "page cache hit");
            return Ok(());
        }
        self.stats.record_page_miss();

        let guard = self.inflight.begin(FetchKey::Page(key.clone(), page)).await;
        if guard.joined() {
            self.stats.record_joined();
        }
        if self.pages.has_page(&key, page) {
            trace!(filter_key = %key, page, "page loaded by concurrent fetch");
            return Ok(());
        }

        self.stats.record_fetch();
        let response = self
            .api
            .fetch_page(params, page, flagged)
            .await
            .map_err(|e| self.fetch_failed("filter", e))?;
        self.commit_page(&key, page, response, flagged);
        drop(guard);
        Ok(())
    }

    fn commit_page(&self, key: &FilterKey, page: u32, response: FilterPageResponse, flagged: bool) {
        let FilterPageResponse { leads, num_pages, num_results } = response;
        let ids: Vec<LeadId> = leads.iter().map(|lead| lead.id).collect();

        for mut lead in leads {
            if flagged {
                lead.flagged = true;
            }
            self.store(lead);
        }

        if self.pages.commit(key, page, ids, num_pages, num_results) {
            self.emit(StoreEvent::PageStored { key: key.clone(), page });
        }
    }

    /// Records `params` as the last query for the mode and loads its first page.
    ///
    /// Empty text values are dropped first, so `{q: ""}` submits as `{}`.
    ///
    /// # Errors
    ///
    /// Same as [`filter`](Self::filter). The query is remembered even if the fetch fails.
    pub async fn submit(&self, params: FilterParams, flagged: bool) -> Result<(), StoreError> {
        let params = params.without_empty_text();
        self.set_last_query(flagged, params.clone());
        self.filter(&params, 1, flagged).await
    }

    /// Identifiers on a loaded page, in server order.
    ///
    /// `None` means the page has not been loaded; a loaded page with no results is
    /// `Some(vec![])`.
    #[must_use]
    pub fn page_entities(
        &self,
        params: &FilterParams,
        page: u32,
        flagged: bool,
    ) -> Option<Vec<LeadId>> {
        self.pages.page_ids(&FilterKey::for_mode(params, flagged), page)
    }

    /// Totals for a filter, if any page of it has been loaded.
    #[must_use]
    pub fn page_meta(&self, params: &FilterParams, flagged: bool) -> Option<PageMeta> {
        self.pages.meta(&FilterKey::for_mode(params, flagged))
    }

    /// The records on a loaded page, resolved through the lead cache.
    #[must_use]
    pub fn page(&self, params: &FilterParams, page: u32, flagged: bool) -> Option<Vec<Lead>> {
        let ids = self.page_entities(params, page, flagged)?;
        Some(ids.into_iter().filter_map(|id| self.leads.get(id)).collect())
    }

    pub fn set_last_query(&self, flagged: bool, query: FilterParams) {
        self.recall.set(flagged, query);
        self.emit(StoreEvent::QueryRecalled { flagged });
    }

    /// The most recent query for the mode; empty if none was recorded.
    #[must_use]
    pub fn last_query(&self, flagged: bool) -> FilterParams {
        self.recall.get(flagged)
    }
}
