//! Normalized lead storage keyed by identifier.
//!
//! This is the single place lead records live. Page entries and the flag overlay only
//! ever refer to leads by identifier.

use crate::types::{Lead, LeadId};
use ahash::RandomState;
use dashmap::DashMap;
use tracing::trace;

/// Identifier → lead map with process-lifetime retention.
#[derive(Debug, Default)]
pub struct LeadCache {
    leads: DashMap<LeadId, Lead, RandomState>,
}

impl LeadCache {
    #[must_use]
    pub fn new() -> Self {
        Self { leads: DashMap::with_hasher(RandomState::new()) }
    }

    /// Returns a copy of the cached lead. Never triggers a fetch.
    #[must_use]
    pub fn get(&self, id: LeadId) -> Option<Lead> {
        self.leads.get(&id).map(|lead| lead.value().clone())
    }

    #[must_use]
    pub fn contains(&self, id: LeadId) -> bool {
        self.leads.contains_key(&id)
    }

    /// Upserts a lead, replacing the whole previous record.
    pub fn store(&self, lead: Lead) -> Option<Lead> {
        trace!(lead_id = lead.id, "storing lead");
        self.leads.insert(lead.id, lead)
    }

    /// Sets the flag of a resident lead. Returns `false` if the lead is not cached.
    pub fn set_flag(&self, id: LeadId, flagged: bool) -> bool {
        match self.leads.get_mut(&id) {
            Some(mut lead) => {
                lead.flagged = flagged;
                true
            }
            None => false,
        }
    }

    /// Identifiers of every resident lead, in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<LeadId> {
        let mut ids: Vec<LeadId> = self.leads.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// Clears the flag of every resident lead and returns how many were flagged.
    pub fn clear_flags(&self) -> usize {
        let mut cleared = 0;
        for mut lead in self.leads.iter_mut() {
            if lead.flagged {
                lead.flagged = false;
                cleared += 1;
            }
        }
        cleared
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.leads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }
}
