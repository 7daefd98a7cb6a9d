//! Change notifications for view layers that re-render on cache updates.

use crate::{
    cache::FilterKey,
    types::{AlertId, LeadId},
};

/// A committed change to one of the store's caches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    LeadStored(LeadId),
    PageStored { key: FilterKey, page: u32 },
    FlagChanged { id: LeadId, flagged: bool },
    FlagsCleared,
    FlaggedPagesCleared,
    QueryRecalled { flagged: bool },
    AlertStored(AlertId),
    AlertRemoved(AlertId),
    AlertsCleared,
}
