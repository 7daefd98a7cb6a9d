//! Cached alert subscriptions of the signed-in user.

use crate::types::{Alert, AlertId};
use ahash::RandomState;
use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct AlertCache {
    alerts: DashMap<AlertId, Alert, RandomState>,
}

impl AlertCache {
    #[must_use]
    pub fn new() -> Self {
        Self { alerts: DashMap::with_hasher(RandomState::new()) }
    }

    #[must_use]
    pub fn get(&self, id: AlertId) -> Option<Alert> {
        self.alerts.get(&id).map(|alert| alert.value().clone())
    }

    #[must_use]
    pub fn contains(&self, id: AlertId) -> bool {
        self.alerts.contains_key(&id)
    }

    pub fn store(&self, alert: Alert) {
        self.alerts.insert(alert.id, alert);
    }

    pub fn remove(&self, id: AlertId) -> Option<Alert> {
        self.alerts.remove(&id).map(|(_, alert)| alert)
    }

    /// Every cached alert, ordered by id.
    #[must_use]
    pub fn all(&self) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = self.alerts.iter().map(|entry| entry.value().clone()).collect();
        alerts.sort_by_key(|alert| alert.id);
        alerts
    }

    /// Drops every alert and returns the removed identifiers.
    pub fn clear(&self) -> Vec<AlertId> {
        let ids: Vec<AlertId> = self.alerts.iter().map(|entry| *entry.key()).collect();
        for id in &ids {
            self.alerts.remove(id);
        }
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
