//! Saved alert subscriptions.

use super::{LeadStore, StoreError, StoreEvent};
use crate::types::{Alert, AlertId, AlertMutation, AlertSpec};
use tracing::{debug, trace};

impl LeadStore {
    /// Creates an alert and caches it under the id the server assigned.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotSignedIn`], the API error, or [`StoreError::MissingAlertId`].
    pub async fn create_alert(&self, spec: AlertSpec) -> Result<AlertMutation, StoreError> {
        self.require_session()?;

        self.stats.record_fetch();
        let response = self
            .api
            .create_alert(&spec)
            .await
            .map_err(|e| self.fetch_failed("create_alert", e))?;
        let id = response.id.ok_or(StoreError::MissingAlertId)?;

        self.alerts.store(Alert { id, spec, confirmed: None });
        debug!(alert_id = id, notes = ?response.notes, "alert created");
        self.emit(StoreEvent::AlertStored(id));
        Ok(response)
    }

    /// Saves changes to an existing alert and replaces the cached copy.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotSignedIn`] or the API error.
    pub async fn update_alert(&self, alert: Alert) -> Result<AlertMutation, StoreError> {
        self.require_session()?;

        self.stats.record_fetch();
        let response = self
            .api
            .update_alert(&alert)
            .await
            .map_err(|e| self.fetch_failed("update_alert", e))?;

        let id = alert.id;
        self.alerts.store(alert);
        self.emit(StoreEvent::AlertStored(id));
        Ok(response)
    }

    /// Deletes an alert on the server, then drops it locally.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotSignedIn`] or the API error.
    pub async fn remove_alert(&self, id: AlertId) -> Result<(), StoreError> {
        self.require_session()?;

        self.stats.record_fetch();
        self.api.delete_alert(id).await.map_err(|e| self.fetch_failed("remove_alert", e))?;

        if self.alerts.remove(id).is_some() {
            self.emit(StoreEvent::AlertRemoved(id));
        }
        Ok(())
    }

    /// Loads every alert of the signed-in user into the cache.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotSignedIn`] or the API error.
    pub async fn list_alerts(&self) -> Result<(), StoreError> {
        self.require_session()?;

        self.stats.record_fetch();
        let alerts =
            self.api.list_alerts().await.map_err(|e| self.fetch_failed("list_alerts", e))?;

        debug!(count = alerts.len(), "alerts listed");
        for alert in alerts {
            let id = alert.id;
            self.alerts.store(alert);
            self.emit(StoreEvent::AlertStored(id));
        }
        Ok(())
    }

    /// Ensures one alert is cached. A cached alert is never re-fetched.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotSignedIn`] or the API error.
    pub async fn load_alert(&self, id: AlertId) -> Result<(), StoreError> {
        if self.alerts.contains(id) {
            trace!(alert_id = id, "alert cache hit");
            return Ok(());
        }
        self.require_session()?;

        self.stats.record_fetch();
        let alert =
            self.api.fetch_alert(id).await.map_err(|e| self.fetch_failed("load_alert", e))?;
        let id = alert.id;
        self.alerts.store(alert);
        self.emit(StoreEvent::AlertStored(id));
        Ok(())
    }

    /// Cached alerts ordered by id.
    #[must_use]
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.all()
    }

    #[must_use]
    pub fn find_alert(&self, id: AlertId) -> Option<Alert> {
        self.alerts.get(id)
    }

    pub fn clear_alerts(&self) {
        let removed = self.alerts.clear();
        debug!(count = removed.len(), "alerts cleared");
        self.emit(StoreEvent::AlertsCleared);
    }
}
