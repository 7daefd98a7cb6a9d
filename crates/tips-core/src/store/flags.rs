//! The per-user flag overlay.
//!
//! Flags live on the cached [`Lead`](crate::types::Lead) records and are refreshed in bulk
//! without touching any other field.

use super::{LeadStore, StoreError, StoreEvent};
use crate::types::LeadId;
use tracing::{debug, error, info};

impl LeadStore {
    /// Sets or clears the flag for one lead on the server, then mirrors it locally.
    ///
    /// The local bit is only changed after the server accepts the update. A lead that is
    /// not cached is updated remotely and picked up by the next load.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotSignedIn`] without a session, or the API error.
    pub async fn update_flag(&self, id: LeadId, flagged: bool) -> Result<(), StoreError> {
        self.require_session()?;

        self.stats.record_fetch();
        self.api.put_flag(id, flagged).await.map_err(|e| self.fetch_failed("update_flag", e))?;

        if self.leads.set_flag(id, flagged) {
            self.emit(StoreEvent::FlagChanged { id, flagged });
        } else {
            debug!(lead_id = id, flagged, "flag updated for uncached lead");
        }
        Ok(())
    }

    /// Re-reads the flag for every cached lead with one `flag/list` request.
    ///
    /// Identifiers are sent in ascending order and the response is applied positionally.
    /// With no cached leads no request is made.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotSignedIn`] without a session, the API error, or
    /// [`StoreError::FlagCountMismatch`] if the response length differs from the request.
    /// No flag is changed on error.
    pub async fn refresh_all_flags(&self) -> Result<(), StoreError> {
        self.require_session()?;

        let ids = self.leads.ids();
        if ids.is_empty() {
            debug!("no cached leads, skipping flag refresh");
            return Ok(());
        }

        self.stats.record_fetch();
        let flags = self
            .api
            .fetch_flags(&ids)
            .await
            .map_err(|e| self.fetch_failed("refresh_all_flags", e))?;

        if flags.len() != ids.len() {
            self.stats.record_failure();
            error!(requested = ids.len(), returned = flags.len(), "flag list length mismatch");
            return Err(StoreError::FlagCountMismatch {
                requested: ids.len(),
                returned: flags.len(),
            });
        }

        let mut changed = 0usize;
        for (id, flagged) in ids.iter().copied().zip(flags) {
            let before = self.leads.get(id).map(|lead| lead.flagged);
            if self.leads.set_flag(id, flagged) && before != Some(flagged) {
                changed += 1;
                self.emit(StoreEvent::FlagChanged { id, flagged });
            }
        }

        info!(count = ids.len(), changed, "flags refreshed");
        Ok(())
    }

    /// Resets every cached lead's flag to `false`. Local only.
    pub fn clear_all_flags(&self) {
        let cleared = self.leads.clear_flags();
        debug!(cleared, "flags cleared");
        self.emit(StoreEvent::FlagsCleared);
    }
}
