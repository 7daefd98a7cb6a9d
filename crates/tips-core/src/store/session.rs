//! Sign-in state.
//!
//! Signing out drops everything that belongs to the user: flags, flagged-mode pages,
//! recalled queries and alerts. Lead records and general result pages are public and stay
//! cached.

use super::{LeadStore, StoreError, StoreEvent};
use tracing::{info, warn};

impl LeadStore {
    /// Exchanges an identity token for a session.
    ///
    /// # Errors
    ///
    /// The API error if the server rejects the token or returns no session cookie.
    pub async fn sign_in(&self, id_token: &str) -> Result<(), StoreError> {
        self.api.sign_in(id_token).await.map_err(|e| self.fetch_failed("sign_in", e))?;
        info!("signed in");
        Ok(())
    }

    /// Ends the session and clears user-specific state.
    ///
    /// Local state is cleared even when the server call fails.
    ///
    /// # Errors
    ///
    /// The API error from `auth/signout`.
    pub async fn sign_out(&self) -> Result<(), StoreError> {
        let result = self.api.sign_out().await;

        self.clear_all_flags();
        if self.pages.remove_flagged() > 0 {
            self.emit(StoreEvent::FlaggedPagesCleared);
        }
        self.recall.clear();
        self.clear_alerts();

        match result {
            Ok(()) => {
                info!("signed out");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "sign-out request failed, local session dropped");
                Err(self.fetch_failed("sign_out", e))
            }
        }
    }

    #[must_use]
    pub fn signed_in(&self) -> bool {
        self.api.has_session()
    }
}
