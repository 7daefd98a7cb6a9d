use crate::client::ApiError;
use thiserror::Error;

/// Errors returned by [`LeadStore`](super::LeadStore) operations.
///
/// A failed operation never leaves partial state behind in any cache.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The request to the API failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// `flag/list` answered with a different number of flags than identifiers sent.
    #[error("Bulk flag response has {returned} entries for {requested} requested leads")]
    FlagCountMismatch { requested: usize, returned: usize },

    /// A credentialed operation was attempted without a session.
    #[error("Not signed in")]
    NotSignedIn,

    /// `alert/create` succeeded but did not report the new alert's id.
    #[error("Alert creation response carried no id")]
    MissingAlertId,
}

impl StoreError {
    /// The underlying API error, if any.
    #[must_use]
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}
