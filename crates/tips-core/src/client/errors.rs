use thiserror::Error;

/// Errors that can occur when talking to the leads API.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// Request exceeded the configured timeout, or no concurrency permit became available.
    #[error("Request timeout")]
    Timeout,

    /// Failed to establish a connection to the API host.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Non-2xx response.
    ///
    /// First field is the HTTP status code, second is the (truncated) response body.
    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    /// Network-level error from the underlying HTTP client.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body could not be decoded or violated the endpoint contract.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The API base URL or a request path could not be turned into a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The client's concurrency limiter is closed.
    #[error("Concurrency limit reached: {0}")]
    ConcurrencyLimit(String),
}

impl ApiError {
    /// HTTP status code, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(status, _) => Some(*status),
            Self::Network(e) => e.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// `true` when the server rejected the request for lack of a session.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if repeating the request later might succeed.
    ///
    /// The store never retries; this is for callers that want to.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout | Self::Network(_) | Self::ConnectionFailed(_) => true,
            Self::Http(status, _) => (500..=599).contains(status) || *status == 429,
            _ => false,
        }
    }
}
