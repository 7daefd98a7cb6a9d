use crate::client::ApiError;
use parking_lot::RwLock;
use reqwest::{header, Client, ClientBuilder, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::{sync::Arc, time::Duration};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use url::Url;

/// Maximum number of response-body characters kept in [`ApiError::Http`].
const MAX_ERROR_BODY_CHARS: usize = 256;

/// Whether a request carries the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    Omit,
    Include,
}

/// Configuration for HTTP client concurrency and timeout behavior.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Maximum number of concurrent requests allowed
    pub concurrent_limit: usize,
    /// Permit acquisition timeout in milliseconds
    pub permit_timeout_ms: u64,
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            concurrent_limit: 64,
            permit_timeout_ms: 500,
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            user_agent: concat!("tips-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP client bound to the API base URL, with semaphore-based concurrency control and
/// an optional session cookie for credentialed requests.
///
/// No retries are performed; every failure is returned to the caller as-is.
pub struct HttpClient {
    client: Client,
    base_url: Url,
    concurrent_limit: Arc<Semaphore>,
    config: HttpClientConfig,
    session_cookie: RwLock<Option<String>>,
}

/// RAII guard ensuring semaphore permits are always released.
struct PermitGuard {
    _permit: OwnedSemaphorePermit,
    semaphore: Arc<Semaphore>,
}

impl PermitGuard {
    fn new(permit: OwnedSemaphorePermit, semaphore: Arc<Semaphore>) -> Self {
        Self { _permit: permit, semaphore }
    }

    fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}

impl Drop for PermitGuard {
    fn drop(&mut self) {
        tracing::trace!(
            available_permits = self.semaphore.available_permits(),
            "permit guard dropped"
        );
    }
}

impl HttpClient {
    /// Creates a client for `base_url` with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the reqwest client fails to build.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_config(base_url, HttpClientConfig::default())
    }

    /// Creates a client for `base_url` with the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the reqwest client fails to build.
    pub fn with_config(base_url: &str, config: HttpClientConfig) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;

        let client = ClientBuilder::new()
            .pool_idle_timeout(Duration::from_secs(30))
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .use_rustls_tls()
            .user_agent(config.user_agent.as_str())
            .tcp_nodelay(true)
            .build()
            .map_err(|e| {
                tracing::error!(error = %e, "failed to build http client");
                ApiError::ConnectionFailed(format!("HTTP client build failed: {e}"))
            })?;

        Ok(Self {
            client,
            base_url,
            concurrent_limit: Arc::new(Semaphore::new(config.concurrent_limit)),
            config,
            session_cookie: RwLock::new(None),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an API path (e.g. `lead/7`) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the path cannot be joined.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Replaces the session cookie sent with credentialed requests.
    pub fn set_session_cookie(&self, cookie: Option<String>) {
        *self.session_cookie.write() = cookie;
    }

    #[must_use]
    pub fn has_session(&self) -> bool {
        self.session_cookie.read().is_some()
    }

    /// Sanitizes network errors to prevent information disclosure.
    fn sanitize_network_error(error: &reqwest::Error) -> String {
        if error.is_connect() {
            "connection refused or unreachable".to_string()
        } else if error.is_timeout() {
            "connection timed out".to_string()
        } else if error.is_request() {
            "request failed".to_string()
        } else if error.is_body() {
            "response body error".to_string()
        } else if error.is_redirect() {
            "too many redirects".to_string()
        } else {
            "network error".to_string()
        }
    }

    /// Starts a request for `path`, attaching the session cookie when asked to.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        credentials: Credentials,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        let mut builder = self.client.request(method, url);

        if credentials == Credentials::Include {
            if let Some(cookie) = self.session_cookie.read().as_deref() {
                builder = builder.header(header::COOKIE, cookie);
            }
        }

        Ok(builder)
    }

    /// Sends a request under the concurrency limit and maps non-2xx responses to errors.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Timeout`] if permit acquisition or the request times out
    /// - [`ApiError::ConcurrencyLimit`] if the semaphore is closed
    /// - [`ApiError::Http`] for non-success status codes
    /// - [`ApiError::ConnectionFailed`] for other network failures
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let permit = tokio::time::timeout(
            Duration::from_millis(self.config.permit_timeout_ms),
            Arc::clone(&self.concurrent_limit).acquire_owned(),
        )
        .await
        .map_err(|_| {
            tracing::warn!(
                available_permits = self.concurrent_limit.available_permits(),
                "http client semaphore acquisition timeout"
            );
            ApiError::Timeout
        })?
        .map_err(|_| ApiError::ConcurrencyLimit("semaphore closed".to_string()))?;

        let permit_guard = PermitGuard::new(permit, Arc::clone(&self.concurrent_limit));

        tracing::trace!(available_permits = permit_guard.available_permits(), "http request started");

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(ApiError::Timeout),
            Err(e) => return Err(ApiError::ConnectionFailed(Self::sanitize_network_error(&e))),
        };

        if response.status().is_success() {
            tracing::trace!(
                status = response.status().as_u16(),
                available_permits = permit_guard.available_permits(),
                "http request completed"
            );
            return Ok(response);
        }

        let status = response.status().as_u16();
        let raw_text = response.text().await.unwrap_or_default();
        let text = if raw_text.chars().count() > MAX_ERROR_BODY_CHARS {
            let truncated: String = raw_text.chars().take(MAX_ERROR_BODY_CHARS).collect();
            format!("{truncated}... (truncated)")
        } else {
            raw_text
        };
        tracing::trace!(status, "http request failed");
        Err(ApiError::Http(status, text))
    }

    /// Reads and decodes a JSON body.
    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// `GET path?query`, decoding a JSON response.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`]; undecodable bodies give [`ApiError::InvalidResponse`].
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        credentials: Credentials,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path, credentials)?.query(query);
        Self::read_json(self.send(builder).await?).await
    }

    /// `POST path` with a JSON body, decoding a JSON response.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::get_json`].
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        credentials: Credentials,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path, credentials)?.json(body);
        Self::read_json(self.send(builder).await?).await
    }

    /// `PUT path` with a JSON body, decoding a JSON response.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::get_json`].
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        credentials: Credentials,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PUT, path, credentials)?.json(body);
        Self::read_json(self.send(builder).await?).await
    }

    /// Sends a body-less request and ignores the response body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`].
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        credentials: Credentials,
    ) -> Result<(), ApiError> {
        let builder = self.request(method, path, credentials)?;
        self.send(builder).await.map(|_| ())
    }

    #[cfg(test)]
    #[must_use]
    pub fn available_permits(&self) -> usize {
        self.concurrent_limit.available_permits()
    }
}

/// Parses the API base URL, making sure relative paths resolve beneath it.
fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let normalized =
        if base_url.ends_with('/') { base_url.to_string() } else { format!("{base_url}/") };
    let url = Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(format!("unsupported scheme: {}", url.scheme())));
    }

    Ok(url)
}
