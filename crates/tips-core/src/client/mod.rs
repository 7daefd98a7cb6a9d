//! Typed access to the leads API.
//!
//! [`ApiClient`] maps each backend endpoint the store depends on to one method. It holds no
//! cache state; caching and de-duplication happen in [`LeadStore`](crate::store::LeadStore).
//!
//! | Operation           | Method | Path                    | Credentials |
//! |---------------------|--------|-------------------------|-------------|
//! | one lead            | GET    | `lead/{id}`             | no          |
//! | filtered page       | GET    | `leads`                 | no          |
//! | flagged page        | GET    | `leads/flagged`         | yes         |
//! | bulk flag lookup    | POST   | `flag/list`             | yes         |
//! | set / clear flag    | PUT / DELETE | `flag/{id}`       | yes         |
//! | sign in / out       | POST / GET | `auth/signin`, `auth/signout` | -   |
//! | alerts              | GET/POST/PUT/DELETE | `alert/...` | yes        |

pub mod errors;
pub mod http_client;

pub use errors::ApiError;
pub use http_client::{Credentials, HttpClient, HttpClientConfig};

use crate::types::{
    Alert, AlertId, AlertListResponse, AlertMutation, AlertSpec, FilterPageResponse,
    FilterParams, FlagListResponse, Lead, LeadId,
};
use reqwest::{header, Method};
use serde_json::json;

pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Builds a client for `base_url` with default HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn from_base_url(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self::new(HttpClient::new(base_url)?))
    }

    #[must_use]
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    #[must_use]
    pub fn has_session(&self) -> bool {
        self.http.has_session()
    }

    /// `GET lead/{id}`
    ///
    /// # Errors
    ///
    /// Any transport or decoding failure.
    pub async fn fetch_lead(&self, id: LeadId) -> Result<Lead, ApiError> {
        self.http.get_json(&format!("lead/{id}"), &[], Credentials::Omit).await
    }

    /// `GET leads` or, in flagged mode, the credentialed `GET leads/flagged`.
    ///
    /// # Errors
    ///
    /// Any transport or decoding failure.
    pub async fn fetch_page(
        &self,
        params: &FilterParams,
        page: u32,
        flagged: bool,
    ) -> Result<FilterPageResponse, ApiError> {
        let (path, credentials) =
            if flagged { ("leads/flagged", Credentials::Include) } else { ("leads", Credentials::Omit) };
        self.http.get_json(path, &params.to_query(page), credentials).await
    }

    /// `POST flag/list`. The result is positionally aligned with `ids`.
    ///
    /// # Errors
    ///
    /// Any transport or decoding failure.
    pub async fn fetch_flags(&self, ids: &[LeadId]) -> Result<Vec<bool>, ApiError> {
        let response: FlagListResponse =
            self.http.post_json("flag/list", ids, Credentials::Include).await?;
        Ok(response.flags)
    }

    /// `PUT flag/{id}` when `flagged`, `DELETE flag/{id}` otherwise.
    ///
    /// # Errors
    ///
    /// Any transport failure.
    pub async fn put_flag(&self, id: LeadId, flagged: bool) -> Result<(), ApiError> {
        let method = if flagged { Method::PUT } else { Method::DELETE };
        self.http.call(method, &format!("flag/{id}"), Credentials::Include).await
    }

    /// Exchanges an identity-provider token for a session cookie and keeps it for
    /// credentialed requests.
    ///
    /// # Errors
    ///
    /// Transport failures, or [`ApiError::InvalidResponse`] if no cookie was returned.
    pub async fn sign_in(&self, id_token: &str) -> Result<(), ApiError> {
        let builder = self
            .http
            .request(Method::POST, "auth/signin", Credentials::Omit)?
            .json(&json!({ "id_token": id_token }));
        let response = self.http.send(builder).await?;

        let cookie = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .collect::<Vec<_>>()
            .join("; ");

        if cookie.is_empty() {
            return Err(ApiError::InvalidResponse("sign-in returned no session cookie".into()));
        }

        self.http.set_session_cookie(Some(cookie));
        Ok(())
    }

    /// `GET auth/signout`. The local cookie is dropped even if the call fails.
    ///
    /// # Errors
    ///
    /// Any transport failure.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let result = self.http.call(Method::GET, "auth/signout", Credentials::Include).await;
        self.http.set_session_cookie(None);
        result
    }

    /// `GET alert/list`
    ///
    /// # Errors
    ///
    /// Any transport or decoding failure.
    pub async fn list_alerts(&self) -> Result<Vec<Alert>, ApiError> {
        let response: AlertListResponse =
            self.http.get_json("alert/list", &[], Credentials::Include).await?;
        Ok(response.alerts)
    }

    /// `GET alert/{id}`
    ///
    /// # Errors
    ///
    /// Any transport or decoding failure.
    pub async fn fetch_alert(&self, id: AlertId) -> Result<Alert, ApiError> {
        self.http.get_json(&format!("alert/{id}"), &[], Credentials::Include).await
    }

    /// `POST alert/create`
    ///
    /// # Errors
    ///
    /// Any transport or decoding failure.
    pub async fn create_alert(&self, spec: &AlertSpec) -> Result<AlertMutation, ApiError> {
        self.http.post_json("alert/create", spec, Credentials::Include).await
    }

    /// `PUT alert/{id}`
    ///
    /// # Errors
    ///
    /// Any transport or decoding failure.
    pub async fn update_alert(&self, alert: &Alert) -> Result<AlertMutation, ApiError> {
        self.http.put_json(&format!("alert/{}", alert.id), alert, Credentials::Include).await
    }

    /// `DELETE alert/{id}`
    ///
    /// # Errors
    ///
    /// Any transport failure.
    pub async fn delete_alert(&self, id: AlertId) -> Result<(), ApiError> {
        self.http.call(Method::DELETE, &format!("alert/{id}"), Credentials::Include).await
    }
}
