//! Leads API mock builder.
//!
//! Wraps mockito with helpers for each endpoint the store talks to. Every helper takes the
//! number of calls the test expects, so [`ApiMockBuilder::assert_all`] doubles as the
//! "exactly one request" / "no request at all" check.

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};
use tips_core::{client::ApiClient, store::LeadStore, types::LeadId};

use super::test_helpers::{create_test_lead, create_test_page};

/// Cookie handed out by [`ApiMockBuilder::mock_sign_in`].
pub const TEST_SESSION_COOKIE: &str = "session=test-session";

pub struct ApiMockBuilder {
    server: ServerGuard,
    mocks: Vec<Mock>,
}

impl ApiMockBuilder {
    pub async fn new() -> Self {
        Self { server: Server::new_async().await, mocks: Vec::new() }
    }

    #[must_use]
    pub fn url(&self) -> String {
        self.server.url()
    }

    /// A fresh, signed-out store pointed at this server.
    ///
    /// # Panics
    ///
    /// Panics if the mock server URL is rejected, which would be a mockito bug.
    #[must_use]
    pub fn store(&self) -> LeadStore {
        LeadStore::new(ApiClient::from_base_url(&self.url()).unwrap())
    }

    /// A store that already carries [`TEST_SESSION_COOKIE`].
    #[must_use]
    pub fn signed_in_store(&self) -> LeadStore {
        let store = self.store();
        store.api().http().set_session_cookie(Some(TEST_SESSION_COOKIE.to_string()));
        store
    }

    /// `GET lead/{id}` answering with a generated lead.
    pub async fn mock_lead(&mut self, id: LeadId, hits: usize) -> &mut Self {
        let body = create_test_lead(id);
        self.mock_lead_body(id, &body, hits).await
    }

    pub async fn mock_lead_body(&mut self, id: LeadId, body: &Value, hits: usize) -> &mut Self {
        let mock = self
            .server
            .mock("GET", format!("/lead/{id}").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(hits)
            .create_async()
            .await;

        self.mocks.push(mock);
        self
    }

    /// `GET leads` for an exact query (pairs as sent, `page` included).
    pub async fn mock_page(
        &mut self,
        query: &[(&str, &str)],
        ids: &[LeadId],
        num_pages: u32,
        num_results: u64,
        hits: usize,
    ) -> &mut Self {
        self.mock_page_at("/leads", query, ids, num_pages, num_results, hits).await
    }

    /// Credentialed `GET leads/flagged`.
    pub async fn mock_flagged_page(
        &mut self,
        query: &[(&str, &str)],
        ids: &[LeadId],
        num_pages: u32,
        num_results: u64,
        hits: usize,
    ) -> &mut Self {
        self.mock_page_at("/leads/flagged", query, ids, num_pages, num_results, hits).await
    }

    async fn mock_page_at(
        &mut self,
        path: &str,
        query: &[(&str, &str)],
        ids: &[LeadId],
        num_pages: u32,
        num_results: u64,
        hits: usize,
    ) -> &mut Self {
        let matchers = query
            .iter()
            .map(|(key, value)| Matcher::UrlEncoded((*key).to_string(), (*value).to_string()))
            .collect();

        let mock = self
            .server
            .mock("GET", path)
            .match_query(Matcher::AllOf(matchers))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(create_test_page(ids, num_pages, num_results).to_string())
            .expect(hits)
            .create_async()
            .await;

        self.mocks.push(mock);
        self
    }

    /// `POST flag/list` expecting exactly `ids` and answering with `flags`.
    pub async fn mock_flag_list(&mut self, ids: &[LeadId], flags: &[bool], hits: usize) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/flag/list")
            .match_header("cookie", TEST_SESSION_COOKIE)
            .match_body(Matcher::Json(json!(ids)))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "flags": flags }).to_string())
            .expect(hits)
            .create_async()
            .await;

        self.mocks.push(mock);
        self
    }

    /// `PUT flag/{id}` or `DELETE flag/{id}`.
    pub async fn mock_flag_update(&mut self, id: LeadId, flagged: bool, hits: usize) -> &mut Self {
        let method = if flagged { "PUT" } else { "DELETE" };
        let mock = self
            .server
            .mock(method, format!("/flag/{id}").as_str())
            .match_header("cookie", TEST_SESSION_COOKIE)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "status": "ok", "rows": 1 }).to_string())
            .expect(hits)
            .create_async()
            .await;

        self.mocks.push(mock);
        self
    }

    /// `POST auth/signin` setting [`TEST_SESSION_COOKIE`].
    pub async fn mock_sign_in(&mut self, hits: usize) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/auth/signin")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("set-cookie", &format!("{TEST_SESSION_COOKIE}; HttpOnly; Path=/"))
            .with_body(json!({ "status": "ok" }).to_string())
            .expect(hits)
            .create_async()
            .await;

        self.mocks.push(mock);
        self
    }

    /// Any request to `path` fails with `status`. Query strings are ignored.
    pub async fn mock_failure(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        hits: usize,
    ) -> &mut Self {
        let mock = self
            .server
            .mock(method, path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_body("upstream exploded")
            .expect(hits)
            .create_async()
            .await;

        self.mocks.push(mock);
        self
    }

    /// Checks every registered mock saw its expected number of calls.
    pub async fn assert_all(&self) {
        for mock in &self.mocks {
            mock.assert_async().await;
        }
    }
}
