//! Test Helper Functions and Utilities
//!
//! Fixtures shaped like the backend's JSON.

use serde_json::{json, Value};
use tips_core::types::LeadId;

/// A lead record as served by `lead/{id}` and inside page responses.
#[must_use]
pub fn create_test_lead(id: LeadId) -> Value {
    json!({
        "id": id,
        "name": format!("Lead {id}"),
        "description": format!("Automated decision system #{id}"),
        "topic": "transportation",
        "discovered_dt": "2020-03-01",
        "source": "federal",
        "link": format!("https://example.gov/doc/{id}"),
    })
}

/// A `leads` response body.
#[must_use]
pub fn create_test_page(ids: &[LeadId], num_pages: u32, num_results: u64) -> Value {
    let leads: Vec<Value> = ids.iter().map(|id| create_test_lead(*id)).collect();
    json!({
        "leads": leads,
        "num_pages": num_pages,
        "num_results": num_results,
        "page": 1,
    })
}
