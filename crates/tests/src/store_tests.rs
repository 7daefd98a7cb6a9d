//! Cache behavior of `LeadStore` against a mocked leads API.
//!
//! Every test registers its expected call counts on the mock server, so a passing
//! `assert_all` proves both that the store fetched what it needed and that cache hits
//! stayed off the network.

use crate::mock_infrastructure::ApiMockBuilder;
use serial_test::serial;
use tips_core::{
    cache::FilterKey,
    store::StoreEvent,
    types::{FilterParams, FilterValue, PageMeta},
};

#[tokio::test]
#[serial]
async fn test_filter_end_to_end() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_page(&[("q", "x"), ("page", "1")], &[7], 2, 3, 1).await;

    let store = mock.store();
    let params = FilterParams::new().with("q", "x");

    assert_eq!(FilterKey::for_mode(&params, false).as_str(), "flagged=false&q=x");

    store.filter(&params, 1, false).await.unwrap();

    mock.assert_all().await;
    assert_eq!(store.page_entities(&params, 1, false), Some(vec![7]));
    assert_eq!(store.page_meta(&params, false), Some(PageMeta { page_count: 2, num_results: 3 }));
    assert_eq!(store.get(7).unwrap().name(), Some("Lead 7"));
}

#[tokio::test]
#[serial]
async fn test_load_by_id_is_idempotent() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_lead(3, 1).await;

    let store = mock.store();
    store.load_by_id(3).await.unwrap();
    store.load_by_id(3).await.unwrap();
    store.load_by_id(3).await.unwrap();

    mock.assert_all().await;
    assert_eq!(store.stats().lead_hits, 2);
}

#[tokio::test]
#[serial]
async fn test_loaded_page_is_not_refetched() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_page(&[("filter", "roads"), ("page", "1")], &[1, 2], 1, 2, 1).await;

    let store = mock.store();
    let params = FilterParams::new().with("filter", "roads");
    store.filter(&params, 1, false).await.unwrap();
    store.filter(&params, 1, false).await.unwrap();

    mock.assert_all().await;
    let stats = store.stats();
    assert_eq!(stats.page_misses, 1);
    assert_eq!(stats.page_hits, 1);
}

#[tokio::test]
#[serial]
async fn test_lead_from_page_needs_no_detail_fetch() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_page(&[("page", "1")], &[4], 1, 1, 1).await;
    mock.mock_lead(4, 0).await;

    let store = mock.store();
    store.filter(&FilterParams::new(), 1, false).await.unwrap();
    store.load_by_id(4).await.unwrap();

    mock.assert_all().await;
}

#[tokio::test]
#[serial]
async fn test_insertion_order_does_not_matter() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_page(&[("from", "2020-01-01"), ("source", "federal"), ("page", "1")], &[5], 1, 1, 1)
        .await;

    let store = mock.store();
    let first = FilterParams::new().with("from", "2020-01-01").with("source", "federal");
    let second = FilterParams::new().with("source", "federal").with("from", "2020-01-01");

    store.filter(&first, 1, false).await.unwrap();
    store.filter(&second, 1, false).await.unwrap();

    mock.assert_all().await;
    assert_eq!(store.page_entities(&second, 1, false), Some(vec![5]));
    assert_eq!(store.query_count(), 1);
}

#[tokio::test]
#[serial]
async fn test_null_and_absent_are_different_queries() {
    let mut mock = ApiMockBuilder::new().await;
    // a null value is not sent, so both requests look alike on the wire
    mock.mock_page(&[("page", "1")], &[1], 1, 1, 2).await;

    let store = mock.store();
    let absent = FilterParams::new();
    let null = FilterParams::new().with("to", FilterValue::Null);

    store.filter(&absent, 1, false).await.unwrap();
    store.filter(&null, 1, false).await.unwrap();

    mock.assert_all().await;
    assert_eq!(store.query_count(), 2);
}

#[tokio::test]
#[serial]
async fn test_empty_page_is_distinct_from_unloaded() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_page(&[("filter", "zzz"), ("page", "1")], &[], 0, 0, 1).await;

    let store = mock.store();
    let params = FilterParams::new().with("filter", "zzz");
    assert_eq!(store.page_entities(&params, 1, false), None);

    store.filter(&params, 1, false).await.unwrap();
    store.filter(&params, 1, false).await.unwrap();

    mock.assert_all().await;
    assert_eq!(store.page_entities(&params, 1, false), Some(vec![]));
    assert_eq!(store.page_meta(&params, false), Some(PageMeta { page_count: 0, num_results: 0 }));
}

#[tokio::test]
#[serial]
async fn test_later_page_refreshes_meta_and_keeps_earlier_pages() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_page(&[("filter", "x"), ("page", "1")], &[1, 2], 2, 7, 1).await;
    mock.mock_page(&[("filter", "x"), ("page", "2")], &[3], 3, 11, 1).await;

    let store = mock.store();
    let params = FilterParams::new().with("filter", "x");
    store.filter(&params, 1, false).await.unwrap();
    store.filter(&params, 2, false).await.unwrap();

    mock.assert_all().await;
    assert_eq!(store.page_entities(&params, 1, false), Some(vec![1, 2]));
    assert_eq!(store.page_entities(&params, 2, false), Some(vec![3]));
    assert_eq!(store.page_meta(&params, false), Some(PageMeta { page_count: 3, num_results: 11 }));
}

#[tokio::test]
#[serial]
async fn test_page_failure_changes_nothing_and_retries() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_failure("GET", "/leads", 503, 2).await;

    let store = mock.store();
    let params = FilterParams::new().with("filter", "x");

    let err = store.filter(&params, 1, false).await.unwrap_err();
    assert_eq!(err.api().and_then(|e| e.status()), Some(503));
    assert_eq!(store.page_entities(&params, 1, false), None);
    assert_eq!(store.page_meta(&params, false), None);
    assert_eq!(store.lead_count(), 0);

    assert!(store.filter(&params, 1, false).await.is_err());
    mock.assert_all().await;
    assert_eq!(store.inflight_count(), 0);
}

#[tokio::test]
#[serial]
async fn test_submit_records_query_per_mode() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_page(&[("filter", "bridge"), ("page", "1")], &[8], 1, 1, 1).await;

    let store = mock.store();
    let submitted = FilterParams::new().with("filter", "bridge").with("to", "");
    store.submit(submitted, false).await.unwrap();

    mock.assert_all().await;
    let recalled = store.last_query(false);
    assert_eq!(recalled, FilterParams::new().with("filter", "bridge"));
    assert!(store.last_query(true).is_empty());
    assert_eq!(store.page_entities(&recalled, 1, false), Some(vec![8]));
}

#[tokio::test]
#[serial]
async fn test_events_follow_commits() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_page(&[("page", "1")], &[1, 2], 1, 2, 1).await;

    let store = mock.store();
    let mut events = store.subscribe();
    store.filter(&FilterParams::new(), 1, false).await.unwrap();

    assert_eq!(events.recv().await.unwrap(), StoreEvent::LeadStored(1));
    assert_eq!(events.recv().await.unwrap(), StoreEvent::LeadStored(2));
    assert_eq!(
        events.recv().await.unwrap(),
        StoreEvent::PageStored { key: FilterKey::for_mode(&FilterParams::new(), false), page: 1 }
    );
    assert!(events.try_recv().is_err());
}
