//! Flag overlay and sign-in lifecycle.

use crate::mock_infrastructure::ApiMockBuilder;
use serial_test::serial;
use tips_core::{
    store::{StoreError, StoreEvent},
    types::FilterParams,
};

#[tokio::test]
#[serial]
async fn test_bulk_refresh_aligns_positionally() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_lead(1, 1).await;
    mock.mock_lead(2, 1).await;
    mock.mock_flag_list(&[1, 2], &[true, false], 1).await;

    let store = mock.signed_in_store();
    store.load_by_id(2).await.unwrap();
    store.load_by_id(1).await.unwrap();
    store.refresh_all_flags().await.unwrap();

    mock.assert_all().await;
    assert!(store.get(1).unwrap().flagged);
    assert!(!store.get(2).unwrap().flagged);
}

#[tokio::test]
#[serial]
async fn test_refresh_leaves_other_fields_alone() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_lead(9, 1).await;
    mock.mock_flag_list(&[9], &[true], 1).await;

    let store = mock.signed_in_store();
    store.load_by_id(9).await.unwrap();
    let before = store.get(9).unwrap();

    store.refresh_all_flags().await.unwrap();

    let after = store.get(9).unwrap();
    assert!(after.flagged);
    assert_eq!(after.fields, before.fields);
}

#[tokio::test]
#[serial]
async fn test_update_flag_isolated_to_one_lead() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_page(&[("page", "1")], &[1, 2, 3], 1, 3, 1).await;
    mock.mock_page(&[("topic", "other"), ("page", "2")], &[7, 8], 2, 12, 1).await;
    mock.mock_flag_update(2, true, 1).await;

    let store = mock.signed_in_store();
    let other = FilterParams::new().with("topic", "other");
    store.filter(&FilterParams::new(), 1, false).await.unwrap();
    store.filter(&other, 2, false).await.unwrap();
    let other_before = store.page_entities(&other, 2, false);
    let mut events = store.subscribe();

    store.update_flag(2, true).await.unwrap();

    mock.assert_all().await;
    let flags: Vec<bool> =
        store.page(&FilterParams::new(), 1, false).unwrap().iter().map(|l| l.flagged).collect();
    assert_eq!(flags, vec![false, true, false]);
    assert_eq!(other_before, Some(vec![7, 8]));
    assert_eq!(store.page_entities(&other, 2, false), other_before);
    assert!(store.page(&other, 2, false).unwrap().iter().all(|l| !l.flagged));
    assert_eq!(events.recv().await.unwrap(), StoreEvent::FlagChanged { id: 2, flagged: true });
}

#[tokio::test]
#[serial]
async fn test_signed_out_flag_ops_make_no_requests() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_flag_update(1, true, 0).await;
    mock.mock_flag_list(&[1], &[true], 0).await;
    mock.mock_flagged_page(&[("page", "1")], &[1], 1, 1, 0).await;

    let store = mock.store();
    assert!(matches!(store.update_flag(1, true).await, Err(StoreError::NotSignedIn)));
    assert!(matches!(store.refresh_all_flags().await, Err(StoreError::NotSignedIn)));
    assert!(matches!(
        store.filter(&FilterParams::new(), 1, true).await,
        Err(StoreError::NotSignedIn)
    ));

    mock.assert_all().await;
}

#[tokio::test]
#[serial]
async fn test_sign_in_flagged_listing_and_sign_out() {
    let mut mock = ApiMockBuilder::new().await;
    mock.mock_sign_in(1).await;
    mock.mock_flagged_page(&[("page", "1")], &[4, 6], 1, 2, 1).await;
    mock.mock_page(&[("page", "1")], &[4, 5, 6], 1, 3, 1).await;
    mock.mock_flag_list(&[4, 5, 6], &[true, false, true], 1).await;

    let store = mock.store();
    store.sign_in("google-id-token").await.unwrap();
    assert!(store.signed_in());

    let everything = FilterParams::new();
    store.submit(everything.clone(), true).await.unwrap();
    store.submit(everything.clone(), false).await.unwrap();

    // the unflagged listing re-stored 4 and 6 without a flag
    assert!(!store.get(4).unwrap().flagged);
    store.refresh_all_flags().await.unwrap();
    assert!(store.get(4).unwrap().flagged);
    assert!(!store.get(5).unwrap().flagged);

    assert_eq!(store.page_entities(&everything, 1, true), Some(vec![4, 6]));
    assert_eq!(store.page_entities(&everything, 1, false), Some(vec![4, 5, 6]));

    // sign-out goes to the server as well; no mock means it fails, local state still clears
    assert!(store.sign_out().await.is_err());
    assert!(!store.signed_in());
    assert!(store.page(&everything, 1, false).unwrap().iter().all(|lead| !lead.flagged));

    mock.assert_all().await;
}
