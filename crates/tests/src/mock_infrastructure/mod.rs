//! Mock infrastructure for testing the lead store
//!
//! ## Components
//!
//! - `ApiMockBuilder`: wraps mockito with one helper per leads API endpoint
//! - Fixture builders for lead and page JSON
//!
//! ## Usage
//!
//! ```ignore
//! use tests::mock_infrastructure::ApiMockBuilder;
//!
//! let mut mock = ApiMockBuilder::new().await;
//! mock.mock_lead(3, 1).await;
//!
//! let store = mock.store();
//! store.load_by_id(3).await.unwrap();
//! mock.assert_all().await;
//! ```

pub mod api_mock;
pub mod test_helpers;

pub use api_mock::{ApiMockBuilder, TEST_SESSION_COOKIE};
pub use test_helpers::*;
