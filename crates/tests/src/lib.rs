//! Integration tests for the lead store
//!
//! - `store_tests`: cache hits, key canonicalization, pagination metadata, failure handling
//! - `concurrency_tests`: de-duplication of concurrent fetches
//! - `flag_tests`: the flag overlay and sign-in lifecycle
//! - `mock_infrastructure`: mockito-backed leads API and JSON fixtures
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --package tests
//! ```
//!
//! No external services are needed; every test starts its own mock server.

#[cfg(test)]
mod store_tests;


#[cfg(test)]
mod flag_tests;

/// Mock infrastructure for testing
pub mod mock_infrastructure;
