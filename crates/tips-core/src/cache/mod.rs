//! In-memory caches behind the lead store.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          LeadStore                           │
//! │   (cache-hit checks, fetch de-duplication, atomic commits)   │
//! └──────────────────────────────────────────────────────────────┘
//!        │               │                 │               │
//! ┌──────▼──────┐ ┌──────▼──────┐  ┌───────▼──────┐ ┌──────▼──────┐
//! │  LeadCache  │ │  PageCache  │  │ QueryRecall  │ │ AlertCache  │
//! │ id → Lead   │ │ FilterKey → │  │ last query   │ │ id → Alert  │
//! │ (+ flag bit)│ │ meta, pages │  │ per mode     │ │             │
//! └─────────────┘ └─────────────┘  └──────────────┘ └─────────────┘
//! ```
//!
//! Leads are normalized: a lead appears once in [`LeadCache`] and pages only hold
//! identifiers. The flag overlay is the `flagged` bit on each cached lead, refreshed
//! separately from the lead's other fields.
//!
//! Nothing is ever evicted. Entries live as long as the process.
//!
//! ## Error handling conventions
//!
//! - **`Option<T>`**: cache miss (expected, not an error)
//!   - `LeadCache::get()` → `Option<Lead>`
//!   - `PageCache::page_ids()` → `Option<Vec<LeadId>>`, where `Some(vec![])` is a loaded
//!     empty page and `None` is "not loaded yet"
//! - Cache operations themselves never fail; only the network side of the store does.

pub mod alert_cache;
pub mod fetch_guard;
pub mod filter_key;
pub mod lead_cache;
pub mod page_cache;
pub mod query_recall;
pub mod stats;

pub use alert_cache::AlertCache;
pub use fetch_guard::{FetchGuard, FetchKey, InflightRegistry};
pub use filter_key::FilterKey;
pub use lead_cache::LeadCache;
pub use page_cache::{PageCache, PageEntry};
pub use query_recall::QueryRecall;
pub use stats::{StatsSnapshot, StoreStats};
