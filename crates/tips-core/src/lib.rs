//! # Tips Core
//!
//! Client-side query cache for the Algorithm Tips lead database.
//!
//! - **[`cache`]**: Normalized lead cache, paginated filter results keyed by canonical
//!   filter keys, the last-query recall store, alerts, and in-flight fetch tracking.
//!
//! - **[`store`]**: [`LeadStore`](store::LeadStore), which owns the caches and decides when a
//!   network fetch is needed. Also carries the flag overlay, alerts and sign-in state.
//!
//! - **[`client`]**: Typed HTTP access to the leads API with concurrency limiting and
//!   session-cookie handling.
//!
//! - **[`config`]**: Layered configuration for the API connection and logging.
//!
//! ## Request Flow
//!
//! ```text
//! View asks for (params, page, flagged)
//!       │
//!       ▼
//! ┌──────────────┐
//! │ FilterKey    │  params + flagged → "flagged=false&q=x"
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │ Page check   │ ─── Loaded ──► done (no request)
//! └──────┬───────┘
//!        │ Not loaded
//!        ▼
//! ┌──────────────┐
//! │ In-flight    │ ─── Same fetch running ──► wait, re-check
//! │ registry     │
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │ GET leads    │ ─── Error ──► logged, returned, nothing cached
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │ Commit       │  every lead → LeadCache, ids + totals → PageCache
//! └──────────────┘
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod store;
pub mod types;
