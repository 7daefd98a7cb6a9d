//! In-flight fetch coordination.
//!
//! Every network fetch the store issues is registered here under a [`FetchKey`]. The first
//! caller for a key becomes the owner and performs the request; callers that arrive while it
//! is outstanding wait on the same lock and then re-check the cache before deciding whether
//! to fetch themselves.
//!
//! ```text
//! ┌──────────────────────────┐
//! │ Cache check (caller)     │ ── hit ──► return
//! └────────────┬─────────────┘
//!              │ miss
//!              ▼
//! ┌──────────────────────────┐
//! │ Get or create entry      │ ◄── shard lock released before awaiting
//! │ claim it, clone the lock │
//! └────────────┬─────────────┘
//!              ▼
//! ┌──────────────────────────┐
//! │ lock_owned().await       │ ◄── waiters queue here while the owner fetches
//! └────────────┬─────────────┘
//!              ▼
//! ┌──────────────────────────┐
//! │ Re-check cache (caller)  │ ── hit ──► drop guard, return
//! └────────────┬─────────────┘
//!              │ miss (first time, or the owner failed)
//!              ▼
//!        network fetch
//!              │
//!              ▼
//!     commit, drop FetchGuard ──► entry removed when the last claim drops
//! ```

use crate::{cache::FilterKey, types::LeadId};
use ahash::RandomState;
use dashmap::DashMap;
use std::{fmt, sync::Arc};
use tokio::{
    sync::{Mutex, OwnedMutexGuard},
    time::Instant,
};
use tracing::trace;

/// What a fetch is loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FetchKey {
    Lead(LeadId),
    Page(FilterKey, u32),
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lead(id) => write!(f, "lead/{id}"),
            Self::Page(key, page) => write!(f, "page/{page}?{key}"),
        }
    }
}

/// A registered fetch: the lock serialising callers, when it was first requested and how
/// many callers currently own or wait on it.
struct InflightFetch {
    lock: Arc<Mutex<()>>,
    started_at: Instant,
    interested: usize,
}

impl InflightFetch {
    fn new() -> Self {
        Self { lock: Arc::new(Mutex::new(())), started_at: Instant::now(), interested: 0 }
    }
}

type InflightMap = DashMap<FetchKey, InflightFetch, RandomState>;

/// Registry of outstanding fetches.
#[derive(Clone, Default)]
pub struct InflightRegistry {
    inflight: Arc<InflightMap>,
}

impl InflightRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { inflight: Arc::new(DashMap::with_hasher(RandomState::new())) }
    }

    /// Waits until the caller is the only one allowed to fetch `key`.
    ///
    /// The returned guard reports whether another caller already held the key when this one
    /// arrived; such callers must re-check the cache before fetching. A caller whose future is
    /// dropped while waiting gives up its place without leaving the entry behind.
    pub async fn begin(&self, key: FetchKey) -> FetchGuard {
        let (lock, joined, started_at) = {
            let mut entry = self.inflight.entry(key.clone()).or_insert_with(InflightFetch::new);
            let joined = entry.interested > 0;
            entry.interested += 1;
            (Arc::clone(&entry.lock), joined, entry.started_at)
        };
        let interest = Interest { inflight: Arc::clone(&self.inflight), key };

        if joined {
            let inflight_ms = started_at.elapsed().as_millis();
            trace!(key = %interest.key, inflight_ms, "joining in-flight fetch");
        }

        let held = lock.lock_owned().await;

        FetchGuard { _held: held, interest, joined }
    }

    /// Number of keys currently registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inflight.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inflight.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &FetchKey) -> bool {
        self.inflight.contains_key(key)
    }
}

/// One caller's claim on a registry entry. The last claim to go removes the entry.
struct Interest {
    inflight: Arc<InflightMap>,
    key: FetchKey,
}

impl Drop for Interest {
    fn drop(&mut self) {
        let removed = self
            .inflight
            .remove_if_mut(&self.key, |_, fetch| {
                fetch.interested = fetch.interested.saturating_sub(1);
                fetch.interested == 0
            })
            .is_some();
        if removed {
            trace!(key = %self.key, "in-flight entry released");
        }
    }
}

/// RAII guard for one fetch slot.
///
/// Dropping it releases the lock to the next waiter, then gives up this caller's claim on the
/// registry entry.
pub struct FetchGuard {
    // field order is drop order: unlock before releasing the claim
    _held: OwnedMutexGuard<()>,
    interest: Interest,
    joined: bool,
}

impl FetchGuard {
    #[must_use]
    pub fn key(&self) -> &FetchKey {
        &self.interest.key
    }

    /// `true` if another caller was already fetching this key on arrival.
    #[must_use]
    pub fn joined(&self) -> bool {
        self.joined
    }
}
