//! Canonical cache keys for filter parameter objects.
//!
//! A key is built by sorting all entries by parameter name and joining them as
//! `name=value` pairs with `&`. Two filters with the same entries map to the same key
//! regardless of insertion order. Values are not escaped, so a value containing `=` or `&`
//! can collide with a differently shaped filter. The key is only a cache index and is never
//! sent over the wire.

use crate::types::{FilterParams, FilterValue, FLAGGED_PARAM};
use std::{fmt, fmt::Write, sync::Arc};

/// Canonical string form of a filter, used to index the page cache.
///
/// The key also remembers whether it addresses the signed-in user's flagged set, so
/// user-specific pages can be dropped on sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilterKey {
    text: Arc<str>,
    flagged: bool,
}

impl FilterKey {
    /// Encodes a filter exactly as given.
    #[must_use]
    pub fn encode(params: &FilterParams) -> Self {
        let mut entries: Vec<(&str, &FilterValue)> = params.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut key = String::new();
        for (index, (name, value)) in entries.into_iter().enumerate() {
            if index > 0 {
                key.push('&');
            }
            // writing into a String cannot fail
            let _ = write!(key, "{name}={value}");
        }

        let flagged = matches!(params.get(FLAGGED_PARAM), Some(FilterValue::Bool(true)));
        Self { text: Arc::from(key), flagged }
    }

    /// Encodes a filter with the flagged-mode discriminator folded in.
    #[must_use]
    pub fn for_mode(params: &FilterParams, flagged: bool) -> Self {
        Self::encode(&params.with_flagged(flagged))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// `true` for keys of flagged-mode queries, whose pages belong to one user.
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.flagged
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
