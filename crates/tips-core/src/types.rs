//! Shared domain types: leads, filter parameters, page responses and alert subscriptions.
//!
//! Leads carry an integer identifier, a mutable `flagged` bit and an open-ended set of
//! descriptive fields. The descriptive fields are kept as raw JSON so the cache never has
//! to track schema changes on the backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{collections::HashMap, fmt};

/// Stable, externally assigned lead identifier.
pub type LeadId = u64;

/// Identifier of a saved alert subscription.
pub type AlertId = u64;

/// Key under which the flagged-mode discriminator is folded into a filter.
pub const FLAGGED_PARAM: &str = "flagged";

/// Query parameter carrying the requested page number.
pub const PAGE_PARAM: &str = "page";

/// A single scalar filter value.
///
/// `Null` is an explicit value and is distinct from an absent key: it takes part in the
/// cache key (`source=null`) but is omitted from the network query string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FilterValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for a text value that is empty.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A flat mapping of filter parameter name to scalar value.
///
/// Insertion order is irrelevant everywhere: the cache key sorts entries and the network
/// query is emitted in key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterParams(HashMap<String, FilterValue>);

impl FilterParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Option<FilterValue> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns a copy with the flagged-mode discriminator set, overriding any caller value.
    #[must_use]
    pub fn with_flagged(&self, flagged: bool) -> Self {
        self.clone().with(FLAGGED_PARAM, flagged)
    }

    /// Drops text entries that are empty. Used on explicit search submission.
    #[must_use]
    pub fn without_empty_text(mut self) -> Self {
        self.0.retain(|_, value| !value.is_empty_text());
        self
    }

    /// Builds the HTTP query for a page request.
    ///
    /// Null values are omitted, `page` always comes from the argument and pairs are emitted
    /// in key order.
    #[must_use]
    pub fn to_query(&self, page: u32) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = self
            .0
            .iter()
            .filter(|(key, value)| key.as_str() != PAGE_PARAM && !value.is_null())
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect();
        query.sort();
        query.push((PAGE_PARAM.to_string(), page.to_string()));
        query
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for FilterParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
    }
}

/// A lead record as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,

    /// Per-user bookmark bit. Refreshed independently of the descriptive fields.
    #[serde(default)]
    pub flagged: bool,

    /// Every other field of the record (name, description, topic, ratings, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Lead {
    #[must_use]
    pub fn new(id: LeadId) -> Self {
        Self { id, flagged: false, fields: Map::new() }
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.fields.get("description").and_then(Value::as_str)
    }
}

/// Response body of `GET leads` / `GET leads/flagged`.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterPageResponse {
    pub leads: Vec<Lead>,
    pub num_pages: u32,
    pub num_results: u64,
}

/// Pagination metadata stored per filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page_count: u32,
    pub num_results: u64,
}

/// Response body of `POST flag/list`, positionally aligned with the request.
#[derive(Debug, Clone, Deserialize)]
pub struct FlagListResponse {
    pub flags: Vec<bool>,
}

/// How often an alert digest is mailed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Frequency {
    Weekly,
    SemiWeekly,
    Monthly,
}

impl TryFrom<u8> for Frequency {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Weekly),
            1 => Ok(Self::SemiWeekly),
            2 => Ok(Self::Monthly),
            other => Err(format!("unknown alert frequency: {other}")),
        }
    }
}

impl From<Frequency> for u8 {
    fn from(value: Frequency) -> Self {
        match value {
            Frequency::Weekly => 0,
            Frequency::SemiWeekly => 1,
            Frequency::Monthly => 2,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Weekly => "weekly",
            Self::SemiWeekly => "semi-weekly",
            Self::Monthly => "monthly",
        })
    }
}

/// Source restrictions of an alert. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSources {
    #[serde(default)]
    pub federal: Option<String>,
    #[serde(default)]
    pub regional: Option<String>,
    #[serde(default)]
    pub local: Option<String>,
}

/// The user-editable part of an alert, as sent to `alert/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSpec {
    #[serde(default)]
    pub sources: AlertSources,
    pub frequency: Frequency,
    pub recipient: String,
    pub filter: String,
}

/// A saved alert subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    #[serde(flatten)]
    pub spec: AlertSpec,
    /// Whether the recipient address has been confirmed. Only present on server reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<bool>,
}

/// Response of alert create/update calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AlertMutation {
    #[serde(default)]
    pub id: Option<AlertId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AlertListResponse {
    pub alerts: Vec<Alert>,
}
