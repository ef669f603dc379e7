//! Core types for mnxq-core.
//!
//! This module defines the data structures shared across all pipeline stages:
//! the provider-supplied [`MatchRecord`], its ranked form [`ScoredCandidate`],
//! the per-compound [`ResultBundle`], and the [`MatchType`] selector.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A record returned by a lookup provider.
///
/// `name` is the provider's canonical label and the only field the pipeline
/// compares against. Everything in `attributes` is passed through untouched
/// to the display sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Display name (for MetaNetX, the `rdfs:comment` of the chemical).
    pub name: String,
    /// Opaque provider attributes: identifiers, formula, structure strings, …
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl MatchRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// A partial-match candidate paired with its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Similarity in `0.0..=100.0`.
    pub score: f64,
    pub record: MatchRecord,
}

/// Lookup results for a single compound query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    /// Records whose label equals the query (case-insensitive).
    pub exact: Vec<MatchRecord>,
    /// Containment matches, most similar first, truncated to the limit.
    pub partial: Vec<ScoredCandidate>,
}

impl ResultBundle {
    /// `true` when neither lookup produced anything. Not an error.
    pub fn is_no_match(&self) -> bool {
        self.exact.is_empty() && self.partial.is_empty()
    }
}

/// Which lookups to run for each compound.
///
/// Serializes as `exact`, `partial` or `both`; deserializes through
/// [`FromStr`](std::str::FromStr), so any casing is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Partial,
    #[default]
    Both,
}

impl MatchType {
    pub fn includes_exact(self) -> bool {
        matches!(self, MatchType::Exact | MatchType::Both)
    }

    pub fn includes_partial(self) -> bool {
        matches!(self, MatchType::Partial | MatchType::Both)
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Exact => write!(f, "exact"),
            MatchType::Partial => write!(f, "partial"),
            MatchType::Both => write!(f, "both"),
        }
    }
}

impl std::str::FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(MatchType::Exact),
            "partial" => Ok(MatchType::Partial),
            "both" => Ok(MatchType::Both),
            other => Err(format!("unknown match type: {other} (expected exact|partial|both)")),
        }
    }
}

impl<'de> Deserialize<'de> for MatchType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
