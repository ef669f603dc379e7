//! Lookup providers: where match records come from.
//!
//! The orchestrator only sees the [`LookupProvider`] trait. [`CatalogProvider`]
//! is the in-memory implementation used for offline catalogs and tests; the
//! MetaNetX SPARQL implementation lives in `mnxq-sparql`.

use crate::error::LookupError;
use crate::normalizer::{comparison_key, NormalizedName};
use crate::types::MatchRecord;
use std::future::Future;
use std::path::Path;

/// Source of [`MatchRecord`]s for a normalized compound name.
///
/// Both lookups compare case-insensitively against the record's display
/// name. The caller bounds each call with a timeout.
pub trait LookupProvider: Send + Sync {
    /// Records whose name equals `name`.
    fn lookup_exact(
        &self,
        name: &NormalizedName,
    ) -> impl Future<Output = Result<Vec<MatchRecord>, LookupError>> + Send;

    /// Records whose name contains `name`.
    fn lookup_contains(
        &self,
        name: &NormalizedName,
    ) -> impl Future<Output = Result<Vec<MatchRecord>, LookupError>> + Send;
}

/// An in-memory catalog of records.
#[derive(Debug, Clone, Default)]
pub struct CatalogProvider {
    /// `(comparison key, record)` in catalog order.
    entries: Vec<(String, MatchRecord)>,
}

impl CatalogProvider {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        let entries = records
            .into_iter()
            .map(|r| (comparison_key(&r.name), r))
            .collect();
        Self { entries }
    }

    /// Load a catalog from a JSON array of `{"name": …, "attributes": {…}}`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let records: Vec<MatchRecord> = serde_json::from_str(&raw)?;
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn select(&self, keep: impl Fn(&str) -> bool) -> Vec<MatchRecord> {
        self.entries
            .iter()
            .filter(|(key, _)| keep(key))
            .map(|(_, record)| record.clone())
            .collect()
    }
}

impl LookupProvider for CatalogProvider {
    async fn lookup_exact(&self, name: &NormalizedName) -> Result<Vec<MatchRecord>, LookupError> {
        let wanted = name.key();
        Ok(self.select(|key| key == wanted))
    }

    async fn lookup_contains(
        &self,
        name: &NormalizedName,
    ) -> Result<Vec<MatchRecord>, LookupError> {
        let wanted = name.key();
        Ok(self.select(|key| key.contains(&wanted)))
    }
}
