//! Test builders for `MatchRecord` and search options.
//!
//! These are for readability in test assertions, not for production use.

use mnxq_core::{MatchRecord, MatchType, SearchOptions};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`MatchRecord`] fixtures carrying MetaNetX attributes.
///
/// ```rust
/// let water = RecordBuilder::new("water")
///     .mnx_id("WATER")
///     .formula("H2O")
///     .charge(0)
///     .build();
/// ```
pub struct RecordBuilder {
    record: MatchRecord,
}

impl RecordBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            record: MatchRecord::new(name),
        }
    }

    /// Sets `label` and the matching `metabolite` URI.
    pub fn mnx_id(self, id: &str) -> Self {
        let uri = format!("https://rdf.metanetx.org/chem/{id}");
        self.attr("label", id).attr("metabolite", &uri)
    }

    pub fn formula(self, formula: &str) -> Self {
        self.attr("formula", formula)
    }

    pub fn charge(self, charge: i32) -> Self {
        self.attr("charge", &charge.to_string())
    }

    pub fn reference(self, reference: &str) -> Self {
        self.attr("reference", reference)
    }

    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.record = self.record.with_attribute(key, value);
        self
    }

    pub fn build(self) -> MatchRecord {
        self.record
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

pub fn options(match_type: MatchType, limit: usize) -> SearchOptions {
    SearchOptions { match_type, limit }
}
