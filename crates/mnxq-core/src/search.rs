//! Search orchestration: raw input in, one result per compound out.
//!
//! ```text
//! input ──► detector ──► tokenizer (expressions only) ──► normalizer
//!                                                            │
//!        report ◄── ranking ◄── provider (exact / contains) ◄┘
//! ```
//!
//! [`plan`] is the pure front half. [`Searcher::search`] runs the lookups for
//! every planned compound concurrently, at most `max_concurrent` in flight,
//! and returns results in extraction order. Each compound is bounded by its
//! own timeout; a failure there is recorded on that compound only.

use crate::config::SearchConfig;
use crate::detector::is_expression;
use crate::error::{LookupError, SearchError};
use crate::normalizer::{normalize, NormalizedName};
use crate::provider::LookupProvider;
use crate::ranking::{rank_with, Scorer, Similarity};
use crate::tokenizer::extract_compounds;
use crate::types::{MatchRecord, MatchType, ResultBundle, ScoredCandidate};
use futures::stream::{self, StreamExt};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::time::Duration;

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// How the input was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Single,
    Expression,
}

/// One compound to look up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompoundQuery {
    /// Text shown to the user: the extracted token, or the whole input for
    /// single-compound searches.
    pub label: String,
    pub normalized: NormalizedName,
}

/// The compounds a search will look up, before any lookup runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPlan {
    pub input: String,
    pub kind: InputKind,
    pub compounds: Vec<CompoundQuery>,
}

/// Classify `input` and extract its compounds.
pub fn plan(input: &str) -> Result<QueryPlan, SearchError> {
    if input.trim().is_empty() {
        return Err(SearchError::EmptyInput);
    }

    if !is_expression(input) {
        return Ok(QueryPlan {
            input: input.to_string(),
            kind: InputKind::Single,
            compounds: vec![CompoundQuery {
                label: input.to_string(),
                normalized: normalize(input),
            }],
        });
    }

    let compounds: Vec<CompoundQuery> = extract_compounds(input)
        .into_iter()
        .filter(|token| token.as_str().chars().count() > 1)
        .map(|token| CompoundQuery {
            normalized: normalize(token.as_str()),
            label: token.as_str().to_string(),
        })
        .collect();

    if compounds.is_empty() {
        return Err(SearchError::NothingExtracted {
            input: input.to_string(),
        });
    }

    Ok(QueryPlan {
        input: input.to_string(),
        kind: InputKind::Expression,
        compounds,
    })
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Caller-selected search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub match_type: MatchType,
    /// Maximum number of ranked partial matches per compound.
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            match_type: MatchType::Both,
            limit: 5,
        }
    }
}

/// Outcome for one compound.
#[derive(Debug)]
pub struct CompoundResult {
    pub query: String,
    pub normalized: NormalizedName,
    pub outcome: Result<ResultBundle, LookupError>,
}

impl CompoundResult {
    pub fn bundle(&self) -> Option<&ResultBundle> {
        self.outcome.as_ref().ok()
    }
}

impl Serialize for CompoundResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CompoundResult", 4)?;
        state.serialize_field("query", &self.query)?;
        state.serialize_field("normalized", &self.normalized)?;
        match &self.outcome {
            Ok(bundle) => {
                state.serialize_field("result", bundle)?;
                state.serialize_field("error", &None::<String>)?;
            }
            Err(err) => {
                state.serialize_field("result", &None::<ResultBundle>)?;
                state.serialize_field("error", &Some(err.to_string()))?;
            }
        }
        state.end()
    }
}

/// Everything a display sink needs to render one search.
#[derive(Debug, Serialize)]
pub struct SearchReport {
    pub input: String,
    pub kind: InputKind,
    pub match_type: MatchType,
    /// One entry per planned compound, in extraction order.
    pub compounds: Vec<CompoundResult>,
}

impl SearchReport {
    pub fn is_expression(&self) -> bool {
        self.kind == InputKind::Expression
    }

    /// Labels of the looked-up compounds, in order.
    pub fn labels(&self) -> Vec<&str> {
        self.compounds.iter().map(|c| c.query.as_str()).collect()
    }

    pub fn get(&self, label: &str) -> Option<&CompoundResult> {
        self.compounds.iter().find(|c| c.query == label)
    }
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Runs searches against a [`LookupProvider`].
#[derive(Debug, Clone)]
pub struct Searcher<P, S = Scorer> {
    provider: P,
    scorer: S,
    lookup_timeout: Duration,
    max_concurrent: usize,
}

impl<P: LookupProvider> Searcher<P, Scorer> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            scorer: Scorer::default(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Build from the `[search]` config section.
    pub fn from_config(provider: P, config: &SearchConfig) -> Self {
        Self::new(provider)
            .with_scorer(config.scorer)
            .lookup_timeout(Duration::from_millis(config.lookup_timeout_ms))
            .max_concurrent(config.max_concurrent_lookups)
    }
}

impl<P: LookupProvider, S: Similarity> Searcher<P, S> {
    pub fn with_scorer<T: Similarity>(self, scorer: T) -> Searcher<P, T> {
        Searcher {
            provider: self.provider,
            scorer,
            lookup_timeout: self.lookup_timeout,
            max_concurrent: self.max_concurrent,
        }
    }

    pub fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Cap on compounds looked up at once. Zero is treated as one.
    pub fn max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n.max(1);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Time allowed for one compound's lookups.
    pub fn timeout(&self) -> Duration {
        self.lookup_timeout
    }

    /// Plan `input` and look up every compound.
    pub async fn search(
        &self,
        input: &str,
        options: SearchOptions,
    ) -> Result<SearchReport, SearchError> {
        if options.limit == 0 {
            return Err(SearchError::InvalidLimit);
        }
        let plan = plan(input)?;
        tracing::debug!(
            input = %plan.input,
            kind = ?plan.kind,
            compounds = plan.compounds.len(),
            "search planned"
        );

        let pending: Vec<_> = plan
            .compounds
            .into_iter()
            .map(|query| self.resolve(query, options))
            .collect();
        let compounds: Vec<CompoundResult> = stream::iter(pending)
            .buffered(self.max_concurrent)
            .collect()
            .await;

        Ok(SearchReport {
            input: plan.input,
            kind: plan.kind,
            match_type: options.match_type,
            compounds,
        })
    }

    async fn resolve(&self, query: CompoundQuery, options: SearchOptions) -> CompoundResult {
        tracing::debug!(compound = %query.label, normalized = %query.normalized, "dispatching lookups");

        let outcome =
            match tokio::time::timeout(self.lookup_timeout, self.lookup(&query.normalized, options))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(LookupError::Timeout(self.lookup_timeout)),
            };

        if let Err(err) = &outcome {
            tracing::warn!(compound = %query.label, error = %err, "lookup failed");
        }

        CompoundResult {
            query: query.label,
            normalized: query.normalized,
            outcome,
        }
    }

    async fn lookup(
        &self,
        name: &NormalizedName,
        options: SearchOptions,
    ) -> Result<ResultBundle, LookupError> {
        let (exact, partial) = tokio::try_join!(
            self.exact_matches(name, options),
            self.partial_matches(name, options),
        )?;
        Ok(ResultBundle { exact, partial })
    }

    async fn exact_matches(
        &self,
        name: &NormalizedName,
        options: SearchOptions,
    ) -> Result<Vec<MatchRecord>, LookupError> {
        if !options.match_type.includes_exact() {
            return Ok(Vec::new());
        }
        self.provider.lookup_exact(name).await
    }

    async fn partial_matches(
        &self,
        name: &NormalizedName,
        options: SearchOptions,
    ) -> Result<Vec<ScoredCandidate>, LookupError> {
        if !options.match_type.includes_partial() {
            return Ok(Vec::new());
        }
        let candidates = self.provider.lookup_contains(name).await?;
        Ok(rank_with(&self.scorer, name, candidates, options.limit))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
