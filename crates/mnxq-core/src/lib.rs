//! mnxq-core: compound name resolution pipeline.
//!
//! This crate turns free-form chemical text into an ordered list of compound
//! queries and ranks the approximate matches a lookup provider returns.
//!
//! # Architecture
//!
//! ```text
//! detector ──► tokenizer ──► normalizer ──► provider ──► ranking
//!     └────────────────── search (orchestrator) ──────────────┘
//! ```
//!
//! The normalizer, detector, tokenizer and ranking stages are pure and
//! synchronous. Only [`search::Searcher`] is async; it drives the
//! [`provider::LookupProvider`] on `tokio`.

pub mod config;
pub mod detector;
pub mod error;
pub mod normalizer;
pub mod provider;
pub mod ranking;
pub mod search;
pub mod sink;
pub mod tokenizer;
pub mod types;

pub use detector::is_expression;
pub use error::{LookupError, SearchError};
pub use normalizer::{normalize, NormalizedName};
pub use provider::{CatalogProvider, LookupProvider};
pub use ranking::{rank, rank_with, IndelRatio, NormalizedLevenshtein, Scorer, Similarity};
pub use search::{
    plan, CompoundQuery, CompoundResult, InputKind, QueryPlan, SearchOptions, SearchReport,
    Searcher,
};
pub use sink::DisplaySink;
pub use tokenizer::{extract_compounds, CompoundToken, TokenList};
pub use types::{MatchRecord, MatchType, ResultBundle, ScoredCandidate};
