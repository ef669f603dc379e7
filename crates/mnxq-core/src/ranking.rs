//! Similarity ranking of partial-match candidates.
//!
//! [`rank_with`] drops candidates that are exact matches of the query, scores
//! the rest with a [`Similarity`] measure, sorts them best-first and
//! truncates. The measure is pluggable; ordering, tie-breaking and
//! truncation are not.

use crate::normalizer::{comparison_key, NormalizedName};
use crate::types::{MatchRecord, ScoredCandidate};
use serde::Deserialize;

/// A string similarity measure on `0.0..=100.0`.
///
/// Implementations must be symmetric, score identical strings at exactly
/// `100.0`, and score lower as the edit distance grows relative to the
/// strings' lengths.
pub trait Similarity: Send + Sync {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Normalized InDel similarity: `100 * (1 - indel / (|a| + |b|))`, where
/// `indel` counts insertions and deletions only. Equivalent to
/// `200 * lcs / (|a| + |b|)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndelRatio;

impl Similarity for IndelRatio {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let total = a.len() + b.len();
        if total == 0 {
            return 100.0;
        }
        200.0 * lcs_len(&a, &b) as f64 / total as f64
    }
}

/// Normalized Levenshtein similarity: `100 * (1 - lev / max(|a|, |b|))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLevenshtein;

impl Similarity for NormalizedLevenshtein {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let longest = a.len().max(b.len());
        if longest == 0 {
            return 100.0;
        }
        100.0 * (1.0 - levenshtein(&a, &b) as f64 / longest as f64)
    }
}

/// Config-selectable measure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scorer {
    #[default]
    Indel,
    Levenshtein,
}

impl Similarity for Scorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        match self {
            Scorer::Indel => IndelRatio.score(a, b),
            Scorer::Levenshtein => NormalizedLevenshtein.score(a, b),
        }
    }
}

/// Rank `candidates` against `query` with the default [`IndelRatio`] measure.
pub fn rank(
    query: &NormalizedName,
    candidates: Vec<MatchRecord>,
    limit: usize,
) -> Vec<ScoredCandidate> {
    rank_with(&IndelRatio, query, candidates, limit)
}

/// Rank `candidates` against `query`, best first, at most `limit` long.
///
/// Candidates whose normalized, lower-cased name equals the query's are
/// excluded; they belong to the exact-match path. Equal scores keep their
/// input order.
pub fn rank_with<S: Similarity + ?Sized>(
    scorer: &S,
    query: &NormalizedName,
    candidates: Vec<MatchRecord>,
    limit: usize,
) -> Vec<ScoredCandidate> {
    let query_key = query.key();

    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .filter_map(|record| {
            let key = comparison_key(&record.name);
            (key != query_key).then(|| ScoredCandidate {
                score: scorer.score(&key, &query_key),
                record,
            })
        })
        .collect();

    // `sort_by` is stable, which is what keeps ties in supply order.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ac in a {
        let mut diag = 0;
        for (j, &bc) in b.iter().enumerate() {
            let up = row[j + 1];
            row[j + 1] = if ac == bc { diag + 1 } else { up.max(row[j]) };
            diag = up;
        }
    }
    row[b.len()]
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ac) in a.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;
        for (j, &bc) in b.iter().enumerate() {
            let temp = row[j + 1];
            let cost = usize::from(ac != bc);
            row[j + 1] = (row[j + 1] + 1).min(row[j] + 1).min(prev + cost);
            prev = temp;
        }
    }
    row[b.len()]
}
