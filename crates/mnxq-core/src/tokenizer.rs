//! Expression tokenizer: splits reaction expressions into compound names.
//!
//! Separators are replaced by a single delimiter, the result is split, and
//! each segment is cleaned of stoichiometric coefficients and trailing phase
//! annotations. Surviving segments are deduplicated on their normalized,
//! lower-cased form in first-seen order.

use crate::normalizer::comparison_key;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Substrings that separate compounds in an expression.
///
/// No entry is a substring of another, so replacement order is irrelevant.
/// Keep it that way when adding separators (`separators_do_not_overlap`
/// checks it).
pub const SEPARATORS: &[&str] = &[
    // arrows
    "→", "⟶", "->", "⇒", "⇆", "⇌", "↔", "⟷",
    // plus signs
    "+", "＋",
    // alternatives
    "|", "/", "\\",
    // lists
    ",", ";",
    // brackets
    "⟨", "⟩", "[", "]", "(", ")",
];

const DELIMITER: char = '|';

/// Leading stoichiometric coefficient, e.g. the `2 ` in `2 H2O`. Any
/// Unicode decimal digit counts, so fullwidth `２ H2O` is stripped too.
static COEFFICIENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s*").expect("coefficient pattern is valid"));

/// Trailing phase indicator as a whole word: `NaCl aq`, or a bare `aq`.
static PHASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s+)(?:aq|s|l|g)$").expect("phase pattern is valid"));

/// A compound name pulled out of an expression. Always longer than one
/// character and already trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CompoundToken(String);

impl CompoundToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CompoundToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for CompoundToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Ordered, deduplicated tokens from one [`extract_compounds`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenList(Vec<CompoundToken>);

impl TokenList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompoundToken> {
        self.0.iter()
    }

    /// Borrowed view of the token texts, in order.
    pub fn to_strs(&self) -> Vec<&str> {
        self.0.iter().map(CompoundToken::as_str).collect()
    }
}

impl IntoIterator for TokenList {
    type Item = CompoundToken;
    type IntoIter = std::vec::IntoIter<CompoundToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a CompoundToken;
    type IntoIter = std::slice::Iter<'a, CompoundToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Split `expression` into compound names.
///
/// Returns an empty list when nothing survives cleaning; callers decide what
/// that means.
pub fn extract_compounds(expression: &str) -> TokenList {
    let delimiter = DELIMITER.to_string();
    let delimited = SEPARATORS
        .iter()
        .fold(expression.to_string(), |acc, sep| acc.replace(sep, &delimiter));

    let (_, tokens) = delimited
        .split(DELIMITER)
        .filter_map(clean_segment)
        .fold(
            (HashSet::new(), Vec::new()),
            |(mut seen, mut tokens), segment| {
                if seen.insert(comparison_key(&segment)) {
                    tokens.push(CompoundToken(segment));
                }
                (seen, tokens)
            },
        );

    TokenList(tokens)
}

/// Trim, drop coefficient and phase annotation, and reject anything that is
/// one character or shorter.
fn clean_segment(segment: &str) -> Option<String> {
    let segment = segment.trim();
    if segment.is_empty() {
        return None;
    }
    let segment = COEFFICIENT.replace(segment, "");
    let segment = PHASE.replace(&segment, "");
    let segment = segment.trim();

    (segment.chars().count() > 1).then(|| segment.to_string())
}
