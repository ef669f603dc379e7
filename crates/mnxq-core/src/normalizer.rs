//! Normalizer: canonicalizes compound names before any comparison.
//!
//! Unicode sub/superscript digits and signs become ASCII, typographic dashes
//! and curly single quotes become their plain forms, and surrounding
//! whitespace is trimmed. Every equality and similarity check in the crate
//! goes through [`NormalizedName::key`], never through the raw text.

use serde::Serialize;

/// Character substitutions applied by [`normalize`]. Every value is ASCII
/// and no value is itself a key, which makes normalization idempotent.
static CHAR_MAP: phf::Map<char, char> = phf::phf_map! {
    // subscripts
    '₀' => '0', '₁' => '1', '₂' => '2', '₃' => '3', '₄' => '4',
    '₅' => '5', '₆' => '6', '₇' => '7', '₈' => '8', '₉' => '9',
    '₊' => '+', '₋' => '-',
    // superscripts
    '⁰' => '0', '¹' => '1', '²' => '2', '³' => '3', '⁴' => '4',
    '⁵' => '5', '⁶' => '6', '⁷' => '7', '⁸' => '8', '⁹' => '9',
    '⁺' => '+', '⁻' => '-',
    // dashes
    '\u{2012}' => '-', '\u{2013}' => '-', '\u{2014}' => '-', '\u{2212}' => '-',
    // single quotes
    '\u{2018}' => '\'', '\u{2019}' => '\'', '\u{201A}' => '\'', '\u{201B}' => '\'',
};

/// A compound name after canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedName(String);

impl NormalizedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased comparison key.
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalize `text`. Total and idempotent.
pub fn normalize(text: &str) -> NormalizedName {
    let mapped: String = text
        .chars()
        .map(|c| CHAR_MAP.get(&c).copied().unwrap_or(c))
        .collect();
    NormalizedName(mapped.trim().to_string())
}

/// Shorthand for `normalize(text).key()`.
pub fn comparison_key(text: &str) -> String {
    normalize(text).key()
}
