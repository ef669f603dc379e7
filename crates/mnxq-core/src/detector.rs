//! Expression detection: decides whether input is one compound or many.

/// Reaction arrows and plus signs that mark multi-compound input.
pub const EXPRESSION_INDICATORS: &[&str] = &[
    "→", "⟶", "->", "⇒", "⇆", "⇌", "↔", "⟷", "+", "＋",
];

/// `true` if `text` contains any [`EXPRESSION_INDICATORS`] member.
///
/// Runs on the raw text. A name that legitimately contains `+` (an ion, say)
/// is classified as an expression and comes back out of the tokenizer as a
/// single token.
pub fn is_expression(text: &str) -> bool {
    EXPRESSION_INDICATORS.iter().any(|ind| text.contains(ind))
}
