//! SPARQL query text for the MetaNetX knowledge graph.
//!
//! Compounds are `mnx:CHEM` resources. Their human-readable name is the
//! `rdfs:comment`; `rdfs:label` carries the MNX identifier. Name filters
//! compare against `LCASE(?comment)`, so the name is lower-cased here.

/// How a compound name filter compares against `?comment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// `LCASE(?comment) = "name"`
    Exact,
    /// `CONTAINS(LCASE(?comment), "name")`
    Contains,
}

/// Variables selected by [`compound_query`], in SELECT order.
pub const COMPOUND_VARS: &[&str] = &[
    "metabolite",
    "label",
    "comment",
    "reference",
    "formula",
    "charge",
    "inchi",
    "inchikey",
    "smiles",
];

/// The query returning one row per matching chemical.
pub fn compound_query(name: &str, mode: MatchMode) -> String {
    let literal = escape_literal(&name.to_lowercase());
    let filter = match mode {
        MatchMode::Exact => format!(r#"FILTER(LCASE(?comment) = "{literal}")"#),
        MatchMode::Contains => format!(r#"FILTER(CONTAINS(LCASE(?comment), "{literal}"))"#),
    };

    format!(
        r#"PREFIX mnx: <https://rdf.metanetx.org/schema/>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>

SELECT ?metabolite ?label ?comment ?reference ?formula ?charge ?inchi ?inchikey ?smiles
WHERE {{
    ?metabolite a mnx:CHEM .
    ?metabolite rdfs:label ?label .
    ?metabolite rdfs:comment ?comment .
    {filter}
    ?metabolite mnx:chemRefer ?reference .
    OPTIONAL {{ ?metabolite mnx:formula  ?formula }}
    OPTIONAL {{ ?metabolite mnx:charge   ?charge }}
    OPTIONAL {{ ?metabolite mnx:inchi    ?inchi }}
    OPTIONAL {{ ?metabolite mnx:inchikey ?inchikey }}
    OPTIONAL {{ ?metabolite mnx:smiles   ?smiles }}
}}
"#
    )
}

/// Cross-reference identifiers (`DB:ID`) of the chemical named `name`.
pub fn xref_query(name: &str) -> String {
    let literal = escape_literal(&name.to_lowercase());
    format!(
        r#"PREFIX mnx: <https://rdf.metanetx.org/schema/>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>

SELECT ?metabolite ?xref
WHERE {{
    ?metabolite a mnx:CHEM .
    ?metabolite rdfs:comment ?comment .
    FILTER(LCASE(?comment) = "{literal}")
    ?metabolite mnx:chemXref ?xref
}}
"#
    )
}

/// Escape `s` for use inside a double-quoted SPARQL string literal.
pub fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}
