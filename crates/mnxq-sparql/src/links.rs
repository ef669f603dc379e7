//! Links to external databases and structure images.

use mnxq_core::normalize;
use serde::Serialize;

/// URL templates keyed by upper-cased database prefix. `{id}` is replaced by
/// the identifier after the first colon.
static XREF_URLS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "CHEBI" => "https://www.ebi.ac.uk/chebi/searchId.do?chebiId=CHEBI:{id}",
    "KEGG" => "https://www.kegg.jp/dbget-bin/www_bget?cpd:{id}",
    "HMDB" => "https://hmdb.ca/metabolites/{id}",
    "PUBCHEM" => "https://pubchem.ncbi.nlm.nih.gov/compound/{id}",
    "METACYC" => "https://metacyc.org/compound?orgid=META&id={id}",
};

/// A cross-reference and, for known databases, where to view it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XrefLink {
    pub id: String,
    pub url: Option<String>,
}

impl std::fmt::Display for XrefLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.url {
            Some(url) => write!(f, "{} <{}>", self.id, url),
            None => f.write_str(&self.id),
        }
    }
}

/// Resolve a `DB:ID` cross-reference. Anything without a colon, or with an
/// unknown prefix, comes back without a URL.
pub fn xref_link(xref: &str) -> XrefLink {
    let url = xref.split_once(':').and_then(|(db, id)| {
        XREF_URLS
            .get(db.to_ascii_uppercase().as_str())
            .map(|template| template.replace("{id}", id))
    });
    XrefLink {
        id: xref.to_string(),
        url,
    }
}

/// PubChem PNG rendering of the compound called `name`.
pub fn pubchem_image_url(name: &str) -> String {
    format!(
        "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/name/{}/PNG",
        percent_encode(normalize(name).as_str())
    )
}

/// Percent-encode everything except RFC 3986 unreserved characters.
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
