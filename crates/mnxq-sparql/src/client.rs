//! HTTP client for a SPARQL 1.1 endpoint and the lookup provider built on it.
//!
//! Queries are POSTed as `application/x-www-form-urlencoded` and results are
//! requested as `application/sparql-results+json`. Each binding row becomes a
//! map from variable name to its lexical value.

use crate::error::SparqlError;
use crate::links::percent_encode;
use crate::query::{compound_query, xref_query, MatchMode};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{header, Method, Request, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use mnxq_core::{LookupError, LookupProvider, MatchRecord, NormalizedName};
use serde::Deserialize;
use std::collections::HashMap;

const RESULTS_JSON: &str = "application/sparql-results+json";
const FORM: &str = "application/x-www-form-urlencoded";

/// One result row: variable name → value. Unbound variables are absent.
pub type Binding = HashMap<String, String>;

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ResultsDocument {
    #[serde(default)]
    results: ResultSet,
}

#[derive(Debug, Default, Deserialize)]
struct ResultSet {
    #[serde(default)]
    bindings: Vec<HashMap<String, Term>>,
}

#[derive(Debug, Deserialize)]
struct Term {
    value: String,
}

/// Decode a `application/sparql-results+json` document into rows.
pub fn decode_bindings(body: &[u8]) -> Result<Vec<Binding>, SparqlError> {
    let doc: ResultsDocument = serde_json::from_slice(body)?;
    Ok(doc
        .results
        .bindings
        .into_iter()
        .map(|row| row.into_iter().map(|(var, term)| (var, term.value)).collect())
        .collect())
}

/// Turn a compound row into a [`MatchRecord`] named by its `comment`.
/// Rows without a comment are not usable and yield `None`.
pub fn record_from_binding(mut row: Binding) -> Option<MatchRecord> {
    let name = row.remove("comment")?;
    Some(MatchRecord {
        name,
        attributes: row.into_iter().collect(),
    })
}

// ---------------------------------------------------------------------------
// SparqlProvider
// ---------------------------------------------------------------------------

/// Lookup provider backed by the MetaNetX SPARQL endpoint.
#[derive(Debug, Clone)]
pub struct SparqlProvider {
    endpoint: Uri,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl SparqlProvider {
    /// Create a provider for `endpoint`, e.g. `http://rdf.metanetx.org/sparql`.
    pub fn new(endpoint: &str) -> Result<Self, SparqlError> {
        let uri: Uri = endpoint
            .parse()
            .map_err(|_| SparqlError::InvalidEndpoint(endpoint.to_string()))?;
        match uri.scheme_str() {
            Some("http") if uri.host().is_some() => {}
            Some("http") | None => return Err(SparqlError::InvalidEndpoint(endpoint.to_string())),
            Some(other) => return Err(SparqlError::UnsupportedScheme(other.to_string())),
        }

        let client = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self {
            endpoint: uri,
            client,
        })
    }

    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    /// Run a SELECT query and return its rows.
    pub async fn select(&self, query: &str) -> Result<Vec<Binding>, SparqlError> {
        let body = format!("query={}", percent_encode(query));
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.clone())
            .header(header::ACCEPT, RESULTS_JSON)
            .header(header::CONTENT_TYPE, FORM)
            .header(header::USER_AGENT, concat!("mnxq/", env!("CARGO_PKG_VERSION")))
            .body(Full::new(Bytes::from(body)))?;

        let response = self.client.request(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();

        if !status.is_success() {
            let body: String = String::from_utf8_lossy(&bytes).chars().take(200).collect();
            return Err(SparqlError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows = decode_bindings(&bytes)?;
        tracing::debug!(endpoint = %self.endpoint, rows = rows.len(), "sparql select");
        Ok(rows)
    }

    /// Chemicals whose comment equals or contains `name`.
    pub async fn compounds(
        &self,
        name: &str,
        mode: MatchMode,
    ) -> Result<Vec<MatchRecord>, SparqlError> {
        let rows = self.select(&compound_query(name, mode)).await?;
        Ok(rows.into_iter().filter_map(record_from_binding).collect())
    }

    /// Cross-reference identifiers for the chemical named `name`.
    pub async fn external_refs(&self, name: &str) -> Result<Vec<String>, SparqlError> {
        let name = mnxq_core::normalize(name);
        let rows = self.select(&xref_query(name.as_str())).await?;
        Ok(rows
            .into_iter()
            .filter_map(|mut row| row.remove("xref"))
            .collect())
    }
}

impl LookupProvider for SparqlProvider {
    async fn lookup_exact(&self, name: &NormalizedName) -> Result<Vec<MatchRecord>, LookupError> {
        self.compounds(name.as_str(), MatchMode::Exact)
            .await
            .map_err(LookupError::provider)
    }

    async fn lookup_contains(
        &self,
        name: &NormalizedName,
    ) -> Result<Vec<MatchRecord>, LookupError> {
        self.compounds(name.as_str(), MatchMode::Contains)
            .await
            .map_err(LookupError::provider)
    }
}
