//! Fake MetaNetX SPARQL endpoint for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1 and serves `POST /sparql`. It does not evaluate SPARQL: it pulls
//! the first string literal out of the `FILTER(...)` clause and answers from
//! an in-memory table of chemicals, which is enough for the three query
//! shapes `mnxq-sparql` sends:
//!
//! - `LCASE(?comment) = "x"`: rows whose comment equals `x`
//! - `CONTAINS(LCASE(?comment), "x")`: rows whose comment contains `x`
//! - `mnx:chemXref`: one row per cross-reference of the chemical named `x`
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeSparqlApi::start().await.unwrap();
//! api.add_chemical(RecordBuilder::new("water").mnx_id("WATER").build()).await;
//! api.add_xref("water", "chebi:15377").await;
//! let provider = SparqlProvider::new(&api.endpoint()).unwrap();
//! ```

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use mnxq_core::MatchRecord;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One request as the fake endpoint saw it.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub query: String,
}

/// State shared between the router and test code.
#[derive(Default)]
struct ApiState {
    chemicals: Vec<MatchRecord>,
    /// Lower-cased chemical name → cross-references.
    xrefs: HashMap<String, Vec<String>>,
    /// When set, every request is answered with this status and body.
    failure: Option<(StatusCode, String)>,
    /// When set, requests are accepted and never answered.
    stalled: bool,
    seen: Vec<SeenRequest>,
}

/// Handle to the running fake endpoint.
pub struct FakeSparqlApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeSparqlApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/sparql", post(sparql))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Endpoint URL, e.g. `http://127.0.0.1:PORT/sparql`.
    pub fn endpoint(&self) -> String {
        format!("http://{}/sparql", self.addr)
    }

    pub async fn add_chemical(&self, record: MatchRecord) {
        self.state.lock().await.chemicals.push(record);
    }

    pub async fn add_xref(&self, name: &str, xref: &str) {
        self.state
            .lock()
            .await
            .xrefs
            .entry(name.to_lowercase())
            .or_default()
            .push(xref.to_string());
    }

    /// Make every subsequent request fail with `status`.
    pub async fn fail_with(&self, status: StatusCode, body: &str) {
        self.state.lock().await.failure = Some((status, body.to_string()));
    }

    /// Accept every subsequent request and never respond.
    pub async fn stall(&self) {
        self.state.lock().await.stalled = true;
    }

    pub async fn requests(&self) -> Vec<SeenRequest> {
        self.state.lock().await.seen.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handler
// ---------------------------------------------------------------------------

async fn sparql(
    State(state): State<Arc<Mutex<ApiState>>>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let query = form_value(&body, "query").unwrap_or_default();
    let mut state = state.lock().await;
    state.seen.push(SeenRequest {
        accept: header(&headers, "accept"),
        content_type: header(&headers, "content-type"),
        query: query.clone(),
    });

    if state.stalled {
        drop(state);
        return std::future::pending::<(StatusCode, String)>().await;
    }
    if let Some((status, body)) = state.failure.clone() {
        return (status, body);
    }

    let needle = filter_literal(&query).unwrap_or_default();
    let rows: Vec<Value> = if query.contains("mnx:chemXref") {
        state
            .xrefs
            .get(&needle)
            .into_iter()
            .flatten()
            .map(|xref| json!({ "xref": { "type": "literal", "value": xref } }))
            .collect()
    } else {
        let contains = query.contains("CONTAINS(");
        state
            .chemicals
            .iter()
            .filter(|r| {
                let comment = r.name.to_lowercase();
                if contains {
                    comment.contains(&needle)
                } else {
                    comment == needle
                }
            })
            .map(binding_row)
            .collect()
    };

    let doc = json!({
        "head": { "vars": [] },
        "results": { "bindings": rows },
    });
    (StatusCode::OK, doc.to_string())
}

fn binding_row(record: &MatchRecord) -> Value {
    let mut row = serde_json::Map::new();
    row.insert(
        "comment".to_string(),
        json!({ "type": "literal", "value": record.name }),
    );
    for (key, value) in &record.attributes {
        row.insert(key.clone(), json!({ "type": "literal", "value": value }));
    }
    Value::Object(row)
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// First double-quoted literal after `FILTER(`, unescaped.
fn filter_literal(query: &str) -> Option<String> {
    let rest = &query[query.find("FILTER(")?..];
    let start = rest.find('"')? + 1;
    let mut out = String::new();
    let mut chars = rest[start..].chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Some(out),
            '\\' => out.extend(chars.next()),
            other => out.push(other),
        }
    }
    None
}

/// Value of `key` in an `application/x-www-form-urlencoded` body.
fn form_value(body: &str, key: &str) -> Option<String> {
    body.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then(|| percent_decode(v))
    })
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap_or("");
                match u8::from_str_radix(hex, 16) {
                    Ok(b) => {
                        out.push(b);
                        i += 3;
                        continue;
                    }
                    Err(_) => out.push(b'%'),
                }
            }
            b'+' => out.push(b' '),
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
