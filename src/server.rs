//! HTTP front end.
//!
//! - `GET /search?q=…&match=…&limit=…`: search report as JSON
//! - `GET /refs?compound=…`: cross-references with links
//! - `GET /healthz`: liveness
//!
//! Validation failures, malformed query strings included, are `400` with
//! `{"error": "…"}`. Per-compound lookup failures stay inside the report and
//! do not change the status. A `/refs` lookup that outlives the searcher's
//! timeout is `504`.

use crate::backend::Backend;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use mnxq_core::config::check_partial_limit;
use mnxq_core::{LookupError, MatchType, SearchOptions, Searcher};
use mnxq_sparql::{xref_link, SparqlProvider};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Shared by every request.
pub struct AppState {
    pub searcher: Searcher<Backend>,
    /// Source for `/refs`. Absent when serving from a local catalog.
    pub sparql: Option<SparqlProvider>,
    /// Applied when a request leaves `match` or `limit` out.
    pub defaults: SearchOptions,
    /// Bound on one `/refs` lookup. Same as the searcher's per-compound timeout.
    pub refs_timeout: Duration,
}

impl AppState {
    pub fn new(searcher: Searcher<Backend>, defaults: SearchOptions) -> Self {
        let sparql = searcher.provider().sparql().cloned();
        let refs_timeout = searcher.timeout();
        Self {
            searcher,
            sparql,
            defaults,
            refs_timeout,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/refs", get(refs))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    #[serde(rename = "match")]
    match_type: Option<MatchType>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RefsParams {
    compound: String,
}

fn error(status: StatusCode, message: impl std::fmt::Display) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.to_string() })),
    )
        .into_response()
}

async fn search(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => return error(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    let limit = match params.limit.map(check_partial_limit).transpose() {
        Ok(limit) => limit.unwrap_or(state.defaults.limit),
        Err(err) => return error(StatusCode::BAD_REQUEST, err),
    };
    let options = SearchOptions {
        match_type: params.match_type.unwrap_or(state.defaults.match_type),
        limit,
    };

    match state.searcher.search(&params.q, options).await {
        Ok(report) => Json(report).into_response(),
        Err(err) => {
            tracing::debug!(input = %params.q, error = %err, "search rejected");
            error(StatusCode::BAD_REQUEST, err)
        }
    }
}

async fn refs(
    State(state): State<Arc<AppState>>,
    params: Result<Query<RefsParams>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => return error(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    let Some(sparql) = &state.sparql else {
        return error(
            StatusCode::SERVICE_UNAVAILABLE,
            "cross-references need a SPARQL endpoint",
        );
    };
    if params.compound.trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "compound must not be empty");
    }

    let lookup = sparql.external_refs(&params.compound);
    match tokio::time::timeout(state.refs_timeout, lookup).await {
        Ok(Ok(xrefs)) => {
            let links: Vec<_> = xrefs.iter().map(|x| xref_link(x)).collect();
            Json(links).into_response()
        }
        Ok(Err(err)) => {
            tracing::warn!(compound = %params.compound, error = %err, "xref lookup failed");
            error(StatusCode::BAD_GATEWAY, err)
        }
        Err(_) => {
            tracing::warn!(
                compound = %params.compound,
                timeout_ms = state.refs_timeout.as_millis() as u64,
                "xref lookup timed out"
            );
            error(
                StatusCode::GATEWAY_TIMEOUT,
                LookupError::Timeout(state.refs_timeout),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
