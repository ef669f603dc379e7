use thiserror::Error;

/// Failures talking to a SPARQL endpoint.
#[derive(Debug, Error)]
pub enum SparqlError {
    #[error("invalid SPARQL endpoint {0:?}")]
    InvalidEndpoint(String),
    /// Only plain `http` endpoints are supported; there is no TLS stack.
    #[error("unsupported endpoint scheme {0:?} (only http is supported)")]
    UnsupportedScheme(String),
    #[error("failed to build request: {0}")]
    Request(#[from] hyper::http::Error),
    #[error("HTTP transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),
    #[error("failed to read response body: {0}")]
    Body(#[from] hyper::Error),
    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed SPARQL results: {0}")]
    Decode(#[from] serde_json::Error),
}
