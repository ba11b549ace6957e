//! Transport client abstraction for the remote JSON-RPC exchange
//!
//! The proxy never talks to the network directly: all request/response
//! I/O and credential injection goes through the [`Transport`] trait.

mod http;
mod mock;

pub use http::HttpTransport;
pub use mock::{MockOutcome, MockTransport, RecordedRequest};

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during a transport exchange
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request never completed (connection, DNS, IO)
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-success status
    ///
    /// The response body is kept when it parsed as JSON; a rejected
    /// tool call can embed a tool-level error result here.
    #[error("server returned status {status}")]
    Status { status: u16, body: Option<Value> },

    /// The response body was not valid JSON
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),
}

pub type TransportResult<T> = Result<T, TransportError>;

/// Request/response exchange with a remote origin
///
/// One call maps to exactly one HTTPS POST. Implementations own header
/// injection for credentials; per-call headers supplied by the caller
/// are sent in addition.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body to `url` and return the parsed response body
    async fn request(
        &self,
        url: &str,
        body: Value,
        headers: &HashMap<String, String>,
    ) -> TransportResult<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_error_keeps_body() {
        let err = TransportError::Status {
            status: 500,
            body: Some(json!({ "result": { "isError": true } })),
        };
        assert_eq!(err.to_string(), "server returned status 500");
        match err {
            TransportError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.is_some());
            }
            _ => panic!("expected status variant"),
        }
    }
}
