//! Proxy error types

use thiserror::Error;

use crate::gate::GateError;
use crate::transport::TransportError;

/// Errors that can occur during discovery or invocation
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Discovery could not fetch the remote tool listing
    #[error("failed to fetch remote tools for {feature}: {message}")]
    RemoteFetch { feature: String, message: String },

    /// A response body did not match the expected shape
    #[error("unexpected {method} response shape: {message}")]
    Schema {
        method: &'static str,
        message: String,
    },

    /// The precondition gate refused the call; the remote was never
    /// contacted
    #[error(transparent)]
    Precondition(#[from] GateError),

    /// Any other invocation failure, rethrown unmodified
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ProxyError {
    pub(crate) fn schema(method: &'static str, message: impl Into<String>) -> Self {
        Self::Schema {
            method,
            message: message.into(),
        }
    }
}

pub type ProxyResult<T> = Result<T, ProxyError>;
