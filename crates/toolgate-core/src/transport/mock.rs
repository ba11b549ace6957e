//! Mock transport for testing
//!
//! Provides deterministic, scripted exchanges without network
//! dependencies, and records every outbound request for assertions.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::{Transport, TransportError, TransportResult};

/// One scripted exchange outcome
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Respond with a successful JSON body
    Body(Value),
    /// Reject with a non-success status, optionally carrying a body
    Status { status: u16, body: Option<Value> },
    /// Reject with a network failure
    Network(String),
}

/// A request the mock transport has seen
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub body: Value,
    pub headers: HashMap<String, String>,
}

/// Scripted transport for tests
///
/// Outcomes are consumed in FIFO order, one per request. Running out of
/// outcomes surfaces as a network failure rather than a panic so async
/// tests fail with a readable error.
#[derive(Debug, Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<MockOutcome>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Create a mock with no scripted outcomes
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers one request with a successful body
    pub fn replying(body: Value) -> Self {
        let mock = Self::new();
        mock.push(MockOutcome::Body(body));
        mock
    }

    /// Queue an outcome for the next unanswered request
    pub fn push(&self, outcome: MockOutcome) {
        self.outcomes.lock().push_back(outcome);
    }

    /// Snapshot of all requests seen so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests seen so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(
        &self,
        url: &str,
        body: Value,
        headers: &HashMap<String, String>,
    ) -> TransportResult<Value> {
        self.requests.lock().push(RecordedRequest {
            url: url.to_string(),
            body,
            headers: headers.clone(),
        });

        let outcome = self.outcomes.lock().pop_front();
        match outcome {
            Some(MockOutcome::Body(value)) => Ok(value),
            Some(MockOutcome::Status { status, body }) => {
                Err(TransportError::Status { status, body })
            }
            Some(MockOutcome::Network(message)) => Err(TransportError::Network {
                url: url.to_string(),
                message,
            }),
            None => Err(TransportError::Network {
                url: url.to_string(),
                message: "no scripted outcome left".to_string(),
            }),
        }
    }
}
