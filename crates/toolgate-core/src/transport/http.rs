//! HTTP transport backed by reqwest

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use super::{Transport, TransportError, TransportResult};
use crate::logging::SharedLogger;

/// Production transport: HTTPS POST with optional bearer credential
pub struct HttpTransport {
    client: reqwest::Client,
    bearer_token: Option<String>,
    logger: SharedLogger,
}

impl HttpTransport {
    /// Create a transport without credentials
    pub fn new(logger: SharedLogger) -> Self {
        Self {
            client: reqwest::Client::new(),
            bearer_token: None,
            logger,
        }
    }

    /// Attach a bearer credential sent on every request
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        url: &str,
        body: Value,
        headers: &HashMap<String, String>,
    ) -> TransportResult<Value> {
        let mut request = self.client.post(url).json(&body);

        if let Some(ref token) = self.bearer_token {
            request = request.bearer_auth(token);
        }
        for (name, value) in headers {
            request = request.header(name, value);
        }

        self.logger
            .debug(&format!("[HttpTransport] POST {}", url));

        let response = request.send().await.map_err(|e| TransportError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| TransportError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            self.logger.warn(&format!(
                "[HttpTransport] {} answered {}",
                url,
                status.as_u16()
            ));
            // Keep the body when it parses; rejected tool calls embed
            // their result there.
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: serde_json::from_str(&text).ok(),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use std::sync::Arc;

    #[test]
    fn test_transport_construction() {
        let transport = HttpTransport::new(Arc::new(NoOpLogger::new()));
        assert!(transport.bearer_token.is_none());

        let with_token = transport.with_bearer_token("ya29.token");
        assert_eq!(with_token.bearer_token.as_deref(), Some("ya29.token"));
    }
}
