//! Tool proxy: discovery and invocation against one remote origin
//!
//! One [`ToolProxy`] serves one backend feature at one fixed origin. It
//! speaks a two-method JSON-RPC dialect (`tools/list`, `tools/call`),
//! wraps discovered tools as feature-namespaced [`LocalTool`]s, enforces
//! the precondition gate before every call, and applies the unwrap
//! policy: a transport rejection that embeds a tool-level error result
//! resolves as a normal result instead of an error.

mod error;

pub use error::{ProxyError, ProxyResult};

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::gate::PreconditionGate;
use crate::logging::SharedLogger;
use crate::transport::{Transport, TransportError};
use crate::types::{
    AccessPolicy, InvocationContext, RemoteTool, ToolCallResult, ToolMetadata,
};

/// Header carrying the caller's project id, sent only when one is known
pub const USER_PROJECT_HEADER: &str = "x-goog-user-project";

/// Expected body of a `tools/list` response
#[derive(Deserialize)]
struct ListToolsBody {
    result: ListToolsResult,
}

#[derive(Deserialize)]
struct ListToolsResult {
    tools: Vec<RemoteTool>,
}

/// Expected body of a successful `tools/call` response
#[derive(Deserialize)]
struct CallToolBody {
    result: ToolCallResult,
}

/// Proxy for one feature's remotely-hosted tools
///
/// Immutable after construction apart from the request id counter.
pub struct ToolProxy {
    feature: String,
    origin_url: String,
    policy: AccessPolicy,
    transport: Arc<dyn Transport>,
    gate: Arc<dyn PreconditionGate>,
    logger: SharedLogger,
    request_id: AtomicU64,
}

impl fmt::Debug for ToolProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolProxy")
            .field("feature", &self.feature)
            .field("origin_url", &self.origin_url)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ToolProxy {
    /// Create a proxy for one feature
    pub fn new(
        feature: impl Into<String>,
        origin_url: impl Into<String>,
        policy: AccessPolicy,
        transport: Arc<dyn Transport>,
        gate: Arc<dyn PreconditionGate>,
        logger: SharedLogger,
    ) -> Self {
        Self {
            feature: feature.into(),
            origin_url: origin_url.into(),
            policy,
            transport,
            gate,
            logger,
            request_id: AtomicU64::new(0),
        }
    }

    /// Feature identifier this proxy serves
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Remote origin this proxy talks to
    pub fn origin_url(&self) -> &str {
        &self.origin_url
    }

    /// Access policy attached at registration time
    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    /// Next request id: monotonic per instance, never reused
    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn envelope(&self, method: &str, params: Value) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": self.next_id(),
            "method": method,
            "params": params,
        })
    }

    /// Discover remote tools and wrap them for the local framework
    ///
    /// Issues a fresh `tools/list` fetch on every call; nothing is
    /// cached. Wrappers come back in remote order, named
    /// `<feature>_<remoteName>`, each carrying the instance's metadata.
    /// Takes the proxy by `Arc` because every wrapper captures a handle
    /// to its owning instance.
    pub async fn list_tools(self: Arc<Self>) -> ProxyResult<Vec<LocalTool>> {
        let request = self.envelope("tools/list", json!({}));
        let body = self
            .transport
            .request(&self.origin_url, request, &HashMap::new())
            .await
            .map_err(|e| ProxyError::RemoteFetch {
                feature: self.feature.clone(),
                message: e.to_string(),
            })?;

        let listing: ListToolsBody = serde_json::from_value(body)
            .map_err(|e| ProxyError::schema("tools/list", e.to_string()))?;

        self.logger.debug(&format!(
            "[ToolProxy] {}: discovered {} tools",
            self.feature,
            listing.result.tools.len()
        ));

        Ok(listing
            .result
            .tools
            .into_iter()
            .map(|tool| LocalTool::wrap(self.clone(), tool))
            .collect())
    }

    /// Invoke one remote tool by its unnamespaced name
    ///
    /// Sequence: gate check, envelope construction, project header,
    /// transport call, result extraction or error translation. Exactly
    /// one outbound request; no retries.
    pub async fn call_tool(
        &self,
        remote_name: &str,
        arguments: Value,
        ctx: &InvocationContext,
    ) -> ProxyResult<ToolCallResult> {
        self.gate
            .check(
                ctx.project_id.as_deref(),
                &self.origin_url,
                &self.feature,
                self.policy.requires_project,
            )
            .await?;

        let request = self.envelope(
            "tools/call",
            json!({ "name": remote_name, "arguments": arguments }),
        );

        let mut headers = HashMap::new();
        if let Some(project) = ctx.project_id.as_deref() {
            headers.insert(USER_PROJECT_HEADER.to_string(), project.to_string());
        }

        self.logger.debug(&format!(
            "[ToolProxy] {}: calling {}",
            self.feature, remote_name
        ));

        match self.transport.request(&self.origin_url, request, &headers).await {
            Ok(body) => {
                let parsed: CallToolBody = serde_json::from_value(body)
                    .map_err(|e| ProxyError::schema("tools/call", e.to_string()))?;
                Ok(parsed.result)
            }
            Err(err) => match embedded_error_result(&err) {
                // The remote tool failed at the tool level but the
                // transport surfaced it as a status error. That is a
                // normal result for the local framework, not an
                // exception.
                Some(result) => {
                    self.logger.debug(&format!(
                        "[ToolProxy] {}: {} returned a tool-level error",
                        self.feature, remote_name
                    ));
                    Ok(result)
                }
                None => Err(ProxyError::Transport(err)),
            },
        }
    }
}

/// Extract a tool-level error result embedded in a status rejection
///
/// Only a `Status` error whose body matches
/// `{result: {isError: true, content: [...]}}` qualifies; anything else
/// propagates as-is.
fn embedded_error_result(err: &TransportError) -> Option<ToolCallResult> {
    let TransportError::Status {
        body: Some(body), ..
    } = err
    else {
        return None;
    };

    let result = body.get("result")?;
    if !result.get("isError")?.as_bool()? {
        return None;
    }
    if !result.get("content")?.is_array() {
        return None;
    }

    serde_json::from_value(result.clone()).ok()
}

/// A remote tool wrapped for registration into the local framework
///
/// Created fresh on every discovery call; never cached or deduplicated.
/// Invocation goes through the owning proxy with the unnamespaced remote
/// name.
#[derive(Clone)]
pub struct LocalTool {
    /// Namespaced name: `<feature>_<remoteName>`
    pub name: String,
    /// Description as reported by the remote origin
    pub description: String,
    /// Input schema, passed through without interpretation
    pub input_schema: Value,
    /// Access metadata mirroring the owning instance
    pub metadata: ToolMetadata,
    remote_name: String,
    proxy: Arc<ToolProxy>,
}

impl fmt::Debug for LocalTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalTool")
            .field("name", &self.name)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl LocalTool {
    fn wrap(proxy: Arc<ToolProxy>, tool: RemoteTool) -> Self {
        Self {
            name: format!("{}_{}", proxy.feature, tool.name),
            description: tool.description,
            input_schema: tool.input_schema,
            metadata: ToolMetadata::new(proxy.feature.clone(), proxy.policy),
            remote_name: tool.name,
            proxy,
        }
    }

    /// The unnamespaced name the remote origin knows this tool by
    pub fn remote_name(&self) -> &str {
        &self.remote_name
    }

    /// Invoke the remote tool with the caller's arguments
    pub async fn invoke(
        &self,
        arguments: Value,
        ctx: &InvocationContext,
    ) -> ProxyResult<ToolCallResult> {
        self.proxy.call_tool(&self.remote_name, arguments, ctx).await
    }
}
