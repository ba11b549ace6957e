//! Toolgate Core
//!
//! A remote tool-invocation proxy: exposes a fixed set of remotely-hosted
//! callable tools to a local tool-calling framework, enforcing per-feature
//! access preconditions and translating a JSON-RPC remote protocol into
//! local call semantics.
//!
//! Each backend feature (e.g. `"firestore"`) is served by one [`ToolProxy`]
//! pointed at a single fixed origin. The proxy supports exactly two remote
//! operations: tool discovery (`tools/list`) and tool invocation
//! (`tools/call`). Discovered tools are wrapped as [`LocalTool`]s with
//! feature-namespaced names and the owning instance's access metadata.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use toolgate_core::{
//!     AllowAllGate, HttpTransport, InvocationContext, NoOpLogger,
//!     ServerRegistry, default_server_configs,
//! };
//!
//! let logger = Arc::new(NoOpLogger::new());
//! let transport = Arc::new(HttpTransport::new(logger.clone()));
//! let registry = ServerRegistry::build(
//!     default_server_configs("https://mcp.example.googleapis.com"),
//!     transport,
//!     Arc::new(AllowAllGate),
//!     logger,
//! );
//!
//! let tools = registry.list_all_tools().await?;
//! let ctx = InvocationContext::new().with_project("my-project");
//! let result = tools[0].invoke(serde_json::json!({}), &ctx).await?;
//! ```

pub mod types;
pub mod logging;
pub mod transport;
pub mod gate;
pub mod proxy;
pub mod registry;

// Re-export commonly used types
pub use types::{
    AccessPolicy, InvocationContext, RemoteTool, ToolCallResult, ToolContent, ToolMetadata,
};

pub use logging::{ConsoleLogger, Logger, NoOpLogger, SharedLogger};

pub use transport::{
    HttpTransport, MockOutcome, MockTransport, RecordedRequest, Transport, TransportError,
    TransportResult,
};

pub use gate::{AllowAllGate, GateError, PreconditionGate};

pub use proxy::{LocalTool, ProxyError, ProxyResult, ToolProxy, USER_PROJECT_HEADER};

pub use registry::{default_server_configs, ServerConfig, ServerRegistry};
