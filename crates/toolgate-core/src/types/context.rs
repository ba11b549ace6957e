//! Invocation context supplied by the local tool-calling framework

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-supplied context threaded through every tool invocation
///
/// Read-only from the proxy's point of view: the proxy consults the
/// project id for precondition checks and header propagation, and never
/// touches the session payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvocationContext {
    /// Target project identifier, when the caller has one selected
    #[serde(rename = "projectId", skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Auxiliary session data, opaque to the proxy
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub session: Value,
}

impl InvocationContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target project id
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Attach auxiliary session data
    pub fn with_session(mut self, session: Value) -> Self {
        self.session = session;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_builder() {
        let ctx = InvocationContext::new()
            .with_project("test-project")
            .with_session(json!({ "user": "dev" }));

        assert_eq!(ctx.project_id.as_deref(), Some("test-project"));
        assert_eq!(ctx.session["user"], "dev");
    }

    #[test]
    fn test_context_default_has_no_project() {
        let ctx = InvocationContext::new();
        assert!(ctx.project_id.is_none());
        assert!(ctx.session.is_null());
    }
}
