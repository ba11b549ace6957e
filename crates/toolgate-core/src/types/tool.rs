//! Tool model: access policies, remote descriptors, call results

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Access policy attached to one feature's proxy instance
///
/// Controls which precondition checks run before a tool call is
/// forwarded to the remote origin. Immutable for the lifetime of the
/// owning instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    /// Whether the caller must be authenticated
    #[serde(rename = "requiresAuth")]
    pub requires_auth: bool,
    /// Whether a target project must be selected and enabled
    #[serde(rename = "requiresProject")]
    pub requires_project: bool,
}

impl AccessPolicy {
    /// Create a new access policy
    pub fn new(requires_auth: bool, requires_project: bool) -> Self {
        Self {
            requires_auth,
            requires_project,
        }
    }

    /// Policy requiring neither authentication nor a project
    pub fn open() -> Self {
        Self::default()
    }
}

/// Tool descriptor as received from a `tools/list` discovery response
///
/// The schema is an opaque structured value; the proxy passes it through
/// without interpretation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteTool {
    /// Unnamespaced tool name as the remote origin knows it
    pub name: String,
    /// Description of what the tool does
    #[serde(default)]
    pub description: String,
    /// JSON Schema for the input parameters (opaque passthrough)
    #[serde(rename = "inputSchema", default)]
    pub input_schema: Value,
}

/// Metadata attached to every wrapped tool
///
/// Mirrors the owning proxy instance's access policy and feature. It is
/// never derived from the remote tool's own data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMetadata {
    #[serde(rename = "requiresAuth")]
    pub requires_auth: bool,
    #[serde(rename = "requiresProject")]
    pub requires_project: bool,
    /// Feature identifier of the owning proxy instance
    pub feature: String,
}

impl ToolMetadata {
    /// Build metadata for one feature from its access policy
    pub fn new(feature: impl Into<String>, policy: AccessPolicy) -> Self {
        Self {
            requires_auth: policy.requires_auth,
            requires_project: policy.requires_project,
            feature: feature.into(),
        }
    }
}

/// One content part of a tool call result
///
/// Text parts are recognized; everything else is carried through
/// untouched so the proxy stays decoupled from the remote content model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolContent {
    /// A `{type: "text", text: ...}` part
    Text {
        #[serde(rename = "type")]
        content_type: String,
        text: String,
    },
    /// Any other content shape, passed through verbatim
    Other(Value),
}

impl ToolContent {
    /// Create a text content part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            content_type: "text".to_string(),
            text: text.into(),
        }
    }
}

/// The `result` object of a `tools/call` exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResult {
    /// Result content parts, in remote order
    pub content: Vec<ToolContent>,
    /// Whether the remote tool reported a tool-level failure
    #[serde(rename = "isError", default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolCallResult {
    /// Check whether this result represents a tool-level failure
    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// Extract all text content joined with newlines
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                ToolContent::Text { content_type, text } if content_type == "text" => {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_mirrors_policy() {
        let meta = ToolMetadata::new("firestore", AccessPolicy::new(true, true));
        assert!(meta.requires_auth);
        assert!(meta.requires_project);
        assert_eq!(meta.feature, "firestore");

        let open = ToolMetadata::new("docs", AccessPolicy::open());
        assert!(!open.requires_auth);
        assert!(!open.requires_project);
    }

    #[test]
    fn test_remote_tool_deserialize() {
        let tool: RemoteTool = serde_json::from_value(json!({
            "name": "query_collection",
            "description": "Run a structured query",
            "inputSchema": {
                "type": "object",
                "properties": { "path": { "type": "string" } }
            }
        }))
        .unwrap();

        assert_eq!(tool.name, "query_collection");
        assert_eq!(tool.input_schema["properties"]["path"]["type"], "string");
    }

    #[test]
    fn test_remote_tool_missing_optionals() {
        let tool: RemoteTool = serde_json::from_value(json!({ "name": "bare" })).unwrap();
        assert_eq!(tool.description, "");
        assert!(tool.input_schema.is_null());
    }

    #[test]
    fn test_tool_call_result_text() {
        let result = ToolCallResult {
            content: vec![
                ToolContent::text("Hello"),
                ToolContent::Other(json!({ "type": "image", "data": "..." })),
                ToolContent::text("World"),
            ],
            is_error: None,
        };
        assert_eq!(result.text(), "Hello\nWorld");
        assert!(!result.is_error());
    }

    #[test]
    fn test_tool_content_roundtrip() {
        let raw = json!({ "type": "text", "text": "remote error" });
        let part: ToolContent = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(part, ToolContent::text("remote error"));
        assert_eq!(serde_json::to_value(&part).unwrap(), raw);
    }

    #[test]
    fn test_tool_content_unknown_shape_passthrough() {
        let raw = json!({ "type": "resource", "resource": { "uri": "file:///x" } });
        let part: ToolContent = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(part, ToolContent::Other(raw.clone()));
        assert_eq!(serde_json::to_value(&part).unwrap(), raw);
    }

    #[test]
    fn test_is_error_serialization_omitted_when_none() {
        let result = ToolCallResult {
            content: vec![],
            is_error: None,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("isError").is_none());

        let flagged = ToolCallResult {
            content: vec![],
            is_error: Some(true),
        };
        let value = serde_json::to_value(&flagged).unwrap();
        assert_eq!(value["isError"], json!(true));
    }
}
