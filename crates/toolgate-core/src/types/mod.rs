//! Core data model shared across the crate

mod context;
mod tool;

pub use context::InvocationContext;
pub use tool::{AccessPolicy, RemoteTool, ToolCallResult, ToolContent, ToolMetadata};
