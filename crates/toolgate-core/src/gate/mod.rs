//! Precondition gate consumed before every remote tool call
//!
//! The gate decides whether a caller may use a feature at all:
//! authentication, project selection, and backend capability enablement.
//! The proxy depends on this check but does not implement it; the
//! embedding framework supplies the real implementation.

use async_trait::async_trait;
use thiserror::Error;

/// Reasons a gate can refuse a call
#[derive(Error, Debug)]
pub enum GateError {
    #[error("caller is not authenticated")]
    Unauthenticated,

    #[error("a project must be selected before using {feature} tools")]
    ProjectRequired { feature: String },

    #[error("{feature} is not enabled for project {project}")]
    FeatureDisabled { feature: String, project: String },

    #[error("{0}")]
    Other(String),
}

/// Authorization/enablement check run before every invocation
///
/// A rejection aborts the call: the remote origin is never contacted.
/// Errors propagate to the caller unchanged.
#[async_trait]
pub trait PreconditionGate: Send + Sync {
    /// Validate that a call against `feature` at `origin_url` may proceed
    async fn check(
        &self,
        project_id: Option<&str>,
        origin_url: &str,
        feature: &str,
        requires_project: bool,
    ) -> Result<(), GateError>;
}

/// Gate that lets every call through
///
/// Default wiring for environments where the framework performs its own
/// checks, and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllGate;

#[async_trait]
impl PreconditionGate for AllowAllGate {
    async fn check(
        &self,
        _project_id: Option<&str>,
        _origin_url: &str,
        _feature: &str,
        _requires_project: bool,
    ) -> Result<(), GateError> {
        Ok(())
    }
}
