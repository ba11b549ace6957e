//! Server registry: the immutable feature-to-proxy map
//!
//! Built once at process start from explicit [`ServerConfig`]s and
//! passed by reference to consumers. There is no global registry; the
//! embedding framework owns the instance.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::gate::PreconditionGate;
use crate::logging::SharedLogger;
use crate::proxy::{LocalTool, ProxyResult, ToolProxy};
use crate::transport::Transport;
use crate::types::AccessPolicy;

/// Configuration for one feature's proxy instance
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Feature identifier (e.g. "firestore")
    pub feature: String,
    /// Remote origin serving this feature's tools
    pub origin_url: String,
    /// Access policy enforced before every invocation
    pub policy: AccessPolicy,
}

impl ServerConfig {
    /// Create a server config
    pub fn new(
        feature: impl Into<String>,
        origin_url: impl Into<String>,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            feature: feature.into(),
            origin_url: origin_url.into(),
            policy,
        }
    }
}

/// The fixed feature table registered at startup
static DEFAULT_FEATURES: Lazy<Vec<(&'static str, AccessPolicy)>> = Lazy::new(|| {
    vec![
        ("firestore", AccessPolicy::new(true, true)),
        ("auth", AccessPolicy::new(true, true)),
        ("storage", AccessPolicy::new(true, true)),
        ("dataconnect", AccessPolicy::new(true, true)),
        ("docs", AccessPolicy::open()),
    ]
});

/// Build the default per-feature configs against one base origin
///
/// Each feature is served at `<base_origin>/<feature>/mcp`.
pub fn default_server_configs(base_origin: &str) -> Vec<ServerConfig> {
    let base = base_origin.trim_end_matches('/');
    DEFAULT_FEATURES
        .iter()
        .map(|(feature, policy)| {
            ServerConfig::new(*feature, format!("{base}/{feature}/mcp"), *policy)
        })
        .collect()
}

/// Immutable mapping from feature identifier to its proxy instance
pub struct ServerRegistry {
    // Registration order preserved for aggregated discovery
    proxies: Vec<Arc<ToolProxy>>,
    by_feature: HashMap<String, usize>,
}

impl ServerRegistry {
    /// Build the registry from explicit configs
    ///
    /// A duplicate feature keeps the first registration and logs the
    /// conflict.
    pub fn build(
        configs: Vec<ServerConfig>,
        transport: Arc<dyn Transport>,
        gate: Arc<dyn PreconditionGate>,
        logger: SharedLogger,
    ) -> Self {
        let mut proxies = Vec::with_capacity(configs.len());
        let mut by_feature = HashMap::with_capacity(configs.len());

        for config in configs {
            if by_feature.contains_key(&config.feature) {
                logger.warn(&format!(
                    "[ServerRegistry] duplicate feature {}, keeping first registration",
                    config.feature
                ));
                continue;
            }
            let proxy = Arc::new(ToolProxy::new(
                config.feature.clone(),
                config.origin_url,
                config.policy,
                transport.clone(),
                gate.clone(),
                logger.clone(),
            ));
            by_feature.insert(config.feature, proxies.len());
            proxies.push(proxy);
        }

        logger.info(&format!(
            "[ServerRegistry] registered {} feature proxies",
            proxies.len()
        ));

        Self {
            proxies,
            by_feature,
        }
    }

    /// Get the proxy serving one feature
    pub fn get(&self, feature: &str) -> Option<&Arc<ToolProxy>> {
        self.by_feature.get(feature).map(|&i| &self.proxies[i])
    }

    /// Feature identifiers in registration order
    pub fn features(&self) -> Vec<&str> {
        self.proxies.iter().map(|p| p.feature()).collect()
    }

    /// Number of registered proxies
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// Check whether any proxies are registered
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Discover tools across every registered proxy
    ///
    /// Proxies are queried in registration order; the first failure
    /// surfaces to the caller.
    pub async fn list_all_tools(&self) -> ProxyResult<Vec<LocalTool>> {
        let mut tools = Vec::new();
        for proxy in &self.proxies {
            tools.extend(proxy.clone().list_tools().await?);
        }
        Ok(tools)
    }
}
