//! Resolver configuration.
//!
//! Supplied by the hosting application, either built in code or deserialized
//! from JSON. The resolver reads no environment variables itself.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ResolutionError;
use crate::registry::OwnerResolutionStrategy;

/// Network used when none is configured
pub const DEFAULT_NETWORK_ID: &str = "testnet";

/// Configuration for a did:near resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Account of the identity registry contract, e.g. `neardti.testnet`
    pub contract_id: String,

    /// JSON-RPC endpoint of the chain
    pub rpc_url: Url,

    /// Named network the endpoint belongs to
    #[serde(default = "default_network_id")]
    pub network_id: String,

    /// How the registry's owner value is turned into key material
    #[serde(default)]
    pub strategy: OwnerResolutionStrategy,

    /// Per-request timeout in milliseconds; no timeout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_network_id() -> String {
    DEFAULT_NETWORK_ID.to_string()
}

impl ResolverConfig {
    /// Creates a configuration for `contract_id` on the `testnet` network
    pub fn new(contract_id: impl Into<String>, rpc_url: &str) -> Result<Self, ResolutionError> {
        let config = Self {
            contract_id: contract_id.into(),
            rpc_url: Url::parse(rpc_url)?,
            network_id: default_network_id(),
            strategy: OwnerResolutionStrategy::default(),
            timeout_ms: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the network id
    pub fn with_network_id(mut self, network_id: impl Into<String>) -> Self {
        self.network_id = network_id.into();
        self
    }

    /// Sets the owner resolution strategy
    pub fn with_strategy(mut self, strategy: OwnerResolutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the per-request timeout, rounded up to whole milliseconds
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.timeout_ms = Some(u64::try_from(millis).unwrap_or(u64::MAX));
        self
    }

    /// The per-request timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Checks that the configuration can be used to build a resolver
    pub fn validate(&self) -> Result<(), ResolutionError> {
        if self.contract_id.trim().is_empty() {
            return Err(ResolutionError::InvalidConfig("contract id is empty".to_string()));
        }
        if self.network_id.trim().is_empty() {
            return Err(ResolutionError::InvalidConfig("network id is empty".to_string()));
        }
        if !matches!(self.rpc_url.scheme(), "http" | "https") {
            return Err(ResolutionError::InvalidConfig(format!(
                "unsupported RPC URL scheme: {}",
                self.rpc_url.scheme()
            )));
        }
        if self.timeout_ms == Some(0) {
            return Err(ResolutionError::InvalidConfig("timeout must be positive".to_string()));
        }
        Ok(())
    }
}
