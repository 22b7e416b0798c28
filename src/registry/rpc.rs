//! NEAR JSON-RPC registry client.
//!
//! Every call is a single `query` request; there are no retries and no signing
//! keys. Failures reaching or executing on the node map to
//! `RegistryQueryFailed`, answers of the wrong shape to `MalformedResponse`.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use super::{Registry, IDENTITY_OWNER_METHOD};
use crate::config::ResolverConfig;
use crate::error::ResolutionError;

/// Public RPC endpoint of NEAR mainnet
pub const MAINNET_RPC_URL: &str = "https://rpc.mainnet.near.org";

/// Public RPC endpoint of NEAR testnet
pub const TESTNET_RPC_URL: &str = "https://rpc.testnet.near.org";

/// Registry client talking to a NEAR RPC node
#[derive(Debug, Clone)]
pub struct RpcRegistry {
    /// HTTP client, shared by every resolution using this registry
    client: Client,
    /// JSON-RPC endpoint
    rpc_url: Url,
    /// Named network the endpoint belongs to
    network_id: String,
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'a str,
    id: &'a str,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    cause: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RPC error {}: {}", self.code, self.message)?;
        if let Some(name) = &self.name {
            write!(f, " ({})", name)?;
        }
        if let Some(cause) = &self.cause {
            write!(f, " cause: {}", cause)?;
        } else if let Some(data) = &self.data {
            write!(f, " data: {}", data)?;
        }
        Ok(())
    }
}

/// Result of a `call_function` query
#[derive(Debug, Deserialize)]
struct CallFunctionResult {
    /// Raw bytes of the JSON-encoded return value
    result: Vec<u8>,
}

/// Result of a `view_account` query
#[derive(Debug, Deserialize)]
struct ViewAccountResult {
    public_key: Value,
}

impl RpcRegistry {
    /// Creates a registry client for `rpc_url` on the named network
    pub fn new(rpc_url: Url, network_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            rpc_url,
            network_id: network_id.into(),
        }
    }

    /// Creates a registry client from resolver configuration
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ResolutionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ResolutionError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            rpc_url: config.rpc_url.clone(),
            network_id: config.network_id.clone(),
        })
    }

    /// Creates a registry client for the public endpoint of a named network
    pub fn for_network(network_id: &str) -> Result<Self, ResolutionError> {
        let rpc_url = match network_id {
            "mainnet" => MAINNET_RPC_URL,
            "testnet" => TESTNET_RPC_URL,
            other => {
                return Err(ResolutionError::InvalidConfig(format!(
                    "no known RPC endpoint for network {}",
                    other
                )))
            }
        };
        Ok(Self::new(Url::parse(rpc_url)?, network_id))
    }

    /// The JSON-RPC endpoint
    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// The named network
    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    /// Sends one `query` request and returns its `result` object
    async fn query(&self, params: Value) -> Result<Value, ResolutionError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: "dontcare",
            method: "query",
            params,
        };
        tracing::trace!(network = %self.network_id, url = %self.rpc_url, "sending RPC query");

        let response = self.client.post(self.rpc_url.clone()).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        // Nodes may report query errors with a non-2xx status and a JSON-RPC body
        let envelope = serde_json::from_str::<RpcResponse>(&body);
        if !status.is_success() {
            let detail = match envelope {
                Ok(RpcResponse { error: Some(err), .. }) => err.to_string(),
                _ => body,
            };
            return Err(ResolutionError::RegistryQueryFailed(
                format!("HTTP {} from RPC endpoint: {}", status, detail)
            ));
        }

        let envelope = envelope
            .map_err(|e| ResolutionError::MalformedResponse(format!("invalid JSON-RPC response: {}", e)))?;

        if let Some(err) = envelope.error {
            return Err(ResolutionError::RegistryQueryFailed(err.to_string()));
        }

        let result = envelope.result
            .ok_or_else(|| ResolutionError::MalformedResponse("JSON-RPC response has no result".to_string()))?;

        // Contract execution failures come back as a result carrying an error string
        if let Some(err) = result.get("error").and_then(Value::as_str) {
            return Err(ResolutionError::RegistryQueryFailed(err.to_string()));
        }

        Ok(result)
    }
}

impl Registry for RpcRegistry {
    async fn identity_owner(
        &self,
        contract_id: &str,
        account_id: &str,
    ) -> Result<String, ResolutionError> {
        tracing::debug!(contract_id, account_id, "querying identity owner");

        let args = serde_json::to_vec(&json!({ "identity": account_id }))?;
        let result = self.query(json!({
            "request_type": "call_function",
            "finality": "final",
            "account_id": contract_id,
            "method_name": IDENTITY_OWNER_METHOD,
            "args_base64": STANDARD.encode(args),
        })).await?;

        let call: CallFunctionResult = serde_json::from_value(result)
            .map_err(|e| ResolutionError::MalformedResponse(format!("invalid call_function result: {}", e)))?;

        let value: Value = serde_json::from_slice(&call.result)
            .map_err(|e| ResolutionError::MalformedResponse(format!("view result is not JSON: {}", e)))?;

        match value {
            Value::String(owner) => Ok(owner),
            other => Err(ResolutionError::MalformedResponse(
                format!("{} returned a non-string value: {}", IDENTITY_OWNER_METHOD, other)
            )),
        }
    }

    async fn account_public_key(&self, account_id: &str) -> Result<String, ResolutionError> {
        tracing::debug!(account_id, "querying account public key");

        let result = self.query(json!({
            "request_type": "view_account",
            "finality": "final",
            "account_id": account_id,
        })).await?;

        let account: ViewAccountResult = serde_json::from_value(result)
            .map_err(|e| ResolutionError::MalformedResponse(format!("invalid view_account result: {}", e)))?;

        match account.public_key {
            Value::String(key) => Ok(key),
            other => Err(ResolutionError::MalformedResponse(
                format!("public_key is not a string: {}", other)
            )),
        }
    }
}
