//! Error types for did:near resolution operations.
//!
//! Every failure aborts the resolution it occurred in; nothing is retried or
//! recovered locally. It uses the `thiserror` crate for error handling.

use thiserror::Error;
use url::ParseError;

/// Errors that can occur during did:near resolution operations
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The DID does not start with the `did:near:` prefix or has no account id
    #[error("Invalid DID format")]
    InvalidDIDFormat,

    /// The registry could not be queried (transport, RPC or contract failure)
    #[error("Registry query failed: {0}")]
    RegistryQueryFailed(String),

    /// The registry answered with a value of unexpected shape or type
    #[error("Malformed registry response: {0}")]
    MalformedResponse(String),

    /// The resolver configuration is unusable
    #[error("Invalid resolver configuration: {0}")]
    InvalidConfig(String),

    /// URL parse error
    #[error("URL parse error: {0}")]
    UrlError(#[from] ParseError),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ResolutionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::RegistryQueryFailed(err.to_string())
        }
    }
}
