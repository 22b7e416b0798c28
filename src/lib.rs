//! A resolver implementation for the did:near method.
//!
//! A did:near identifier names a NEAR account. Resolution asks an on-chain
//! identity registry contract who currently owns that identity and builds a
//! DID Document around the answer. The library is read-only: it does not
//! create, update or sign anything, and it keeps no state between calls.

mod config;
mod did;
mod document;
mod error;
mod registry;
mod resolver;
mod types;

pub use config::{ResolverConfig, DEFAULT_NETWORK_ID};
pub use did::{parse_account_id, NearDid, METHOD, METHOD_PREFIX};
pub use document::{assemble, public_key_base58};
pub use error::ResolutionError;
pub use registry::{
    decode_ed25519_key, OwnerResolutionStrategy, Registry, RpcRegistry, IDENTITY_OWNER_METHOD,
    MAINNET_RPC_URL, TESTNET_RPC_URL,
};
pub use resolver::{make_resolver, resolve_did, ResolveFn, Resolver, ResolverMap};
pub use types::{
    DIDDocument,
    DocumentMetadata,
    ResolutionMetadata,
    ResolutionResult,
    VerificationMethod,
    DID_CONTEXT,
};

/// Resolves a did:near identifier against the configured registry
///
/// # Example
/// ```no_run
/// use near_did_resolver::{resolve, ResolverConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ResolverConfig::new("neardti.testnet", "https://rpc.testnet.near.org")?;
///     let result = resolve("did:near:alice.testnet", config).await?;
///
///     println!("Resolved DID Document: {:?}", result.did_document);
///     Ok(())
/// }
/// ```
pub async fn resolve(
    did: &str,
    config: ResolverConfig,
) -> Result<ResolutionResult, ResolutionError> {
    resolve_did(did, config).await
}
