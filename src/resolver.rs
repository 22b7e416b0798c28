//! Core DID resolution functionality.
//!
//! This module wires the parser, the registry client and the document
//! assembler together, and exposes the result as a method-keyed resolve
//! function for generic multi-method DID resolvers.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::config::ResolverConfig;
use crate::did::{parse_account_id, METHOD};
use crate::document::assemble;
use crate::error::ResolutionError;
use crate::registry::{Registry, RpcRegistry};
use crate::types::ResolutionResult;

/// An async resolve function as registered with a multi-method dispatcher
pub type ResolveFn = Arc<
    dyn Fn(String) -> BoxFuture<'static, Result<ResolutionResult, ResolutionError>> + Send + Sync,
>;

/// Resolve functions keyed by DID method name
pub type ResolverMap = HashMap<String, ResolveFn>;

/// Resolver for did:near identifiers.
///
/// Holds only immutable configuration and a registry handle, so a single
/// instance can serve any number of concurrent resolutions.
#[derive(Debug, Clone)]
pub struct Resolver<R = RpcRegistry> {
    /// Contract, network and strategy settings
    config: ResolverConfig,
    /// Registry the owner values are read from
    registry: R,
}

impl Resolver<RpcRegistry> {
    /// Creates a resolver querying the configured RPC endpoint
    pub fn new(config: ResolverConfig) -> Result<Self, ResolutionError> {
        config.validate()?;
        let registry = RpcRegistry::from_config(&config)?;
        Ok(Self { config, registry })
    }
}

impl<R: Registry> Resolver<R> {
    /// Creates a resolver over an existing registry handle
    pub fn with_registry(config: ResolverConfig, registry: R) -> Self {
        Self { config, registry }
    }

    /// The resolver's configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves a did:near identifier
    ///
    /// # Example
    /// ```no_run
    /// use near_did_resolver::{Resolver, ResolverConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let config = ResolverConfig::new("neardti.testnet", "https://rpc.testnet.near.org")?;
    ///     let resolver = Resolver::new(config)?;
    ///     let result = resolver.resolve("did:near:alice.testnet").await?;
    ///     println!("Resolved DID Document: {:?}", result.did_document);
    ///     Ok(())
    /// }
    /// ```
    pub async fn resolve(&self, did: &str) -> Result<ResolutionResult, ResolutionError> {
        // Rejected identifiers never reach the registry
        let account_id = parse_account_id(did)?;

        let owner = self.registry.identity_owner(&self.config.contract_id, account_id).await?;
        tracing::debug!(did, owner = %owner, "registry returned owner");

        let key_material = self.config.strategy.key_material(&self.registry, owner).await?;

        Ok(ResolutionResult::new(assemble(did, &key_material)))
    }
}

impl<R: Registry + 'static> Resolver<R> {
    /// Converts the resolver into a method-keyed resolve function map
    pub fn into_resolver_map(self) -> ResolverMap {
        let resolver = Arc::new(self);
        let resolve: ResolveFn = Arc::new(move |did: String| {
            let resolver = Arc::clone(&resolver);
            async move { resolver.resolve(&did).await }.boxed()
        });

        HashMap::from([(METHOD.to_string(), resolve)])
    }
}

/// Builds the `{ "near": resolve }` map for a multi-method resolver.
///
/// The RPC client is constructed once here and shared by every call.
pub fn make_resolver(config: ResolverConfig) -> Result<ResolverMap, ResolutionError> {
    Ok(Resolver::new(config)?.into_resolver_map())
}

/// Convenience function for resolving a DID without keeping a Resolver around
pub async fn resolve_did(
    did: &str,
    config: ResolverConfig,
) -> Result<ResolutionResult, ResolutionError> {
    Resolver::new(config)?.resolve(did).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use base58::ToBase58;
    use crate::registry::OwnerResolutionStrategy;

    const DID: &str = "did:near:CF5RiJYh4EVmEt8UADTjoP3XaZo1NPWxv6w5TmkLqjpR";

    /// In-memory registry counting the calls made against it
    #[derive(Default)]
    struct MockRegistry {
        owner: Option<String>,
        public_key: Option<String>,
        owner_calls: AtomicUsize,
        key_calls: AtomicUsize,
    }

    impl MockRegistry {
        fn with_owner(owner: &str) -> Self {
            Self { owner: Some(owner.to_string()), ..Self::default() }
        }
    }

    impl Registry for Arc<MockRegistry> {
        async fn identity_owner(
            &self,
            contract_id: &str,
            _account_id: &str,
        ) -> Result<String, ResolutionError> {
            assert_eq!(contract_id, "neardti.testnet");
            self.owner_calls.fetch_add(1, Ordering::SeqCst);
            self.owner.clone().ok_or_else(|| {
                ResolutionError::RegistryQueryFailed("connection refused".to_string())
            })
        }

        async fn account_public_key(&self, account_id: &str) -> Result<String, ResolutionError> {
            assert_eq!(account_id, "owner.testnet");
            self.key_calls.fetch_add(1, Ordering::SeqCst);
            self.public_key.clone().ok_or_else(|| {
                ResolutionError::RegistryQueryFailed("unknown account".to_string())
            })
        }
    }

    fn config() -> ResolverConfig {
        ResolverConfig::new("neardti.testnet", "https://rpc.testnet.near.org").unwrap()
    }

    fn resolver(registry: &Arc<MockRegistry>) -> Resolver<Arc<MockRegistry>> {
        Resolver::with_registry(config(), Arc::clone(registry))
    }

    #[tokio::test]
    async fn test_delegated_owner_resolution() {
        let registry = Arc::new(MockRegistry::with_owner(DID));
        let result = resolver(&registry).resolve(DID).await.unwrap();

        let doc = &result.did_document;
        let key_id = format!("{}#owner", DID);
        assert_eq!(doc.id, DID);
        assert_eq!(doc.verification_method[0].controller, DID);
        assert_eq!(
            doc.verification_method[0].public_key_base58,
            "CF5RiJYh4EVmEt8UADTjoP3XaZo1NPWxv6w5TmkLqjpR"
        );
        assert_eq!(doc.authentication, vec![key_id.clone()]);
        assert_eq!(doc.assertion_method, vec![key_id]);
        assert_eq!(result.did_resolution_metadata.content_type, "application/did+json");
        assert_eq!(registry.owner_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_registry_failure() {
        let registry = Arc::new(MockRegistry::default());
        let result = resolver(&registry).resolve(DID).await;
        assert!(matches!(result, Err(ResolutionError::RegistryQueryFailed(_))));
    }

    #[tokio::test]
    async fn test_invalid_did_skips_registry() {
        let registry = Arc::new(MockRegistry::with_owner(DID));
        let result = resolver(&registry).resolve("not-a-did").await;
        assert!(matches!(result, Err(ResolutionError::InvalidDIDFormat)));
        assert_eq!(registry.owner_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent() {
        let registry = Arc::new(MockRegistry::with_owner("raw-owner-key"));
        let resolver = resolver(&registry);
        let first = serde_json::to_vec(&resolver.resolve(DID).await.unwrap().did_document).unwrap();
        let second = serde_json::to_vec(&resolver.resolve(DID).await.unwrap().did_document).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_account_key_strategy() {
        let key = [7u8; 32].to_base58();
        let registry = Arc::new(MockRegistry {
            owner: Some("did:near:owner.testnet".to_string()),
            public_key: Some(format!("ed25519:{}", key)),
            ..MockRegistry::default()
        });
        let resolver = Resolver::with_registry(
            config().with_strategy(OwnerResolutionStrategy::AccountKey),
            Arc::clone(&registry),
        );

        let result = resolver.resolve(DID).await.unwrap();
        assert_eq!(result.did_document.verification_method[0].public_key_base58, key);
        assert_eq!(registry.key_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_delegated_strategy_skips_account_lookup() {
        let registry = Arc::new(MockRegistry::with_owner("did:near:owner.testnet"));
        resolver(&registry).resolve(DID).await.unwrap();
        assert_eq!(registry.key_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolver_map() {
        let registry = Arc::new(MockRegistry::with_owner(DID));
        let map = resolver(&registry).into_resolver_map();
        assert_eq!(map.len(), 1);

        let resolve = map.get("near").unwrap();
        let results = futures::future::join_all(
            (0..4).map(|_| resolve(DID.to_string()))
        ).await;

        for result in results {
            assert_eq!(result.unwrap().did_document.id, DID);
        }
        assert_eq!(registry.owner_calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_make_resolver_keys() {
        let map = make_resolver(config()).unwrap();
        assert!(map.contains_key("near"));
        assert_eq!(map.len(), 1);
    }
}
