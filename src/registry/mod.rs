//! Access to the on-chain identity registry.
//!
//! The resolver only ever performs read-only view calls, so the registry is
//! reached through the narrow [`Registry`] trait. [`RpcRegistry`] implements it
//! over NEAR JSON-RPC; tests substitute an in-memory implementation.

mod rpc;
mod strategy;

pub use rpc::{RpcRegistry, MAINNET_RPC_URL, TESTNET_RPC_URL};
pub use strategy::{decode_ed25519_key, OwnerResolutionStrategy};

use std::future::Future;

use crate::error::ResolutionError;

/// Contract view method returning the current owner of an identity
pub const IDENTITY_OWNER_METHOD: &str = "identity_owner";

/// Read-only view of the chain needed to resolve a did:near identifier
pub trait Registry: Send + Sync {
    /// Calls `identity_owner({ identity: account_id })` on `contract_id` and
    /// returns the raw string result
    fn identity_owner(
        &self,
        contract_id: &str,
        account_id: &str,
    ) -> impl Future<Output = Result<String, ResolutionError>> + Send;

    /// Returns the `ed25519:`-prefixed public key recorded for `account_id`
    fn account_public_key(
        &self,
        account_id: &str,
    ) -> impl Future<Output = Result<String, ResolutionError>> + Send;
}
