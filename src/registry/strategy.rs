//! Owner resolution strategies.
//!
//! The registry's `identity_owner` answer is either a raw key or a delegated
//! did:near identifier. The strategy decides how that answer becomes the key
//! material placed in the document.

use base58::{FromBase58, ToBase58};
use serde::{Deserialize, Serialize};

use super::Registry;
use crate::did::strip_method_prefix;
use crate::error::ResolutionError;

/// Prefix NEAR puts in front of Ed25519 public keys
const ED25519_KEY_PREFIX: &str = "ed25519:";

/// Length of a raw Ed25519 public key
const ED25519_KEY_LENGTH: usize = 32;

/// How the owner value returned by the registry is turned into key material
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OwnerResolutionStrategy {
    /// Use the owner value as returned; a `did:near:` prefix is stripped when
    /// the document is assembled
    #[default]
    DelegatedOwner,

    /// Treat the owner value as an account and look up that account's
    /// Ed25519 public key with an account-view query
    AccountKey,
}

impl OwnerResolutionStrategy {
    /// Produces the value handed to the document assembler
    pub async fn key_material<R: Registry>(
        &self,
        registry: &R,
        owner_value: String,
    ) -> Result<String, ResolutionError> {
        match self {
            Self::DelegatedOwner => Ok(owner_value),
            Self::AccountKey => {
                let account_id = strip_method_prefix(&owner_value).unwrap_or(&owner_value);
                if account_id.is_empty() {
                    return Err(ResolutionError::MalformedResponse(
                        "owner value names no account".to_string()
                    ));
                }
                let raw_key = registry.account_public_key(account_id).await?;
                decode_ed25519_key(&raw_key)
            }
        }
    }
}

/// Decodes an `ed25519:<base58>` key and re-encodes the raw bytes as base58
pub fn decode_ed25519_key(raw_key: &str) -> Result<String, ResolutionError> {
    let encoded = raw_key.strip_prefix(ED25519_KEY_PREFIX).ok_or_else(|| {
        ResolutionError::MalformedResponse(format!("unsupported key type: {}", raw_key))
    })?;

    let bytes = encoded.from_base58().map_err(|e| {
        ResolutionError::MalformedResponse(format!("invalid base58 key: {:?}", e))
    })?;

    if bytes.len() != ED25519_KEY_LENGTH {
        return Err(ResolutionError::MalformedResponse(format!(
            "expected {} key bytes, got {}",
            ED25519_KEY_LENGTH,
            bytes.len()
        )));
    }

    Ok(bytes.to_base58())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ed25519_key() {
        let key = [1u8; 32].to_base58();
        let decoded = decode_ed25519_key(&format!("ed25519:{}", key)).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn test_decode_rejects_bad_keys() {
        let key = [1u8; 32].to_base58();
        let short = [1u8; 16].to_base58();
        let bad_keys = vec![
            key.clone(),
            format!("secp256k1:{}", key),
            "ed25519:0OIl".to_string(),
            format!("ed25519:{}", short),
        ];

        for raw in bad_keys {
            assert!(matches!(
                decode_ed25519_key(&raw),
                Err(ResolutionError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_strategy_serde_names() {
        assert_eq!(
            serde_json::to_value(OwnerResolutionStrategy::DelegatedOwner).unwrap(),
            "delegatedOwner"
        );
        assert_eq!(
            serde_json::from_value::<OwnerResolutionStrategy>("accountKey".into()).unwrap(),
            OwnerResolutionStrategy::AccountKey
        );
    }
}
