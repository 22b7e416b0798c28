//! DID Document assembly.
//!
//! Turns a DID and the owner value read from the registry into the fixed-shape
//! document: one Ed25519 verification method named `#owner`, referenced from
//! both `authentication` and `assertionMethod`.

use crate::did::strip_method_prefix;
use crate::types::{
    DIDDocument, VerificationMethod, DID_CONTEXT, ED25519_VERIFICATION_KEY_2018,
};

/// Fragment naming the single verification method
pub(crate) const OWNER_FRAGMENT: &str = "#owner";

/// Builds the DID Document for `did` from the registry's owner value
pub fn assemble(did: &str, owner_value: &str) -> DIDDocument {
    let key_id = format!("{}{}", did, OWNER_FRAGMENT);

    DIDDocument {
        context: DID_CONTEXT.to_string(),
        id: did.to_string(),
        verification_method: vec![VerificationMethod {
            id: key_id.clone(),
            method_type: ED25519_VERIFICATION_KEY_2018.to_string(),
            controller: did.to_string(),
            public_key_base58: public_key_base58(owner_value).to_string(),
        }],
        authentication: vec![key_id.clone()],
        assertion_method: vec![key_id],
    }
}

/// Key material for an owner value.
///
/// A delegated owner (`did:near:<x>`) yields `<x>`. Only one level is
/// dereferenced; the delegate is not resolved further.
pub fn public_key_base58(owner_value: &str) -> &str {
    strip_method_prefix(owner_value).unwrap_or(owner_value)
}
