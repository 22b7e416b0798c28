//! DID parsing for did:near identifiers.
//!
//! A did:near identifier has the shape `did:near:<account-id>`. The account id
//! is opaque here: anything after the prefix is kept exactly as given.

use std::fmt;
use std::str::FromStr;

use crate::error::ResolutionError;

/// The method token registered for this resolver
pub const METHOD: &str = "near";

/// The full prefix every did:near identifier starts with
pub const METHOD_PREFIX: &str = "did:near:";

/// Represents a parsed did:near identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NearDid {
    /// The method-specific account identifier
    pub account_id: String,
}

impl NearDid {
    /// Creates a NearDid for the given account identifier
    pub fn from_account_id(account_id: impl Into<String>) -> Self {
        Self { account_id: account_id.into() }
    }

    /// Parses and validates a did:near string
    pub fn parse(did: &str) -> Result<Self, ResolutionError> {
        parse_account_id(did).map(Self::from_account_id)
    }
}

impl fmt::Display for NearDid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", METHOD_PREFIX, self.account_id)
    }
}

impl FromStr for NearDid {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Returns the account identifier of a did:near string, unmodified
pub fn parse_account_id(did: &str) -> Result<&str, ResolutionError> {
    tracing::debug!(did, "parsing DID");
    match strip_method_prefix(did) {
        Some(account_id) if !account_id.is_empty() => Ok(account_id),
        _ => Err(ResolutionError::InvalidDIDFormat),
    }
}

/// Strips a single leading `did:near:` from `value`, if present
pub(crate) fn strip_method_prefix(value: &str) -> Option<&str> {
    value.strip_prefix(METHOD_PREFIX)
}
