//! Core types for did:near resolution.
//!
//! This module provides the DID Document produced for a did:near identifier and
//! the resolution result envelope it is returned in.

use serde::{Serialize, Deserialize};

/// JSON-LD context every resolved document carries
pub const DID_CONTEXT: &str = "https://w3id.org/did/v1";

/// Content type reported in the resolution metadata
pub const DID_JSON_CONTENT_TYPE: &str = "application/did+json";

/// Verification method type for the owner key
pub const ED25519_VERIFICATION_KEY_2018: &str = "Ed25519VerificationKey2018";

/// A DID Document for a did:near identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DIDDocument {
    /// The context of the DID Document
    #[serde(rename = "@context")]
    pub context: String,

    /// The DID itself
    pub id: String,

    /// Verification methods associated with this DID
    #[serde(rename = "verificationMethod")]
    pub verification_method: Vec<VerificationMethod>,

    /// Authentication verification method references
    pub authentication: Vec<String>,

    /// Assertion verification method references
    #[serde(rename = "assertionMethod")]
    pub assertion_method: Vec<String>,
}

/// A verification method in a DID Document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationMethod {
    /// The unique identifier for this verification method
    pub id: String,

    /// The type of the verification method
    #[serde(rename = "type")]
    pub method_type: String,

    /// The controller of this verification method
    pub controller: String,

    /// The public key, base58 encoded
    #[serde(rename = "publicKeyBase58")]
    pub public_key_base58: String,
}

/// Resolution result containing the DID Document and metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    /// The resolved DID Document
    pub did_document: DIDDocument,

    /// Metadata about the resolution process
    pub did_resolution_metadata: ResolutionMetadata,

    /// Metadata about the document; always empty for did:near
    pub did_document_metadata: DocumentMetadata,
}

impl ResolutionResult {
    /// Wraps a freshly assembled document in the resolution envelope
    pub fn new(did_document: DIDDocument) -> Self {
        Self {
            did_document,
            did_resolution_metadata: ResolutionMetadata::default(),
            did_document_metadata: DocumentMetadata::default(),
        }
    }
}

/// Metadata about the resolution process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionMetadata {
    /// Content type of the resolved document
    pub content_type: String,
}

impl Default for ResolutionMetadata {
    fn default() -> Self {
        Self { content_type: DID_JSON_CONTENT_TYPE.to_string() }
    }
}

/// Document metadata. The registry exposes no versioning, so this is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {}
