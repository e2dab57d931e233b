//! # DID JWK
//!
//! The `did:jwk` method deterministically transforms a JWK into a DID
//! Document.
//!
//! See <https://github.com/quartzjer/did-jwk/blob/main/spec.md>

pub mod operator;

use serde::{Deserialize, Serialize};

use crate::jose::KeyType;

/// `DidJwk` provides a type for implementing the `did:jwk` create operation.
pub struct DidJwk;

/// Options for creating a `did:jwk` DID.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOptions {
    /// The type of the key the DID is derived from.
    pub key_type: KeyType,
}
