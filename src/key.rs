//! # DID Key
//!
//! The `did:key` method is a DID method for static cryptographic keys. At its
//! core, it is based on expanding a cryptographic public key into a DID
//! Document.
//!
//! See:
//!
//! - <https://w3c-ccg.github.io/did-method-key>

pub mod operator;

use serde::{Deserialize, Serialize};

use crate::jose::KeyType;

/// `DidKey` provides a type for implementing the `did:key` create operation.
pub struct DidKey;

/// Options for creating a `did:key` DID.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOptions {
    /// The type of the key the DID is derived from.
    pub key_type: KeyType,

    /// Embed a verification method for the key in the resulting document.
    pub include_verification_method: bool,
}
