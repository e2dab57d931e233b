//! # DID JWK Operations
//!
//! Implements the Create operation for DID JWK.
//!
//! See <https://github.com/quartzjer/did-jwk/blob/main/spec.md>

use anyhow::{anyhow, ensure};
use base64ct::{Base64UrlUnpadded, Encoding};

use super::{CreateOptions, DidJwk};
use crate::core::Kind;
use crate::document::{Document, MethodType, PublicKeyFormat, VerificationMethod, DEFAULT_CONTEXT};
use crate::jose::KeyHandle;

impl DidJwk {
    /// Create a DID Document from the supplied public key.
    ///
    /// The method-specific identifier is the base64url-encoded JWK; the
    /// document's single verification method is `{did}#0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not match the options or cannot be
    /// serialized.
    pub fn create(key: &KeyHandle, options: &CreateOptions) -> anyhow::Result<Document> {
        ensure!(
            options.key_type == key.key_type(),
            "options key type {} does not match key {}",
            options.key_type,
            key.key_type()
        );

        let serialized = serde_json::to_vec(key.jwk())
            .map_err(|e| anyhow!("issue serializing key: {e}"))?;
        let encoded = Base64UrlUnpadded::encode_string(&serialized);
        let did = format!("did:jwk:{encoded}");
        let kid = format!("{did}#0");

        Ok(Document {
            context: vec![
                Kind::String(DEFAULT_CONTEXT.into()),
                Kind::String("https://w3id.org/security/suites/jws-2020/v1".into()),
            ],
            id: did.clone(),
            verification_method: Some(vec![VerificationMethod {
                id: kid.clone(),
                type_: MethodType::JsonWebKey2020,
                controller: did,
                key: PublicKeyFormat::PublicKeyJwk {
                    public_key_jwk: key.jwk().clone(),
                },
            }]),
            authentication: Some(vec![Kind::String(kid.clone())]),
            assertion_method: Some(vec![Kind::String(kid)]),
        })
    }
}
