//! # DID Key Operations
//!
//! Implements the Create operation for DID Key.
//!
//! See <https://w3c-ccg.github.io/did-method-key>

use anyhow::ensure;

use super::{CreateOptions, DidKey};
use crate::core::Kind;
use crate::document::{Document, MethodType, PublicKeyFormat, VerificationMethod, DEFAULT_CONTEXT};
use crate::jose::KeyHandle;

impl DidKey {
    /// Create a DID Document from the supplied public key.
    ///
    /// The document id is the DID: the key's multicodec/multibase form under
    /// the `did:key` scheme.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not match the options or cannot be
    /// converted to multibase form.
    pub fn create(key: &KeyHandle, options: &CreateOptions) -> anyhow::Result<Document> {
        ensure!(
            options.key_type == key.key_type(),
            "options key type {} does not match key {}",
            options.key_type,
            key.key_type()
        );

        let multikey = key.jwk().to_multibase()?;
        let did = format!("did:key:{multikey}");
        let kid = format!("{did}#{multikey}");

        let (verification_method, authentication, assertion_method) =
            if options.include_verification_method {
                let vm = VerificationMethod {
                    id: kid.clone(),
                    type_: MethodType::Multikey,
                    controller: did.clone(),
                    key: PublicKeyFormat::PublicKeyMultibase {
                        public_key_multibase: multikey,
                    },
                };
                (
                    Some(vec![vm]),
                    Some(vec![Kind::String(kid.clone())]),
                    Some(vec![Kind::String(kid)]),
                )
            } else {
                (None, None, None)
            };

        Ok(Document {
            context: vec![
                Kind::String(DEFAULT_CONTEXT.into()),
                Kind::String("https://w3id.org/security/data-integrity/v1".into()),
            ],
            id: did,
            verification_method,
            authentication,
            assertion_method,
        })
    }
}
