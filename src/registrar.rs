//! # DID Registration
//!
//! The registration backend turns a public key and method-specific options
//! into a DID. The [`Registrar`] trait is the backend seam; [`DidService`]
//! is the built-in implementation constructing `did:key` and `did:jwk`
//! identifiers locally.

use std::sync::{Arc, OnceLock};

use anyhow::ensure;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::bridge;
use crate::did::CreateOptions;
use crate::document::Document;
use crate::jose::KeyHandle;
use crate::jwk::DidJwk;
use crate::key::DidKey;

/// The key-backend discriminator the registration entry point expects.
pub const BACKEND_KEY_TYPE: &str = "key";

/// The outcome of a successful registration.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DidResult {
    /// The registered DID.
    pub did: String,

    /// The DID document constructed for the key.
    pub did_document: Document,
}

/// A registrar accepts a key and method-specific options and produces a DID,
/// or fails. Registration is a single-shot suspending operation; implementers
/// may legitimately complete without a result.
#[async_trait]
pub trait Registrar: Send + Sync {
    /// Register a DID for the supplied key.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure internal to the backend. The cause is
    /// propagated to the caller unchanged.
    async fn register_by_key(
        &self, key_type: &str, key: &KeyHandle, options: &CreateOptions,
    ) -> anyhow::Result<Option<DidResult>>;
}

static SERVICE: OnceLock<Arc<DidService>> = OnceLock::new();

/// The built-in registration backend. Constructs DIDs locally; no ledger or
/// registry is contacted.
pub struct DidService {
    _private: (),
}

impl DidService {
    /// One-time startup for the registration backend.
    ///
    /// Builds the shared service and the runtime registrations are driven on.
    /// Guarded: concurrent first calls initialize exactly once, and every
    /// call returns the same instance.
    pub fn minimal_init() -> Arc<Self> {
        Arc::clone(SERVICE.get_or_init(|| {
            tracing::debug!("initializing registration backend");
            bridge::runtime();
            Arc::new(Self { _private: () })
        }))
    }
}

#[async_trait]
impl Registrar for DidService {
    async fn register_by_key(
        &self, key_type: &str, key: &KeyHandle, options: &CreateOptions,
    ) -> anyhow::Result<Option<DidResult>> {
        ensure!(key_type == BACKEND_KEY_TYPE, "unknown key backend: {key_type}");

        let document = match options {
            CreateOptions::Key(options) => DidKey::create(key, options)?,
            CreateOptions::Jwk(options) => DidJwk::create(key, options)?,
        };
        tracing::debug!("registered {}", document.id);

        Ok(Some(DidResult {
            did: document.id.clone(),
            did_document: document,
        }))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jose::{Curve, KeyType, PublicKeyJwk};
    use crate::key;

    fn ed25519_key() -> KeyHandle {
        KeyHandle::new(PublicKeyJwk {
            kty: KeyType::Okp,
            crv: Some(Curve::Ed25519),
            x: Some("g4JYX-1IIlJcVc2ApDjfXlxfUhJJNUozZmG7a7W32F0".into()),
            ..PublicKeyJwk::default()
        })
    }

    #[tokio::test]
    async fn register_did_key() {
        let service = DidService::minimal_init();
        let key = ed25519_key();
        let options = CreateOptions::Key(key::CreateOptions {
            key_type: KeyType::Okp,
            include_verification_method: true,
        });

        let result = service
            .register_by_key(BACKEND_KEY_TYPE, &key, &options)
            .await
            .expect("should register")
            .expect("should produce a result");
        assert_eq!(result.did, "did:key:z6MkoJcjQD9szdhQSJAnK4R2dbbFzEQHokSEBPxrnPHnJSwe");
        assert_eq!(result.did_document.id, result.did);
    }

    #[tokio::test]
    async fn unknown_key_backend() {
        let service = DidService::minimal_init();
        let key = ed25519_key();
        let options = CreateOptions::Jwk(crate::jwk::CreateOptions { key_type: KeyType::Okp });

        let err = service
            .register_by_key("ledger", &key, &options)
            .await
            .expect_err("should fail");
        assert!(err.to_string().contains("ledger"));
    }

    #[test]
    fn init_returns_same_instance() {
        let a = DidService::minimal_init();
        let b = DidService::minimal_init();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
