//! # DID Gen
//!
//! Derives a Decentralized Identifier (DID) from the public key of an X.509
//! certificate: the certificate's subject public key is extracted into a
//! JSON Web Key, then registered under one of the supported DID methods
//! (`did:key`, `did:jwk`).
//!
//! The pipeline is synchronous from the caller's point of view. The
//! registration backend's suspending call is driven to completion on a
//! process-wide runtime and the calling thread blocks for its single result.

pub mod cert;
pub mod core;
pub mod did;
pub mod document;
pub mod jose;
pub mod jwk;
pub mod key;
pub mod registrar;

mod bridge;
mod error;

use std::sync::Arc;

pub use self::cert::{jwk_from_bytes, jwk_from_certificate};
pub use self::did::{CreateOptions, Method};
pub use self::error::Error;
pub use self::jose::{Curve, KeyHandle, KeyType, PublicKeyJwk};
pub use self::registrar::{DidResult, DidService, Registrar};

use self::registrar::BACKEND_KEY_TYPE;

/// Result type for this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Derive a DID from a public key using the named method.
///
/// Returns the registered DID, or `None` when registration completes without
/// producing a result, a degenerate but valid outcome callers must handle
/// explicitly.
///
/// # Errors
///
/// Returns [`Error::UnsupportedMethod`] for an unknown method tag, before
/// any registration is attempted, or [`Error::Registration`] if the backend
/// fails.
pub fn did_from_jwk(jwk: &PublicKeyJwk, method: &str) -> Result<Option<String>> {
    // Reject unknown methods before touching the backend.
    let method: Method = method.parse()?;
    let service = DidService::minimal_init();
    register(jwk, method, service)
}

/// Derive a DID from a public key using the named method and the supplied
/// registration backend.
///
/// # Errors
///
/// As [`did_from_jwk`].
pub fn did_from_jwk_with(
    jwk: &PublicKeyJwk, method: &str, registrar: Arc<dyn Registrar>,
) -> Result<Option<String>> {
    let method: Method = method.parse()?;
    register(jwk, method, registrar)
}

/// Derive a DID directly from certificate bytes, composing key extraction
/// and registration. Extraction failures short-circuit before any
/// registration is attempted.
///
/// # Errors
///
/// As [`jwk_from_bytes`] and [`did_from_jwk`].
pub fn did_from_bytes(input: &[u8], method: &str) -> Result<Option<String>> {
    let jwk = jwk_from_bytes(input)?;
    did_from_jwk(&jwk, method)
}

fn register(
    jwk: &PublicKeyJwk, method: Method, registrar: Arc<dyn Registrar>,
) -> Result<Option<String>> {
    let key = KeyHandle::new(jwk.clone());
    let options = method.create_options(&key);
    tracing::debug!("registering did:{method} for {} key", key.key_type());

    let result = bridge::wait(async move {
        registrar.register_by_key(BACKEND_KEY_TYPE, &key, &options).await
    })?;
    Ok(result.map(|r| r.did))
}
