//! Error types returned by the derivation pipeline.

use thiserror::Error;

/// Errors arising while deriving a DID from a certificate.
///
/// All variants are terminal for the current invocation; none are retried
/// locally.
#[derive(Debug, Error)]
pub enum Error {
    /// The input bytes do not parse as an X.509 certificate, or the embedded
    /// public key cannot be represented as a JWK.
    #[error("invalid certificate")]
    Certificate(#[source] anyhow::Error),

    /// The requested DID method is not one of the supported strategies.
    /// Detected before any registration is attempted.
    #[error("unsupported DID method: {0}")]
    UnsupportedMethod(String),

    /// The registration backend failed. The original cause is preserved
    /// unchanged.
    #[error("registration failed")]
    Registration(#[source] anyhow::Error),
}
