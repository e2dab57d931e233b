//! # JSON Web Key
//!
//! A JWK ([RFC 7517]) describes a cryptographic key's type and parameters.
//! This module carries the public-key subset used by the derivation pipeline
//! together with the multibase conversion required by the `did:key` method.
//!
//! [RFC 7517]: https://www.rfc-editor.org/rfc/rfc7517

use std::fmt::{self, Display, Formatter};

use anyhow::{anyhow, bail, Context};
use asn1_rs::{Integer, SequenceOf, ToDer};
use base64ct::{Base64UrlUnpadded, Encoding};
use multibase::Base;
use serde::{Deserialize, Serialize};

/// Multicodec code for an Ed25519 public key.
pub const ED25519_CODEC: [u8; 2] = [0xed, 0x01];
/// Multicodec code for a P-256 public key (compressed point).
pub const P256_CODEC: [u8; 2] = [0x80, 0x24];
/// Multicodec code for a P-384 public key (compressed point).
pub const P384_CODEC: [u8; 2] = [0x81, 0x24];
/// Multicodec code for a P-521 public key (compressed point).
pub const P521_CODEC: [u8; 2] = [0x82, 0x24];
/// Multicodec code for an RSA public key (PKCS#1 DER).
pub const RSA_CODEC: [u8; 2] = [0x85, 0x24];

/// Simplified JWK for a public key. No private key material is ever present.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PublicKeyJwk {
    /// Key type.
    pub kty: KeyType,

    /// Cryptographic curve type, for `EC` and `OKP` keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<Curve>,

    /// X coordinate (or raw key bytes for `OKP`), base64url-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,

    /// Y coordinate, base64url-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,

    /// RSA modulus, base64url-encoded without leading zero octets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,

    /// RSA public exponent, base64url-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,

    /// Intended use of the key, e.g. `sig`.
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,
}

impl PublicKeyJwk {
    /// Convert the key to multibase form: the multicodec code for the key
    /// type followed by the key bytes, base58btc-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if required key parameters are missing or cannot be
    /// decoded, or if the key type has no multicodec registration.
    pub fn to_multibase(&self) -> anyhow::Result<String> {
        let (codec, key_bytes) = match self.kty {
            KeyType::Okp => {
                if self.crv != Some(Curve::Ed25519) {
                    bail!("OKP key is not an Ed25519 key");
                }
                (ED25519_CODEC, self.decoded_x()?)
            }
            KeyType::Ec => {
                let codec = match self.crv {
                    Some(Curve::P256) => P256_CODEC,
                    Some(Curve::P384) => P384_CODEC,
                    Some(Curve::P521) => P521_CODEC,
                    _ => bail!("EC key has no usable curve"),
                };
                (codec, self.compressed_point()?)
            }
            KeyType::Rsa => (RSA_CODEC, self.pkcs1_der()?),
        };

        let mut multi_bytes = codec.to_vec();
        multi_bytes.extend_from_slice(&key_bytes);
        Ok(multibase::encode(Base::Base58Btc, multi_bytes))
    }

    fn decoded_x(&self) -> anyhow::Result<Vec<u8>> {
        let x = self.x.as_ref().ok_or_else(|| anyhow!("key has no x parameter"))?;
        Base64UrlUnpadded::decode_vec(x).map_err(|e| anyhow!("issue decoding x: {e}"))
    }

    // SEC1 compressed form: a parity prefix followed by the x coordinate.
    fn compressed_point(&self) -> anyhow::Result<Vec<u8>> {
        let x = self.decoded_x()?;
        let y = self.y.as_ref().ok_or_else(|| anyhow!("key has no y parameter"))?;
        let y = Base64UrlUnpadded::decode_vec(y).map_err(|e| anyhow!("issue decoding y: {e}"))?;

        let parity = y.last().ok_or_else(|| anyhow!("y parameter is empty"))?;
        let mut point = Vec::with_capacity(x.len() + 1);
        point.push(if parity & 1 == 1 { 0x03 } else { 0x02 });
        point.extend_from_slice(&x);
        Ok(point)
    }

    // PKCS#1 `RSAPublicKey`: SEQUENCE of the modulus and exponent INTEGERs.
    fn pkcs1_der(&self) -> anyhow::Result<Vec<u8>> {
        let n = self.n.as_ref().ok_or_else(|| anyhow!("key has no modulus"))?;
        let n = Base64UrlUnpadded::decode_vec(n).map_err(|e| anyhow!("issue decoding n: {e}"))?;
        let e = self.e.as_ref().ok_or_else(|| anyhow!("key has no exponent"))?;
        let e = Base64UrlUnpadded::decode_vec(e).map_err(|e| anyhow!("issue decoding e: {e}"))?;
        if n.is_empty() || e.is_empty() {
            bail!("modulus or exponent is empty");
        }

        let n = to_der_unsigned(&n);
        let e = to_der_unsigned(&e);
        let seq = SequenceOf::from_iter([Integer::new(&n), Integer::new(&e)]);
        seq.to_der_vec().context("issue encoding RSA key")
    }
}

// DER INTEGER content bytes for an unsigned big-endian value.
fn to_der_unsigned(bytes: &[u8]) -> Vec<u8> {
    let mut trimmed = bytes;
    while trimmed.len() > 1 && trimmed[0] == 0 {
        trimmed = &trimmed[1..];
    }
    let mut out = Vec::with_capacity(trimmed.len() + 1);
    if trimmed.first().is_some_and(|b| b & 0x80 != 0) {
        out.push(0x00);
    }
    out.extend_from_slice(trimmed);
    out
}

/// Cryptographic key type.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub enum KeyType {
    /// Octet key pair (Edwards curve).
    #[default]
    #[serde(rename = "OKP")]
    Okp,

    /// Elliptic curve key pair.
    #[serde(rename = "EC")]
    Ec,

    /// RSA key pair.
    #[serde(rename = "RSA")]
    Rsa,
}

impl Display for KeyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Okp => write!(f, "OKP"),
            Self::Ec => write!(f, "EC"),
            Self::Rsa => write!(f, "RSA"),
        }
    }
}

/// Cryptographic curve type.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub enum Curve {
    /// Ed25519 signature curve.
    #[default]
    Ed25519,

    /// NIST P-256.
    #[serde(rename = "P-256")]
    P256,

    /// NIST P-384.
    #[serde(rename = "P-384")]
    P384,

    /// NIST P-521.
    #[serde(rename = "P-521")]
    P521,
}

impl Display for Curve {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519 => write!(f, "Ed25519"),
            Self::P256 => write!(f, "P-256"),
            Self::P384 => write!(f, "P-384"),
            Self::P521 => write!(f, "P-521"),
        }
    }
}

/// A key handle wraps a JWK with the normalized key-type tag used when
/// constructing method-specific creation options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyHandle {
    jwk: PublicKeyJwk,
}

impl KeyHandle {
    /// Wrap a public key JWK.
    #[must_use]
    pub const fn new(jwk: PublicKeyJwk) -> Self {
        Self { jwk }
    }

    /// The normalized key type of the wrapped key.
    #[must_use]
    pub const fn key_type(&self) -> KeyType {
        self.jwk.kty
    }

    /// The wrapped key.
    #[must_use]
    pub const fn jwk(&self) -> &PublicKeyJwk {
        &self.jwk
    }
}
