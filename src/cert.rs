//! # Certificate Key Extraction
//!
//! Parses a DER- or PEM-encoded X.509 certificate and converts its subject
//! public key into a [`PublicKeyJwk`]. Only structural parsing is performed;
//! signatures, trust chains and validity periods are never checked.

use anyhow::anyhow;
use asn1_rs::{oid, Oid};
use base64ct::{Base64UrlUnpadded, Encoding};
use x509_parser::certificate::X509Certificate;
use x509_parser::parse_x509_certificate;
use x509_parser::pem::Pem;
use x509_parser::public_key::PublicKey;

use crate::error::Error;
use crate::jose::{Curve, KeyType, PublicKeyJwk};

const ED25519_OID: Oid<'static> = oid!(1.3.101.112);
const P256_OID: Oid<'static> = oid!(1.2.840.10045.3.1.7);
const P384_OID: Oid<'static> = oid!(1.3.132.0.34);
const P521_OID: Oid<'static> = oid!(1.3.132.0.35);

const PEM_DELIMITER: &[u8] = b"-----BEGIN";

/// Extract the subject public key of an X.509 certificate as a JWK.
///
/// The input may be raw DER or PEM (base64-wrapped DER with textual
/// delimiters); the encoding is detected from the bytes. For a PEM bundle,
/// the first certificate block is used.
///
/// # Errors
///
/// Returns [`Error::Certificate`] if the bytes do not parse as a certificate
/// or the public key algorithm is not supported.
pub fn jwk_from_bytes(input: &[u8]) -> crate::Result<PublicKeyJwk> {
    if input.windows(PEM_DELIMITER.len()).any(|w| w == PEM_DELIMITER) {
        tracing::debug!("extracting public key from PEM certificate");
        let pem = Pem::iter_from_buffer(input)
            .next()
            .ok_or_else(|| Error::Certificate(anyhow!("no PEM block in input")))?
            .map_err(|e| Error::Certificate(anyhow!(e)))?;
        let certificate = pem.parse_x509().map_err(|e| Error::Certificate(anyhow!(e)))?;
        jwk_from_certificate(&certificate)
    } else {
        tracing::debug!("extracting public key from DER certificate");
        let (_, certificate) =
            parse_x509_certificate(input).map_err(|e| Error::Certificate(anyhow!(e)))?;
        jwk_from_certificate(&certificate)
    }
}

/// Extract the subject public key of an already-parsed certificate as a JWK.
///
/// # Errors
///
/// Returns [`Error::Certificate`] if the public key algorithm is not
/// supported or the key material is malformed.
pub fn jwk_from_certificate(certificate: &X509Certificate<'_>) -> crate::Result<PublicKeyJwk> {
    let spki = certificate.public_key();
    let alg_oid = &spki.algorithm.algorithm;

    // Ed25519 has no parsed representation; the bit string is the raw key.
    if *alg_oid == ED25519_OID {
        let key: &[u8] = spki.subject_public_key.data.as_ref();
        if key.len() != 32 {
            return Err(Error::Certificate(anyhow!("Ed25519 public key is not 32 bytes")));
        }
        return Ok(PublicKeyJwk {
            kty: KeyType::Okp,
            crv: Some(Curve::Ed25519),
            x: Some(Base64UrlUnpadded::encode_string(key)),
            ..PublicKeyJwk::default()
        });
    }

    match spki.parsed() {
        Ok(PublicKey::RSA(rsa)) => Ok(PublicKeyJwk {
            kty: KeyType::Rsa,
            n: Some(Base64UrlUnpadded::encode_string(trim_leading_zeroes(rsa.modulus))),
            e: Some(Base64UrlUnpadded::encode_string(trim_leading_zeroes(rsa.exponent))),
            ..PublicKeyJwk::default()
        }),
        Ok(PublicKey::EC(point)) => {
            let params = spki.algorithm.parameters.as_ref();
            let curve = match params.and_then(|p| p.as_oid().ok()) {
                Some(oid) if oid == P256_OID => Curve::P256,
                Some(oid) if oid == P384_OID => Curve::P384,
                Some(oid) if oid == P521_OID => Curve::P521,
                _ => {
                    return Err(Error::Certificate(anyhow!("unsupported or missing EC named curve")));
                }
            };
            ec_jwk(curve, point.data())
        }
        Ok(_) => Err(Error::Certificate(anyhow!(
            "unsupported public key algorithm: {alg_oid}"
        ))),
        Err(e) => Err(Error::Certificate(anyhow!(e))),
    }
}

// Split an uncompressed SEC1 point into JWK coordinates.
fn ec_jwk(curve: Curve, point: &[u8]) -> crate::Result<PublicKeyJwk> {
    let size = match curve {
        Curve::P256 => 32,
        Curve::P384 => 48,
        Curve::P521 => 66,
        Curve::Ed25519 => {
            return Err(Error::Certificate(anyhow!("Ed25519 is not an EC named curve")));
        }
    };
    if point.first() != Some(&0x04) || point.len() != 1 + 2 * size {
        return Err(Error::Certificate(anyhow!(
            "EC public key is not an uncompressed {curve} point"
        )));
    }

    let (x, y) = point[1..].split_at(size);
    Ok(PublicKeyJwk {
        kty: KeyType::Ec,
        crv: Some(curve),
        x: Some(Base64UrlUnpadded::encode_string(x)),
        y: Some(Base64UrlUnpadded::encode_string(y)),
        ..PublicKeyJwk::default()
    })
}

fn trim_leading_zeroes(bytes: &[u8]) -> &[u8] {
    let mut trimmed = bytes;
    while trimmed.len() > 1 && trimmed[0] == 0 {
        trimmed = &trimmed[1..];
    }
    trimmed
}
