//! End-to-end derivation tests: certificate bytes in, DID out.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use didgen::registrar::BACKEND_KEY_TYPE;
use didgen::{
    did_from_bytes, did_from_jwk, did_from_jwk_with, jwk_from_bytes, CreateOptions, Curve,
    DidResult, Error, KeyHandle, KeyType, Registrar,
};

const RSA_PEM: &str = "-----BEGIN CERTIFICATE-----
MIIDFTCCAf2gAwIBAgIUFXjHNwDU7B7MeHTLrjIhsY5ZcVMwDQYJKoZIhvcNAQEL
BQAwGjEYMBYGA1UEAwwPZGlkZ2VuIHRlc3QgUlNBMB4XDTI2MDgwNTAyMDYzM1oX
DTM2MDgwMjAyMDYzM1owGjEYMBYGA1UEAwwPZGlkZ2VuIHRlc3QgUlNBMIIBIjAN
BgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAzFi/XcENIF+/FmX7YNogkp2Lf+Sg
bv1gltYR+fv9Qocplwqv4FJ7al8vj/pd4SzoSzlnwCyI9fWg5N207RUTfNxI7vxM
ryQvnQXy3MP+85ErcDUxAggNILzAgi/jDDggIdVDqiZuLtRlmi/yy6WRXc43fMPS
JmrLkBKvRIATUW77EuNhAeZejuO02X9zLE3sR+0bRGO+53FDSgNIhJZCRFx1TUR2
BmUnMW4ZHrL09wtmHClArsQd6DweCJKSNRcsyPwV9uARnXnD4/tQvm+jJ8kLYVSn
ZQNYHmOlsU9M+vicRzgYzfiuPy/C5kFNmyvVd0NUP6xp6qhJdVsNbXszeQIDAQAB
o1MwUTAdBgNVHQ4EFgQUfhb8OPXDrmj6ezasAxX4NdeEAV4wHwYDVR0jBBgwFoAU
fhb8OPXDrmj6ezasAxX4NdeEAV4wDwYDVR0TAQH/BAUwAwEB/zANBgkqhkiG9w0B
AQsFAAOCAQEAsii25iCwnobG+oiM6Tq8FM/0Nk7ADRiuLZkxndFljCBD+GOazzbF
FE1E5nvQegphhe9k5G5Dy4SzJxHPcjkgHfRJeA3x202wJ3sERn9kyjJNg38SSHHz
vV/c7d1amjIJuInVUvai0+aTxbNilC6yMHJK4OXyOXbYX29k+Mt06b+xFVDtGsgn
TeJ9ld4lOeiNir+U2V8a+sbcbVJ1T94Cg8bLcJPII9xR9tNvG8TzXW9QOitxhwXr
geySBiGbAgkZcehYpRqqtbcBZbK43oXl3ddV3JiLHjSL65OQ3f0s3CXt5Mx2s7WR
Cdc/9iq0/3cD3UDADnok0PF5eCSy0W9qRQ==
-----END CERTIFICATE-----
";

const EC_PEM: &str = "-----BEGIN CERTIFICATE-----
MIIBhjCCAS2gAwIBAgIUKOTJV423d1CyLdx8BZrtX6W8P9AwCgYIKoZIzj0EAwIw
GTEXMBUGA1UEAwwOZGlkZ2VuIHRlc3QgRUMwHhcNMjYwODA1MDIwNjMzWhcNMzYw
ODAyMDIwNjMzWjAZMRcwFQYDVQQDDA5kaWRnZW4gdGVzdCBFQzBZMBMGByqGSM49
AgEGCCqGSM49AwEHA0IABA9/Hx3tOpcJ1pUVHEgRLznGWINFKDqoPANpzqevYB+f
eH9BhWOLOfS7FnLp5AIQTpiwhs00fxctJ7RK3WfNe/yjUzBRMB0GA1UdDgQWBBR2
Ty84LEYkUvPyIqZU4v9ez0UEkzAfBgNVHSMEGDAWgBR2Ty84LEYkUvPyIqZU4v9e
z0UEkzAPBgNVHRMBAf8EBTADAQH/MAoGCCqGSM49BAMCA0cAMEQCIAcdq5WC6m9+
vlvEMFj5odZ76n4L23ahlejE1l4u0f9iAiA350Fj46ukTN7kNLmAmxNgMYvjVZVV
f8wh52obk5HzFA==
-----END CERTIFICATE-----
";

const ED25519_PEM: &str = "-----BEGIN CERTIFICATE-----
MIIBUTCCAQOgAwIBAgIUNPJG/C72dCen4qNlsMMqPlGUKXgwBQYDK2VwMB4xHDAa
BgNVBAMME2RpZGdlbiB0ZXN0IEVkMjU1MTkwHhcNMjYwODA1MDIwNjMzWhcNMzYw
ODAyMDIwNjMzWjAeMRwwGgYDVQQDDBNkaWRnZW4gdGVzdCBFZDI1NTE5MCowBQYD
K2VwAyEAg4JYX+1IIlJcVc2ApDjfXlxfUhJJNUozZmG7a7W32F2jUzBRMB0GA1Ud
DgQWBBRrrDtOWyRMIg3UH8W46NAQwiVeLzAfBgNVHSMEGDAWgBRrrDtOWyRMIg3U
H8W46NAQwiVeLzAPBgNVHRMBAf8EBTADAQH/MAUGAytlcANBAPAEv5C2W2LSSHwe
UBOgvbyYCKB/3txU/XTzyrEQRSc06aLTynnGhAXImd6O+R8Hsg5y+Y3S4eapo4hK
TZuMMg0=
-----END CERTIFICATE-----
";

const RSA_N: &str = "zFi_XcENIF-_FmX7YNogkp2Lf-Sgbv1gltYR-fv9Qocplwqv4FJ7al8vj_pd4SzoSzlnwCyI9fWg5N207RUTfNxI7vxMryQvnQXy3MP-85ErcDUxAggNILzAgi_jDDggIdVDqiZuLtRlmi_yy6WRXc43fMPSJmrLkBKvRIATUW77EuNhAeZejuO02X9zLE3sR-0bRGO-53FDSgNIhJZCRFx1TUR2BmUnMW4ZHrL09wtmHClArsQd6DweCJKSNRcsyPwV9uARnXnD4_tQvm-jJ8kLYVSnZQNYHmOlsU9M-vicRzgYzfiuPy_C5kFNmyvVd0NUP6xp6qhJdVsNbXszeQ";

// Strip the PEM armor to recover the raw DER bytes.
fn der_from_pem(pem: &str) -> Vec<u8> {
    let body: String = pem.lines().filter(|line| !line.starts_with("-----")).collect();
    Base64::decode_vec(&body).expect("should decode")
}

#[test]
fn rsa_jwk_extraction() {
    let jwk = jwk_from_bytes(RSA_PEM.as_bytes()).expect("should extract");
    assert_eq!(jwk.kty, KeyType::Rsa);
    assert_eq!(jwk.n.as_deref(), Some(RSA_N));
    assert_eq!(jwk.e.as_deref(), Some("AQAB"));
    assert!(jwk.crv.is_none());
}

#[test]
fn der_and_pem_extract_the_same_key() {
    for pem in [RSA_PEM, EC_PEM, ED25519_PEM] {
        let from_pem = jwk_from_bytes(pem.as_bytes()).expect("should extract PEM");
        let from_der = jwk_from_bytes(&der_from_pem(pem)).expect("should extract DER");
        assert_eq!(from_pem, from_der);
    }
}

#[test]
fn rsa_jwk_method() {
    let jwk = jwk_from_bytes(RSA_PEM.as_bytes()).expect("should extract");
    let did = did_from_jwk(&jwk, "jwk").expect("should derive").expect("should produce a DID");
    assert!(did.starts_with("did:jwk:"));
}

#[test]
fn rsa_key_method() {
    let did = did_from_bytes(RSA_PEM.as_bytes(), "key")
        .expect("should derive")
        .expect("should produce a DID");
    assert_eq!(
        did,
        "did:key:z4MXj1wBzi9jUstyPxzLiJXEYVtwB2FQNy2vMikRAAFnnrjPqJ4ag5U6tmikhinYsct5hLqwapDMSWT\
         4Gnsst1zsvYhuU9PkU3TWsHVS6Ebmtm7q7E1co3wjNwDCvkNabrb4LKsJQuwmmETGYfHqHsoPe3G4Srg7GrrCfe\
         dDdi2rGkh68bfhWdAE7bgihcymytFX35jVjw9JpRYxPiMC1EAEvfkNVbSigsdbDWZxtMXouNfBLkUm3DKW4RKik\
         gLCLiF7iF4Lw1DMUb1vZPdHha6WHdxt1XrgSZv8uJTk4H7o76R29Ebya35Gpq3BmVmefjuacbn6prfuEaKbnp1F\
         RBxtgcsPMRNAw79cSJZmkSfuAXdzB3YK2"
    );
}

#[test]
fn ec_p256_key_method() {
    let jwk = jwk_from_bytes(EC_PEM.as_bytes()).expect("should extract");
    assert_eq!(jwk.kty, KeyType::Ec);
    assert_eq!(jwk.crv, Some(Curve::P256));

    let did = did_from_jwk(&jwk, "key").expect("should derive").expect("should produce a DID");
    assert_eq!(did, "did:key:zDnaeRUTb6H2dvC6ZyBETQAbujyCA1iGJfEvZ7ZsHSFB72XCa");
}

#[test]
fn ed25519_key_method() {
    let did = did_from_bytes(ED25519_PEM.as_bytes(), "key")
        .expect("should derive")
        .expect("should produce a DID");
    assert_eq!(did, "did:key:z6MkoJcjQD9szdhQSJAnK4R2dbbFzEQHokSEBPxrnPHnJSwe");
}

#[test]
fn derivation_is_deterministic() {
    let first = did_from_bytes(EC_PEM.as_bytes(), "jwk").expect("should derive");
    let second = did_from_bytes(EC_PEM.as_bytes(), "jwk").expect("should derive");
    assert_eq!(first, second);
}

#[test]
fn empty_input_fails_before_derivation() {
    let err = did_from_bytes(&[], "key").expect_err("should fail");
    assert!(matches!(err, Error::Certificate(_)));
}

struct CountingRegistrar {
    calls: AtomicUsize,
    result: Option<DidResult>,
}

#[async_trait]
impl Registrar for CountingRegistrar {
    async fn register_by_key(
        &self, _key_type: &str, _key: &KeyHandle, _options: &CreateOptions,
    ) -> anyhow::Result<Option<DidResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.clone())
    }
}

struct FailingRegistrar;

#[async_trait]
impl Registrar for FailingRegistrar {
    async fn register_by_key(
        &self, _key_type: &str, _key: &KeyHandle, _options: &CreateOptions,
    ) -> anyhow::Result<Option<DidResult>> {
        Err(anyhow::anyhow!("ledger unreachable"))
    }
}

#[test]
fn unsupported_method_never_reaches_the_backend() {
    let registrar = Arc::new(CountingRegistrar { calls: AtomicUsize::new(0), result: None });
    let jwk = jwk_from_bytes(EC_PEM.as_bytes()).expect("should extract");

    let err = did_from_jwk_with(&jwk, "web", Arc::clone(&registrar) as Arc<dyn Registrar>)
        .expect_err("should fail");
    let Error::UnsupportedMethod(tag) = err else {
        panic!("should be an unsupported method error");
    };
    assert_eq!(tag, "web");
    assert_eq!(registrar.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn absent_registration_result_is_not_an_error() {
    let registrar = Arc::new(CountingRegistrar { calls: AtomicUsize::new(0), result: None });
    let jwk = jwk_from_bytes(EC_PEM.as_bytes()).expect("should extract");

    let did = did_from_jwk_with(&jwk, "key", Arc::clone(&registrar) as Arc<dyn Registrar>)
        .expect("should derive");
    assert!(did.is_none());
    assert_eq!(registrar.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn backend_failure_preserves_the_cause() {
    let jwk = jwk_from_bytes(EC_PEM.as_bytes()).expect("should extract");

    let err = did_from_jwk_with(&jwk, "jwk", Arc::new(FailingRegistrar)).expect_err("should fail");
    let Error::Registration(cause) = err else {
        panic!("should be a registration error");
    };
    assert_eq!(cause.to_string(), "ledger unreachable");
}

#[test]
fn fixed_key_backend_discriminator() {
    assert_eq!(BACKEND_KEY_TYPE, "key");
}
