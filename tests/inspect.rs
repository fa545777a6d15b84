mod util;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use certforge::api;
use certforge::cert::Certificate;
use certforge::error::CertForgeError;
use serde_json::Value;

fn description(cert_pem: &str) -> Value {
    serde_json::from_str(&api::parse_certificate(cert_pem).unwrap()).unwrap()
}

/// The JSON serial number matches the serial embedded in the signed
/// certificate bytes.
#[test]
fn described_serial_matches_the_certificate_bytes() {
    let key = util::generate_p256_key_pem();
    let csr = util::csr_for("test.example.com", &key);
    let cert_pem = api::sign_certificate(&csr, &key, "", true).unwrap();

    let desc = description(&cert_pem);
    let cert = Certificate::from_pem(&cert_pem).unwrap();
    let embedded: String = cert
        .inner
        .tbs_certificate
        .serial_number
        .as_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect();

    assert_eq!(desc["serialNumber"].as_str().unwrap(), embedded);
}

/// The description names the key and signature algorithms and carries the
/// SPKI exactly as encoded in the certificate.
#[test]
fn described_algorithms_and_public_key_match() {
    let key = util::generate_p256_key_pem();
    let csr = util::csr_for("algo.example.com", &key);
    let cert_pem = api::sign_certificate(&csr, &key, "", true).unwrap();

    let desc = description(&cert_pem);
    assert_eq!(desc["version"], 3);
    assert_eq!(desc["publicKeyAlgorithm"], "ECDSA P-256");
    assert_eq!(desc["signatureAlgorithm"], "ecdsa-with-SHA256");

    let cert = Certificate::from_pem(&cert_pem).unwrap();
    use der::Encode;
    let spki_der = cert
        .inner
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .unwrap();
    assert_eq!(desc["publicKey"].as_str().unwrap(), STANDARD.encode(spki_der));
}

/// Ed25519-signed certificates are described with their own algorithm names.
#[test]
fn ed25519_certificates_are_described() {
    let key = util::generate_ed25519_key_pem();
    let csr = util::csr_for("ed.example.com", &key);
    let cert_pem = api::sign_certificate(&csr, &key, "", true).unwrap();

    let desc = description(&cert_pem);
    assert_eq!(desc["publicKeyAlgorithm"], "Ed25519");
    assert_eq!(desc["signatureAlgorithm"], "Ed25519");
}

/// Parsing rejects inputs that are not certificates, with a typed error for
/// each failure class.
#[test]
fn parse_rejects_non_certificates() {
    // No PEM block.
    assert!(matches!(
        api::parse_certificate("plain text").unwrap_err(),
        CertForgeError::Pem(_)
    ));

    // A PEM block with the wrong label.
    let key_pem = util::generate_p256_key_pem();
    assert!(matches!(
        api::parse_certificate(&key_pem).unwrap_err(),
        CertForgeError::Pem(_)
    ));

    // The right label wrapping bytes that are not a certificate.
    let bogus =
        certforge::pem_utils::der_to_pem(b"not DER at all", certforge::pem_utils::CERTIFICATE_LABEL);
    assert!(matches!(
        api::parse_certificate(&bogus).unwrap_err(),
        CertForgeError::Decoding(_)
    ));

    // A truncated copy of a real certificate.
    let key = util::generate_p256_key_pem();
    let cert_pem =
        api::sign_certificate(&util::csr_for("trunc.example.com", &key), &key, "", true).unwrap();
    let der = certforge::pem_utils::pem_to_der(&cert_pem, certforge::pem_utils::CERTIFICATE_LABEL)
        .unwrap();
    let truncated =
        certforge::pem_utils::der_to_pem(&der[..der.len() / 2], certforge::pem_utils::CERTIFICATE_LABEL);
    assert!(matches!(
        api::parse_certificate(&truncated).unwrap_err(),
        CertForgeError::Decoding(_)
    ));
}
