//! End-to-end walkthrough: self-sign a root, chain a leaf certificate to it,
//! then inspect the result.
//!
//! Run with `cargo run --example issue`.

use certforge::api;
use certforge::cert::extensions::SubjectAltName;
use certforge::cert::params::DistinguishedName;
use certforge::csr::CsrParams;
use certforge::key::SigningKey;
use pkcs8::{EncodePrivateKey, LineEnding};
use rand_core::OsRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Keys are normally supplied by the caller; generate two for the demo.
    let ca_key_pem = p256::ecdsa::SigningKey::random(&mut OsRng)
        .to_pkcs8_pem(LineEnding::LF)?
        .as_str()
        .to_owned();
    let leaf_key_pem = p256::ecdsa::SigningKey::random(&mut OsRng)
        .to_pkcs8_pem(LineEnding::LF)?
        .as_str()
        .to_owned();

    // Root: a CSR signed by its own key.
    let ca_subject = DistinguishedName::builder()
        .common_name("Demo Root".to_string())
        .organization("CertForge".to_string())
        .build();
    let ca_csr = CsrParams::builder()
        .subject(ca_subject)
        .build()
        .build_and_sign(&SigningKey::from_pkcs8_pem(&ca_key_pem)?)?;
    let ca_cert = api::sign_certificate(&ca_csr, &ca_key_pem, "", true)?;
    println!("Root certificate:\n{ca_cert}");

    // Leaf: chained to the root, with subject alternative names.
    let leaf_subject = DistinguishedName::builder()
        .common_name("demo.local".to_string())
        .build();
    let san = SubjectAltName {
        dns_names: vec!["demo.local".to_string(), "www.demo.local".to_string()],
        ip_addresses: vec!["127.0.0.1".parse()?],
        ..Default::default()
    };
    let leaf_csr = CsrParams::builder()
        .subject(leaf_subject)
        .san(san)
        .build()
        .build_and_sign(&SigningKey::from_pkcs8_pem(&leaf_key_pem)?)?;
    let leaf_cert = api::sign_certificate(&leaf_csr, &ca_key_pem, &ca_cert, false)?;
    println!("Leaf certificate:\n{leaf_cert}");

    println!("Leaf description:\n{}", api::parse_certificate(&leaf_cert)?);
    Ok(())
}
