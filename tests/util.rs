#![allow(dead_code)]

use certforge::cert::extensions::SubjectAltName;
use certforge::cert::params::DistinguishedName;
use certforge::csr::CsrParams;
use certforge::key::SigningKey;
use pkcs8::{EncodePrivateKey, LineEnding};
use rand_core::OsRng;

pub fn generate_p256_key_pem() -> String {
    p256::ecdsa::SigningKey::random(&mut OsRng)
        .to_pkcs8_pem(LineEnding::LF)
        .unwrap()
        .as_str()
        .to_owned()
}

pub fn generate_ed25519_key_pem() -> String {
    ed25519_dalek::SigningKey::generate(&mut OsRng)
        .to_pkcs8_pem(LineEnding::LF)
        .unwrap()
        .as_str()
        .to_owned()
}

pub fn csr_for(common_name: &str, key_pem: &str) -> String {
    csr_with_san(common_name, key_pem, SubjectAltName::default())
}

pub fn csr_with_san(common_name: &str, key_pem: &str, san: SubjectAltName) -> String {
    let subject = DistinguishedName::builder()
        .common_name(common_name.to_string())
        .build();
    let key = SigningKey::from_pkcs8_pem(key_pem).unwrap();
    CsrParams::builder()
        .subject(subject)
        .san(san)
        .build()
        .build_and_sign(&key)
        .unwrap()
}
