//! Identifier derivation for issued certificates: random serial numbers and
//! deterministic subject key identifiers.

use rand_core::{OsRng, RngCore};
use sha1::{Digest, Sha1};
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::error::{CertForgeError, Result};
use crate::policy;

/// Draws a fresh certificate serial number from the operating system's secure
/// randomness source.
///
/// The result is `policy::SERIAL_NUMBER_BYTES` bytes interpreted as an
/// unsigned big-endian integer, i.e. a uniform value in [0, 2^128). Collision
/// avoidance across calls is statistical only; nothing is recorded.
pub fn generate_serial_number() -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; policy::SERIAL_NUMBER_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CertForgeError::Entropy(e.to_string()))?;
    Ok(bytes)
}

/// Derives the subject key identifier for a public key: the SHA-1 digest of
/// the bit-string portion of its SubjectPublicKeyInfo encoding.
///
/// Identical public keys always yield identical identifiers.
pub fn subject_key_id(public_key: &SubjectPublicKeyInfoOwned) -> Vec<u8> {
    Sha1::digest(public_key.subject_public_key.raw_bytes()).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::Decode;
    use pkcs8::EncodePublicKey;

    fn spki_for(secret: &[u8; 32]) -> SubjectPublicKeyInfoOwned {
        let key = ed25519_dalek::SigningKey::from_bytes(secret);
        let doc = key.verifying_key().to_public_key_der().unwrap();
        SubjectPublicKeyInfoOwned::from_der(doc.as_bytes()).unwrap()
    }

    #[test]
    fn test_serial_number_has_policy_width() {
        let serial = generate_serial_number().unwrap();
        assert_eq!(serial.len(), policy::SERIAL_NUMBER_BYTES);
    }

    #[test]
    fn test_serial_numbers_are_fresh_per_call() {
        let draws: Vec<_> = (0..8).map(|_| generate_serial_number().unwrap()).collect();
        for (i, a) in draws.iter().enumerate() {
            for b in &draws[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_subject_key_id_is_deterministic() {
        let spki = spki_for(&[7u8; 32]);
        let again = spki_for(&[7u8; 32]);
        assert_eq!(subject_key_id(&spki), subject_key_id(&again));
        assert_eq!(subject_key_id(&spki).len(), 20);
    }

    #[test]
    fn test_distinct_keys_get_distinct_ids() {
        assert_ne!(
            subject_key_id(&spki_for(&[7u8; 32])),
            subject_key_id(&spki_for(&[8u8; 32]))
        );
    }
}
