use const_oid::ObjectIdentifier;
use const_oid::db::{rfc5912, rfc8410};
use ed25519_dalek::SigningKey as Ed25519SigningKey;
use p256::ecdsa::SigningKey as P256SigningKey;
use p384::ecdsa::SigningKey as P384SigningKey;
use p521::ecdsa::SigningKey as P521SigningKey;
use pkcs8::{DecodePrivateKey, EncodePublicKey, PrivateKeyInfo};
use rsa::{RsaPrivateKey, RsaPublicKey};
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::cert::SignatureAlgorithm;
use crate::error::{CertForgeError, Result};
use crate::pem_utils;

/// The public-key algorithms this crate can issue for and sign with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Rsa,
    EcdsaP256,
    EcdsaP384,
    EcdsaP521,
    Ed25519,
}

impl KeyAlgorithm {
    /// Classifies a SubjectPublicKeyInfo by its algorithm identifier.
    ///
    /// # Errors
    /// `UnsupportedKeyAlgorithm` for any OID outside the supported set, and for
    /// EC keys whose curve parameters are absent or unrecognized.
    pub fn from_spki(spki: &SubjectPublicKeyInfoOwned) -> Result<Self> {
        match spki.algorithm.oid {
            rfc5912::RSA_ENCRYPTION => Ok(KeyAlgorithm::Rsa),
            rfc5912::ID_EC_PUBLIC_KEY => {
                let params = spki.algorithm.parameters.as_ref().ok_or_else(|| {
                    CertForgeError::UnsupportedKeyAlgorithm(
                        "EC key without named-curve parameters".to_string(),
                    )
                })?;
                let curve: ObjectIdentifier = params.decode_as().map_err(|e| {
                    CertForgeError::UnsupportedKeyAlgorithm(format!(
                        "EC curve parameters are not an OID: {e}"
                    ))
                })?;
                match curve {
                    rfc5912::SECP_256_R_1 => Ok(KeyAlgorithm::EcdsaP256),
                    rfc5912::SECP_384_R_1 => Ok(KeyAlgorithm::EcdsaP384),
                    rfc5912::SECP_521_R_1 => Ok(KeyAlgorithm::EcdsaP521),
                    other => Err(CertForgeError::UnsupportedKeyAlgorithm(format!(
                        "EC curve {other}"
                    ))),
                }
            }
            rfc8410::ID_ED_25519 => Ok(KeyAlgorithm::Ed25519),
            other => Err(CertForgeError::UnsupportedKeyAlgorithm(other.to_string())),
        }
    }
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            KeyAlgorithm::Rsa => "RSA",
            KeyAlgorithm::EcdsaP256 => "ECDSA P-256",
            KeyAlgorithm::EcdsaP384 => "ECDSA P-384",
            KeyAlgorithm::EcdsaP521 => "ECDSA P-521",
            KeyAlgorithm::Ed25519 => "Ed25519",
        };
        f.write_str(name)
    }
}

/// A private key usable for signing certificates.
///
/// Decoded from caller-supplied PKCS#8 material; the key is used only to
/// produce signatures and is never serialized or logged.
pub enum SigningKey {
    Rsa(Box<RsaPrivateKey>),
    EcdsaP256(P256SigningKey),
    EcdsaP384(P384SigningKey),
    EcdsaP521(P521SigningKey),
    Ed25519(Ed25519SigningKey),
}

impl SigningKey {
    /// Decodes a PEM-wrapped PKCS#8 private key (`PRIVATE KEY` block).
    pub fn from_pkcs8_pem(pem: &str) -> Result<Self> {
        let der = pem_utils::pem_to_der(pem, pem_utils::PRIVATE_KEY_LABEL)?;
        Self::from_pkcs8_der(&der)
    }

    /// Decodes a DER-encoded PKCS#8 private key, dispatching on the algorithm
    /// identifier inside the structure.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let info = PrivateKeyInfo::try_from(der)
            .map_err(|e| CertForgeError::Decoding(format!("PKCS#8 private key: {e}")))?;

        match info.algorithm.oid {
            rfc5912::RSA_ENCRYPTION => {
                let key = RsaPrivateKey::from_pkcs8_der(der)
                    .map_err(|e| CertForgeError::Decoding(format!("RSA private key: {e}")))?;
                Ok(SigningKey::Rsa(Box::new(key)))
            }
            rfc5912::ID_EC_PUBLIC_KEY => {
                let curve = info.algorithm.parameters_oid().map_err(|e| {
                    CertForgeError::UnsupportedKeyAlgorithm(format!(
                        "EC key without a named curve: {e}"
                    ))
                })?;
                match curve {
                    rfc5912::SECP_256_R_1 => {
                        let key = P256SigningKey::from_pkcs8_der(der).map_err(|e| {
                            CertForgeError::Decoding(format!("P-256 private key: {e}"))
                        })?;
                        Ok(SigningKey::EcdsaP256(key))
                    }
                    rfc5912::SECP_384_R_1 => {
                        let key = P384SigningKey::from_pkcs8_der(der).map_err(|e| {
                            CertForgeError::Decoding(format!("P-384 private key: {e}"))
                        })?;
                        Ok(SigningKey::EcdsaP384(key))
                    }
                    rfc5912::SECP_521_R_1 => {
                        let key = P521SigningKey::from_pkcs8_der(der).map_err(|e| {
                            CertForgeError::Decoding(format!("P-521 private key: {e}"))
                        })?;
                        Ok(SigningKey::EcdsaP521(key))
                    }
                    other => Err(CertForgeError::UnsupportedKeyAlgorithm(format!(
                        "EC curve {other}"
                    ))),
                }
            }
            rfc8410::ID_ED_25519 => {
                let key = Ed25519SigningKey::from_pkcs8_der(der)
                    .map_err(|e| CertForgeError::Decoding(format!("Ed25519 private key: {e}")))?;
                Ok(SigningKey::Ed25519(key))
            }
            other => Err(CertForgeError::UnsupportedKeyAlgorithm(other.to_string())),
        }
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            SigningKey::Rsa(_) => KeyAlgorithm::Rsa,
            SigningKey::EcdsaP256(_) => KeyAlgorithm::EcdsaP256,
            SigningKey::EcdsaP384(_) => KeyAlgorithm::EcdsaP384,
            SigningKey::EcdsaP521(_) => KeyAlgorithm::EcdsaP521,
            SigningKey::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }

    /// The signature algorithm certificates signed by this key will carry.
    pub fn signature_algorithm(&self) -> SignatureAlgorithm {
        match self {
            SigningKey::Rsa(_) => SignatureAlgorithm::Sha256WithRsa,
            SigningKey::EcdsaP256(_) => SignatureAlgorithm::EcdsaWithSha256,
            SigningKey::EcdsaP384(_) => SignatureAlgorithm::EcdsaWithSha384,
            SigningKey::EcdsaP521(_) => SignatureAlgorithm::EcdsaWithSha512,
            SigningKey::Ed25519(_) => SignatureAlgorithm::Ed25519,
        }
    }

    /// Re-encodes the key's public half into SubjectPublicKeyInfo form.
    pub fn public_key_info(&self) -> Result<SubjectPublicKeyInfoOwned> {
        let doc = match self {
            SigningKey::Rsa(private) => RsaPublicKey::from(private.as_ref()).to_public_key_der(),
            SigningKey::EcdsaP256(key) => key.verifying_key().to_public_key_der(),
            SigningKey::EcdsaP384(key) => key.verifying_key().to_public_key_der(),
            SigningKey::EcdsaP521(key) => key.verifying_key().to_public_key_der(),
            SigningKey::Ed25519(key) => key.verifying_key().to_public_key_der(),
        }
        .map_err(|e| CertForgeError::Encoding(format!("public key to SPKI: {e}")))?;

        use der::Decode;
        SubjectPublicKeyInfoOwned::from_der(doc.as_bytes())
            .map_err(|e| CertForgeError::Decoding(format!("re-reading SPKI: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkcs8::{EncodePrivateKey, LineEnding};
    use rand_core::OsRng;

    #[test]
    fn test_p256_pkcs8_round_trip() {
        let generated = P256SigningKey::random(&mut OsRng);
        let der = generated.to_pkcs8_der().unwrap();
        let key = SigningKey::from_pkcs8_der(der.as_bytes()).unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::EcdsaP256);
        assert!(matches!(
            key.signature_algorithm(),
            SignatureAlgorithm::EcdsaWithSha256
        ));
    }

    #[test]
    fn test_ed25519_pem_round_trip() {
        let generated = Ed25519SigningKey::generate(&mut OsRng);
        let pem = generated.to_pkcs8_pem(LineEnding::LF).unwrap();
        let key = SigningKey::from_pkcs8_pem(&pem).unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::Ed25519);
    }

    #[test]
    fn test_spki_matches_generated_public_key() {
        let generated = P256SigningKey::random(&mut OsRng);
        let expected = generated.verifying_key().to_public_key_der().unwrap();
        let key = SigningKey::from_pkcs8_der(
            generated.to_pkcs8_der().unwrap().as_bytes(),
        )
        .unwrap();
        let spki = key.public_key_info().unwrap();
        assert_eq!(KeyAlgorithm::from_spki(&spki).unwrap(), KeyAlgorithm::EcdsaP256);
        use der::Encode;
        assert_eq!(spki.to_der().unwrap(), expected.as_bytes());
    }

    #[test]
    fn test_garbage_key_material_is_rejected() {
        let pem = crate::pem_utils::der_to_pem(b"not a key", pem_utils::PRIVATE_KEY_LABEL);
        let err = SigningKey::from_pkcs8_pem(&pem).unwrap_err();
        assert!(matches!(err, CertForgeError::Decoding(_)));
    }
}
