pub mod extensions;
pub mod params;

use const_oid::ObjectIdentifier;
use der::{Decode, Encode, EncodePem};
use x509_cert::certificate::CertificateInner;
use x509_cert::spki::AlgorithmIdentifierOwned;

use crate::error::{CertForgeError, Result};
use crate::pem_utils;

/// The signature algorithms issued certificates can carry.
///
/// Each variant maps to the OID the certificate's `signatureAlgorithm` field
/// and the TBS `signature` field both carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// SHA-256 with RSA encryption (PKCS#1 v1.5).
    Sha256WithRsa,
    /// ECDSA over P-256 with SHA-256.
    EcdsaWithSha256,
    /// ECDSA over P-384 with SHA-384.
    EcdsaWithSha384,
    /// ECDSA over P-521 with SHA-512.
    EcdsaWithSha512,
    /// Ed25519.
    Ed25519,
}

impl SignatureAlgorithm {
    pub fn from_oid(oid: ObjectIdentifier) -> Option<Self> {
        match oid {
            const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION => {
                Some(SignatureAlgorithm::Sha256WithRsa)
            }
            const_oid::db::rfc5912::ECDSA_WITH_SHA_256 => Some(SignatureAlgorithm::EcdsaWithSha256),
            const_oid::db::rfc5912::ECDSA_WITH_SHA_384 => Some(SignatureAlgorithm::EcdsaWithSha384),
            const_oid::db::rfc5912::ECDSA_WITH_SHA_512 => Some(SignatureAlgorithm::EcdsaWithSha512),
            const_oid::db::rfc8410::ID_ED_25519 => Some(SignatureAlgorithm::Ed25519),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Sha256WithRsa => "sha256WithRSAEncryption",
            SignatureAlgorithm::EcdsaWithSha256 => "ecdsa-with-SHA256",
            SignatureAlgorithm::EcdsaWithSha384 => "ecdsa-with-SHA384",
            SignatureAlgorithm::EcdsaWithSha512 => "ecdsa-with-SHA512",
            SignatureAlgorithm::Ed25519 => "Ed25519",
        }
    }
}

impl From<SignatureAlgorithm> for AlgorithmIdentifierOwned {
    fn from(value: SignatureAlgorithm) -> Self {
        let oid = match value {
            SignatureAlgorithm::Sha256WithRsa => const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION,
            SignatureAlgorithm::EcdsaWithSha256 => const_oid::db::rfc5912::ECDSA_WITH_SHA_256,
            SignatureAlgorithm::EcdsaWithSha384 => const_oid::db::rfc5912::ECDSA_WITH_SHA_384,
            SignatureAlgorithm::EcdsaWithSha512 => const_oid::db::rfc5912::ECDSA_WITH_SHA_512,
            SignatureAlgorithm::Ed25519 => const_oid::db::rfc8410::ID_ED_25519,
        };
        AlgorithmIdentifierOwned {
            oid,
            parameters: None,
        }
    }
}

/// A decoded (or freshly issued) X.509 certificate.
#[derive(Debug, Clone)]
pub struct Certificate {
    /// The inner representation of the certificate.
    pub inner: CertificateInner,
}

impl Certificate {
    /// Decodes a certificate from DER.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let inner = CertificateInner::from_der(der)
            .map_err(|e| CertForgeError::Decoding(format!("X.509 certificate: {e}")))?;
        Ok(Certificate { inner })
    }

    /// Decodes a PEM-wrapped certificate (`CERTIFICATE` block).
    pub fn from_pem(pem: &str) -> Result<Self> {
        let der = pem_utils::pem_to_der(pem, pem_utils::CERTIFICATE_LABEL)?;
        Self::from_der(&der)
    }

    /// Encodes the certificate into DER format.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner
            .to_der()
            .map_err(|e| CertForgeError::Encoding(e.to_string()))
    }

    /// Encodes the certificate into PEM format.
    pub fn to_pem(&self) -> Result<String> {
        self.inner
            .to_pem(pkcs8::LineEnding::LF)
            .map_err(|e| CertForgeError::Encoding(e.to_string()))
    }
}
