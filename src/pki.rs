//! The narrow cryptographic capability seam: sign bytes with a private key,
//! verify a certificate signature with a public key. Swapping the crypto
//! backend touches this module and `key`, nothing else.

use der::Encode;
use ecdsa::signature::{Signer, Verifier};
use pkcs8::DecodePublicKey;
use rsa::pkcs1v15::{
    Signature as RsaSignature, SigningKey as RsaSigningKey, VerifyingKey as RsaVerifyingKey,
};
use rsa::signature::SignatureEncoding;
use sha2::Sha256;
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::cert::Certificate;
use crate::error::{CertForgeError, Result};
use crate::key::{KeyAlgorithm, SigningKey};

/// Signs `data` with the given key.
///
/// RSA keys sign PKCS#1 v1.5 over SHA-256; ECDSA keys sign with the digest
/// matching their curve and return a DER-encoded signature; Ed25519 keys
/// return the raw 64-byte signature. These are the encodings an X.509
/// `signatureValue` bit string expects.
pub fn sign_data(key: &SigningKey, data: &[u8]) -> Result<Vec<u8>> {
    match key {
        SigningKey::Rsa(private) => {
            let signing_key: RsaSigningKey<Sha256> = RsaSigningKey::new(private.as_ref().clone());
            let signature: RsaSignature = signing_key
                .try_sign(data)
                .map_err(|e| CertForgeError::Signing(e.to_string()))?;
            Ok(signature.to_vec())
        }
        SigningKey::EcdsaP256(signing_key) => {
            let signature: p256::ecdsa::Signature = signing_key
                .try_sign(data)
                .map_err(|e| CertForgeError::Signing(e.to_string()))?;
            Ok(signature.to_der().as_bytes().to_vec())
        }
        SigningKey::EcdsaP384(signing_key) => {
            let signature: p384::ecdsa::Signature = signing_key
                .try_sign(data)
                .map_err(|e| CertForgeError::Signing(e.to_string()))?;
            Ok(signature.to_der().as_bytes().to_vec())
        }
        SigningKey::EcdsaP521(signing_key) => {
            let signature: p521::ecdsa::Signature = signing_key
                .try_sign(data)
                .map_err(|e| CertForgeError::Signing(e.to_string()))?;
            Ok(signature.to_der().as_bytes().to_vec())
        }
        SigningKey::Ed25519(signing_key) => {
            let signature = signing_key
                .try_sign(data)
                .map_err(|e| CertForgeError::Signing(e.to_string()))?;
            Ok(signature.to_bytes().to_vec())
        }
    }
}

/// Verifies `signature` over `message` against a public key in SPKI form.
pub fn verify_signature(
    public_key: &SubjectPublicKeyInfoOwned,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    let spki_der = public_key
        .to_der()
        .map_err(|e| CertForgeError::Encoding(e.to_string()))?;
    let failed = |e: rsa::signature::Error| {
        CertForgeError::Signing(format!("signature verification failed: {e}"))
    };

    match KeyAlgorithm::from_spki(public_key)? {
        KeyAlgorithm::Rsa => {
            let public = rsa::RsaPublicKey::from_public_key_der(&spki_der)
                .map_err(|e| CertForgeError::Decoding(format!("RSA public key: {e}")))?;
            let verifying_key = RsaVerifyingKey::<Sha256>::new(public);
            let signature = RsaSignature::try_from(signature)
                .map_err(|e| CertForgeError::Decoding(format!("RSA signature: {e}")))?;
            verifying_key.verify(message, &signature).map_err(failed)
        }
        KeyAlgorithm::EcdsaP256 => {
            let verifying_key = p256::ecdsa::VerifyingKey::from_public_key_der(&spki_der)
                .map_err(|e| CertForgeError::Decoding(format!("P-256 public key: {e}")))?;
            let signature = p256::ecdsa::Signature::from_der(signature)
                .map_err(|e| CertForgeError::Decoding(format!("ECDSA signature: {e}")))?;
            verifying_key.verify(message, &signature).map_err(failed)
        }
        KeyAlgorithm::EcdsaP384 => {
            let verifying_key = p384::ecdsa::VerifyingKey::from_public_key_der(&spki_der)
                .map_err(|e| CertForgeError::Decoding(format!("P-384 public key: {e}")))?;
            let signature = p384::ecdsa::Signature::from_der(signature)
                .map_err(|e| CertForgeError::Decoding(format!("ECDSA signature: {e}")))?;
            verifying_key.verify(message, &signature).map_err(failed)
        }
        KeyAlgorithm::EcdsaP521 => {
            let verifying_key = p521::ecdsa::VerifyingKey::from_public_key_der(&spki_der)
                .map_err(|e| CertForgeError::Decoding(format!("P-521 public key: {e}")))?;
            let signature = p521::ecdsa::Signature::from_der(signature)
                .map_err(|e| CertForgeError::Decoding(format!("ECDSA signature: {e}")))?;
            verifying_key.verify(message, &signature).map_err(failed)
        }
        KeyAlgorithm::Ed25519 => {
            let verifying_key = ed25519_dalek::VerifyingKey::from_public_key_der(&spki_der)
                .map_err(|e| CertForgeError::Decoding(format!("Ed25519 public key: {e}")))?;
            let signature = ed25519_dalek::Signature::from_slice(signature)
                .map_err(|e| CertForgeError::Decoding(format!("Ed25519 signature: {e}")))?;
            verifying_key.verify(message, &signature).map_err(failed)
        }
    }
}

/// Verifies a certificate's signature using the issuer's public key.
///
/// The message is the DER encoding of the certificate's TBS structure.
pub fn verify_certificate_signature(
    cert: &Certificate,
    issuer_public_key: &SubjectPublicKeyInfoOwned,
) -> Result<()> {
    let message = cert
        .inner
        .tbs_certificate
        .to_der()
        .map_err(|e| CertForgeError::Encoding(e.to_string()))?;
    verify_signature(
        issuer_public_key,
        &message,
        cert.inner.signature.raw_bytes(),
    )
}
