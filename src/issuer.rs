//! The two signing paths: self-signed and chained to a supplied issuer.
//! The caller selects the mode explicitly; it is never inferred from inputs.

use der::Encode;
use der::asn1::BitString;
use x509_cert::certificate::CertificateInner;
use x509_cert::spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};

use crate::cert::Certificate;
use crate::error::{CertForgeError, Result};
use crate::key::SigningKey;
use crate::pki;
use crate::tbs_certificate::TbsCertificate;

/// Signs the template with its own subject's key.
///
/// Before signing, the issuer becomes the subject, the authority key
/// identifier is set equal to the subject key identifier, and the CA flag is
/// forced true.
pub fn issue_self_signed(mut template: TbsCertificate, key: &SigningKey) -> Result<Certificate> {
    ensure_key_matches(
        key,
        &template.subject_public_key,
        "the certificate's own public key",
    )?;

    template.issuer = template.subject.clone();
    template.authority_key_id = Some(template.subject_key_id.clone());
    template.is_ca = true;

    sign(template, key)
}

/// Signs the template with an externally supplied issuer certificate and its
/// private key.
///
/// The template's issuer becomes the parent's subject; the CA flag stays
/// false and no authority key identifier is emitted.
pub fn issue_chained(
    mut template: TbsCertificate,
    parent: &Certificate,
    key: &SigningKey,
) -> Result<Certificate> {
    ensure_key_matches(
        key,
        &parent.inner.tbs_certificate.subject_public_key_info,
        "the issuer certificate's public key",
    )?;

    template.issuer = parent.inner.tbs_certificate.subject.clone();

    sign(template, key)
}

/// The signing key must be the private half of `expected`, or the produced
/// certificate could never verify against its claimed issuer.
fn ensure_key_matches(
    key: &SigningKey,
    expected: &SubjectPublicKeyInfoOwned,
    expected_description: &str,
) -> Result<()> {
    let provided = key
        .public_key_info()?
        .to_der()
        .map_err(|e| CertForgeError::Encoding(e.to_string()))?;
    let expected_der = expected
        .to_der()
        .map_err(|e| CertForgeError::Encoding(e.to_string()))?;
    if provided != expected_der {
        return Err(CertForgeError::IssuerKeyMismatch(format!(
            "signing key does not correspond to {expected_description}"
        )));
    }
    Ok(())
}

fn sign(template: TbsCertificate, key: &SigningKey) -> Result<Certificate> {
    let signature_algorithm: AlgorithmIdentifierOwned = key.signature_algorithm().into();

    let tbs_certificate = template.to_tbs_certificate_inner(signature_algorithm.clone())?;
    let message = tbs_certificate
        .to_der()
        .map_err(|e| CertForgeError::Encoding(e.to_string()))?;
    let signature = pki::sign_data(key, &message)?;

    let inner = CertificateInner {
        tbs_certificate,
        signature_algorithm,
        signature: BitString::from_bytes(&signature)
            .map_err(|e| CertForgeError::Encoding(e.to_string()))?,
    };

    Ok(Certificate { inner })
}
