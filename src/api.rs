//! The boundary operations a host calls, one synchronous request per call.
//!
//! Both functions are stateless: every invocation decodes its inputs, does
//! its work, and returns, leaving nothing behind. Failures come back as
//! [`CertForgeError`](crate::error::CertForgeError) values so callers can
//! react per cause; the same diagnostics also go to the `tracing` channel.

use tracing::{debug, warn};

use crate::cert::Certificate;
use crate::csr::CertificateSigningRequest;
use crate::describe::CertificateDescription;
use crate::error::Result;
use crate::ids;
use crate::issuer;
use crate::key::SigningKey;
use crate::tbs_certificate::TbsCertificate;

/// Parses a PEM-encoded certificate and returns a JSON description of every
/// standard field.
pub fn parse_certificate(pem_cert: &str) -> Result<String> {
    let result = describe_certificate(pem_cert);
    if let Err(err) = &result {
        warn!(%err, "certificate inspection failed");
    }
    result
}

fn describe_certificate(pem_cert: &str) -> Result<String> {
    let cert = Certificate::from_pem(pem_cert)?;
    CertificateDescription::from_certificate(&cert)?.to_json()
}

/// Signs the CSR with the supplied PKCS#8 private key and returns the new
/// certificate PEM-encoded.
///
/// With `self_sign` set, the request is signed by its own key and
/// `pem_signer_cert` is ignored; otherwise `pem_signer_cert` must hold the
/// issuer's certificate, whose subject becomes the new certificate's issuer.
pub fn sign_certificate(
    pem_csr: &str,
    pem_signer_key: &str,
    pem_signer_cert: &str,
    self_sign: bool,
) -> Result<String> {
    let result = issue_certificate(pem_csr, pem_signer_key, pem_signer_cert, self_sign);
    if let Err(err) = &result {
        warn!(%err, self_sign, "certificate issuance failed");
    }
    result
}

fn issue_certificate(
    pem_csr: &str,
    pem_signer_key: &str,
    pem_signer_cert: &str,
    self_sign: bool,
) -> Result<String> {
    let csr = CertificateSigningRequest::from_pem(pem_csr)?;
    let signer_key = SigningKey::from_pkcs8_pem(pem_signer_key)?;

    let serial_number = ids::generate_serial_number()?;
    let subject_key_id = ids::subject_key_id(&csr.public_key);
    let template = TbsCertificate::from_csr(&csr, subject_key_id, serial_number)?;

    let cert = if self_sign {
        debug!(subject = %template.subject, "issuing self-signed certificate");
        issuer::issue_self_signed(template, &signer_key)?
    } else {
        let parent = Certificate::from_pem(pem_signer_cert)?;
        debug!(
            subject = %template.subject,
            issuer = %parent.inner.tbs_certificate.subject,
            "issuing certificate chained to supplied issuer"
        );
        issuer::issue_chained(template, &parent, &signer_key)?
    };

    cert.to_pem()
}
