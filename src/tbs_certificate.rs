//! The unsigned certificate template: CSR fields copied verbatim, identifiers
//! from the caller, everything else fixed policy.

use x509_cert::Version;
use x509_cert::certificate::TbsCertificateInner;
use x509_cert::ext::Extension;
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};

use crate::cert::extensions::{
    AsExtension, AuthorityKeyIdentifier, BasicConstraints, ExtendedKeyUsage, KeyUsage,
    SubjectAltName, SubjectKeyIdentifier,
};
use crate::cert::params::Validity;
use crate::csr::CertificateSigningRequest;
use crate::error::{CertForgeError, Result};
use crate::policy;

/// The "To Be Signed" portion of a certificate before the signer fills in the
/// issuer-dependent pieces.
///
/// `issuer` starts out equal to `subject`; the chained signing path replaces
/// it with the parent's subject. `authority_key_id` stays unset unless the
/// self-signed path mirrors the subject key identifier into it.
pub struct TbsCertificate {
    /// Certificate serial number, unsigned big-endian bytes.
    pub serial_number: Vec<u8>,
    /// Certificate issuer distinguished name.
    pub issuer: Name,
    /// Validity window.
    pub validity: Validity,
    /// Certificate subject distinguished name.
    pub subject: Name,
    /// Subject's public key.
    pub subject_public_key: SubjectPublicKeyInfoOwned,
    /// Subject key identifier derived from the public key.
    pub subject_key_id: Vec<u8>,
    /// Authority key identifier, set only when self-signing.
    pub authority_key_id: Option<Vec<u8>>,
    /// Subject alternative names copied from the request.
    pub san: SubjectAltName,
    /// CA flag, forced true by the self-signed path.
    pub is_ca: bool,
}

impl TbsCertificate {
    /// Builds the template for a request: public key, subject, and SANs come
    /// verbatim from the CSR; the validity window and usage sets come from
    /// the fixed issuance policy; nothing is caller-configurable.
    pub fn from_csr(
        csr: &CertificateSigningRequest,
        subject_key_id: Vec<u8>,
        serial_number: Vec<u8>,
    ) -> Result<Self> {
        // Reject unsupported key algorithms before committing to a template.
        csr.key_algorithm()?;

        let now = time::OffsetDateTime::now_utc();
        Ok(Self {
            serial_number,
            issuer: csr.subject.clone(),
            validity: policy::issuance_validity(now),
            subject: csr.subject.clone(),
            subject_public_key: csr.public_key.clone(),
            subject_key_id,
            authority_key_id: None,
            san: csr.san.clone(),
            is_ca: false,
        })
    }

    fn extensions(&self) -> Result<Vec<Extension>> {
        let mut extensions = vec![
            BasicConstraints {
                is_ca: self.is_ca,
                max_path_length: None,
            }
            .to_extension(true)?,
            KeyUsage(policy::key_usage()).to_extension(true)?,
            ExtendedKeyUsage {
                usage: policy::extended_key_usage(),
            }
            .to_extension(false)?,
            SubjectKeyIdentifier {
                key_id: self.subject_key_id.clone(),
            }
            .to_extension(false)?,
        ];
        if let Some(key_identifier) = &self.authority_key_id {
            extensions.push(
                AuthorityKeyIdentifier {
                    key_identifier: key_identifier.clone(),
                }
                .to_extension(false)?,
            );
        }
        if !self.san.is_empty() {
            extensions.push(self.san.to_extension(false)?);
        }
        Ok(extensions)
    }

    /// Lowers the template into the DER-ready structure the signer signs
    /// over. `signature_algorithm` must match the outer certificate's
    /// `signatureAlgorithm` field.
    pub fn to_tbs_certificate_inner(
        &self,
        signature_algorithm: AlgorithmIdentifierOwned,
    ) -> Result<TbsCertificateInner> {
        let not_before = x509_cert::time::Time::UtcTime(
            der::asn1::UtcTime::from_system_time(self.validity.not_before.into())
                .map_err(|e| CertForgeError::Encoding(format!("notBefore: {e}")))?,
        );
        let not_after = x509_cert::time::Time::UtcTime(
            der::asn1::UtcTime::from_system_time(self.validity.not_after.into())
                .map_err(|e| CertForgeError::Encoding(format!("notAfter: {e}")))?,
        );
        let validity = x509_cert::time::Validity {
            not_before,
            not_after,
        };

        let serial_number = SerialNumber::new(&self.serial_number)
            .map_err(|e| CertForgeError::Encoding(format!("serial number: {e}")))?;

        Ok(TbsCertificateInner {
            version: Version::V3,
            serial_number,
            signature: signature_algorithm,
            issuer: self.issuer.clone(),
            validity,
            subject: self.subject.clone(),
            subject_public_key_info: self.subject_public_key.clone(),
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: Some(self.extensions()?),
        })
    }
}
