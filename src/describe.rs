//! Turns a decoded certificate into a serializable description for external
//! inspection. Read-only; nothing here mutates or re-signs.

use std::fmt::Write as _;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use der::Encode;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::cert::extensions::{
    AsExtension, AuthorityKeyIdentifier, BasicConstraints, ExtendedKeyUsage, KeyUsage,
    SubjectAltName, SubjectKeyIdentifier,
};
use crate::cert::{Certificate, SignatureAlgorithm};
use crate::error::{CertForgeError, Result};
use crate::key::KeyAlgorithm;

/// Every standard field of a certificate, shaped for JSON consumers.
///
/// Field names are camelCase on the wire; byte fields are hex (identifiers,
/// serial) or base64 (DER blobs, signatures); timestamps are RFC 3339.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDescription {
    pub version: u8,
    pub serial_number: String,
    pub subject: String,
    pub issuer: String,
    pub not_before: String,
    pub not_after: String,
    pub public_key_algorithm: String,
    /// Base64 of the DER-encoded SubjectPublicKeyInfo.
    pub public_key: String,
    pub signature_algorithm: String,
    /// Base64 of the raw signature bits.
    pub signature: String,
    pub is_ca: bool,
    pub key_usage: Vec<String>,
    pub extended_key_usage: Vec<String>,
    pub dns_names: Vec<String>,
    pub email_addresses: Vec<String>,
    pub ip_addresses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority_key_id: Option<String>,
}

impl CertificateDescription {
    /// Extracts the description from a decoded certificate.
    pub fn from_certificate(cert: &Certificate) -> Result<Self> {
        let tbs = &cert.inner.tbs_certificate;

        let version = match tbs.version {
            x509_cert::Version::V1 => 1,
            x509_cert::Version::V2 => 2,
            x509_cert::Version::V3 => 3,
        };

        let spki_der = tbs
            .subject_public_key_info
            .to_der()
            .map_err(|e| CertForgeError::Encoding(e.to_string()))?;
        let public_key_algorithm = KeyAlgorithm::from_spki(&tbs.subject_public_key_info)
            .map(|alg| alg.to_string())
            .unwrap_or_else(|_| tbs.subject_public_key_info.algorithm.oid.to_string());

        let signature_algorithm = SignatureAlgorithm::from_oid(cert.inner.signature_algorithm.oid)
            .map(|alg| alg.name().to_string())
            .unwrap_or_else(|| cert.inner.signature_algorithm.oid.to_string());

        let mut description = CertificateDescription {
            version,
            serial_number: hex(tbs.serial_number.as_bytes()),
            subject: tbs.subject.to_string(),
            issuer: tbs.issuer.to_string(),
            not_before: rfc3339(&tbs.validity.not_before)?,
            not_after: rfc3339(&tbs.validity.not_after)?,
            public_key_algorithm,
            public_key: STANDARD.encode(&spki_der),
            signature_algorithm,
            signature: STANDARD.encode(cert.inner.signature.raw_bytes()),
            is_ca: false,
            key_usage: Vec::new(),
            extended_key_usage: Vec::new(),
            dns_names: Vec::new(),
            email_addresses: Vec::new(),
            ip_addresses: Vec::new(),
            subject_key_id: None,
            authority_key_id: None,
        };

        for ext in tbs.extensions.iter().flatten() {
            let value = ext.extn_value.as_bytes();
            if ext.extn_id == BasicConstraints::OID {
                description.is_ca = BasicConstraints::from_extension_value(value)?.is_ca;
            } else if ext.extn_id == KeyUsage::OID {
                description.key_usage = KeyUsage::from_extension_value(value)?.names();
            } else if ext.extn_id == ExtendedKeyUsage::OID {
                description.extended_key_usage = ExtendedKeyUsage::from_extension_value(value)?
                    .usage
                    .iter()
                    .map(|u| u.to_string())
                    .collect();
            } else if ext.extn_id == SubjectAltName::OID {
                let san = SubjectAltName::from_extension_value(value)?;
                description.dns_names = san.dns_names;
                description.email_addresses = san.email_addresses;
                description.ip_addresses =
                    san.ip_addresses.iter().map(|ip| ip.to_string()).collect();
            } else if ext.extn_id == SubjectKeyIdentifier::OID {
                description.subject_key_id =
                    Some(hex(&SubjectKeyIdentifier::from_extension_value(value)?.key_id));
            } else if ext.extn_id == AuthorityKeyIdentifier::OID {
                description.authority_key_id = Some(hex(
                    &AuthorityKeyIdentifier::from_extension_value(value)?.key_identifier,
                ));
            }
        }

        Ok(description)
    }

    /// Renders the description as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CertForgeError::Encoding(e.to_string()))
    }
}

fn rfc3339(t: &x509_cert::time::Time) -> Result<String> {
    let system_time = match t {
        x509_cert::time::Time::UtcTime(ut) => ut.to_system_time(),
        x509_cert::time::Time::GeneralTime(gt) => gt.to_system_time(),
    };
    OffsetDateTime::from(system_time)
        .format(&Rfc3339)
        .map_err(|e| CertForgeError::Encoding(e.to_string()))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().fold(
        String::with_capacity(bytes.len() * 2),
        |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        },
    )
}
