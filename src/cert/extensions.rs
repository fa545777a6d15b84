use std::net::IpAddr;

use const_oid::AssociatedOid;
use der::{
    Decode, Encode,
    asn1::{Ia5String, OctetString},
    oid::ObjectIdentifier,
};
use x509_cert::ext::Extension;
use x509_cert::ext::pkix::name::GeneralName;

use crate::error::{CertForgeError, Result};

pub use der::flagset::FlagSet;
pub use x509_cert::ext::pkix::KeyUsages;

/// A typed view of one X.509 extension: its OID plus the encoding and
/// decoding of the DER value inside the extension's octet string.
pub trait AsExtension: Sized {
    /// The Object Identifier (OID) for the extension.
    const OID: ObjectIdentifier;

    /// Encodes the extension value into DER.
    fn to_extension_value(&self) -> Result<Vec<u8>>;

    /// Decodes the extension value from DER.
    fn from_extension_value(value: &[u8]) -> Result<Self>;

    /// Wraps the encoded value into a full `Extension` entry.
    fn to_extension(&self, critical: bool) -> Result<Extension> {
        let value = OctetString::new(self.to_extension_value()?)
            .map_err(|e| CertForgeError::Encoding(e.to_string()))?;
        Ok(Extension {
            extn_id: Self::OID,
            critical,
            extn_value: value,
        })
    }
}

/// The Subject Alternative Name extension, carrying the three general-name
/// kinds a certification request can ask for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectAltName {
    pub dns_names: Vec<String>,
    pub email_addresses: Vec<String>,
    pub ip_addresses: Vec<IpAddr>,
}

impl SubjectAltName {
    pub fn is_empty(&self) -> bool {
        self.dns_names.is_empty() && self.email_addresses.is_empty() && self.ip_addresses.is_empty()
    }
}

impl AsExtension for SubjectAltName {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::SubjectAltName::OID;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let mut names = Vec::new();
        for dns in &self.dns_names {
            let name = Ia5String::new(dns)
                .map_err(|e| CertForgeError::Encoding(format!("DNS name {dns:?}: {e}")))?;
            names.push(GeneralName::DnsName(name));
        }
        for email in &self.email_addresses {
            let name = Ia5String::new(email)
                .map_err(|e| CertForgeError::Encoding(format!("email address {email:?}: {e}")))?;
            names.push(GeneralName::Rfc822Name(name));
        }
        for ip in &self.ip_addresses {
            let octets = match ip {
                IpAddr::V4(v4) => v4.octets().to_vec(),
                IpAddr::V6(v6) => v6.octets().to_vec(),
            };
            let octets = OctetString::new(octets)
                .map_err(|e| CertForgeError::Encoding(e.to_string()))?;
            names.push(GeneralName::IpAddress(octets));
        }

        let san = x509_cert::ext::pkix::SubjectAltName(names);
        san.to_der()
            .map_err(|e| CertForgeError::Encoding(e.to_string()))
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let san = x509_cert::ext::pkix::SubjectAltName::from_der(value)?;
        let mut result = SubjectAltName::default();
        for name in san.0 {
            match name {
                GeneralName::DnsName(dns) => result.dns_names.push(dns.to_string()),
                GeneralName::Rfc822Name(email) => result.email_addresses.push(email.to_string()),
                GeneralName::IpAddress(octets) => match octets.as_bytes().len() {
                    4 => {
                        let mut b = [0u8; 4];
                        b.copy_from_slice(octets.as_bytes());
                        result.ip_addresses.push(IpAddr::from(b));
                    }
                    16 => {
                        let mut b = [0u8; 16];
                        b.copy_from_slice(octets.as_bytes());
                        result.ip_addresses.push(IpAddr::from(b));
                    }
                    n => {
                        return Err(CertForgeError::Decoding(format!(
                            "IP address SAN with {n} bytes"
                        )));
                    }
                },
                // Other general-name kinds (URIs, directory names) are outside
                // the data model and are not round-tripped.
                _ => {}
            }
        }
        Ok(result)
    }
}

/// The Basic Constraints extension: CA flag and optional path length.
#[derive(Debug, Clone, Default)]
pub struct BasicConstraints {
    pub is_ca: bool,
    pub max_path_length: Option<u32>,
}

impl AsExtension for BasicConstraints {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::BasicConstraints::OID;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let bc = x509_cert::ext::pkix::BasicConstraints {
            ca: self.is_ca,
            path_len_constraint: self.max_path_length.map(|v| v as u8),
        };
        bc.to_der()
            .map_err(|e| CertForgeError::Encoding(e.to_string()))
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let bc = x509_cert::ext::pkix::BasicConstraints::from_der(value)?;
        Ok(Self {
            is_ca: bc.ca,
            max_path_length: bc.path_len_constraint.map(|v| v as u32),
        })
    }
}

/// The Key Usage extension as a set of usage flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUsage(pub FlagSet<KeyUsages>);

impl KeyUsage {
    /// Names of the asserted bits, in the order RFC 5280 defines them.
    pub fn names(&self) -> Vec<String> {
        const ALL: [(KeyUsages, &str); 9] = [
            (KeyUsages::DigitalSignature, "DigitalSignature"),
            (KeyUsages::NonRepudiation, "NonRepudiation"),
            (KeyUsages::KeyEncipherment, "KeyEncipherment"),
            (KeyUsages::DataEncipherment, "DataEncipherment"),
            (KeyUsages::KeyAgreement, "KeyAgreement"),
            (KeyUsages::KeyCertSign, "KeyCertSign"),
            (KeyUsages::CRLSign, "CRLSign"),
            (KeyUsages::EncipherOnly, "EncipherOnly"),
            (KeyUsages::DecipherOnly, "DecipherOnly"),
        ];
        ALL.iter()
            .filter(|(flag, _)| self.0.contains(*flag))
            .map(|(_, name)| (*name).to_string())
            .collect()
    }
}

impl AsExtension for KeyUsage {
    const OID: ObjectIdentifier = <x509_cert::ext::pkix::KeyUsage as AssociatedOid>::OID;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let ku = x509_cert::ext::pkix::KeyUsage(self.0);
        ku.to_der()
            .map_err(|e| CertForgeError::Encoding(e.to_string()))
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let ku = x509_cert::ext::pkix::KeyUsage::from_der(value)?;
        Ok(Self(ku.0))
    }
}

/// The Extended Key Usage extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedKeyUsage {
    pub usage: Vec<ExtendedKeyUsageOption>,
}

impl AsExtension for ExtendedKeyUsage {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::ExtendedKeyUsage::OID;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let oids: Vec<ObjectIdentifier> = self.usage.iter().map(|v| (*v).into()).collect();
        let eku = x509_cert::ext::pkix::ExtendedKeyUsage(oids);
        eku.to_der()
            .map_err(|e| CertForgeError::Encoding(e.to_string()))
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let eku = x509_cert::ext::pkix::ExtendedKeyUsage::from_der(value)?;
        // Purposes outside the known set are dropped rather than rejected;
        // the read path has to cope with certificates this crate never issued.
        let usage = eku
            .0
            .iter()
            .filter_map(|oid| ExtendedKeyUsageOption::from_oid(*oid))
            .collect();
        Ok(Self { usage })
    }
}

/// One purpose inside the Extended Key Usage extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedKeyUsageOption {
    ServerAuth,
    ClientAuth,
    CodeSigning,
    EmailProtection,
    TimeStamping,
    OcspSigning,
}

impl ExtendedKeyUsageOption {
    pub fn from_oid(oid: ObjectIdentifier) -> Option<Self> {
        match oid {
            const_oid::db::rfc5912::ID_KP_SERVER_AUTH => Some(Self::ServerAuth),
            const_oid::db::rfc5912::ID_KP_CLIENT_AUTH => Some(Self::ClientAuth),
            const_oid::db::rfc5912::ID_KP_CODE_SIGNING => Some(Self::CodeSigning),
            const_oid::db::rfc5912::ID_KP_EMAIL_PROTECTION => Some(Self::EmailProtection),
            const_oid::db::rfc5912::ID_KP_TIME_STAMPING => Some(Self::TimeStamping),
            const_oid::db::rfc5912::ID_KP_OCSP_SIGNING => Some(Self::OcspSigning),
            _ => None,
        }
    }
}

impl From<ExtendedKeyUsageOption> for ObjectIdentifier {
    fn from(value: ExtendedKeyUsageOption) -> Self {
        match value {
            ExtendedKeyUsageOption::ServerAuth => const_oid::db::rfc5912::ID_KP_SERVER_AUTH,
            ExtendedKeyUsageOption::ClientAuth => const_oid::db::rfc5912::ID_KP_CLIENT_AUTH,
            ExtendedKeyUsageOption::CodeSigning => const_oid::db::rfc5912::ID_KP_CODE_SIGNING,
            ExtendedKeyUsageOption::EmailProtection => {
                const_oid::db::rfc5912::ID_KP_EMAIL_PROTECTION
            }
            ExtendedKeyUsageOption::TimeStamping => const_oid::db::rfc5912::ID_KP_TIME_STAMPING,
            ExtendedKeyUsageOption::OcspSigning => const_oid::db::rfc5912::ID_KP_OCSP_SIGNING,
        }
    }
}

impl std::fmt::Display for ExtendedKeyUsageOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExtendedKeyUsageOption::ServerAuth => "ServerAuth",
            ExtendedKeyUsageOption::ClientAuth => "ClientAuth",
            ExtendedKeyUsageOption::CodeSigning => "CodeSigning",
            ExtendedKeyUsageOption::EmailProtection => "EmailProtection",
            ExtendedKeyUsageOption::TimeStamping => "TimeStamping",
            ExtendedKeyUsageOption::OcspSigning => "OcspSigning",
        };
        f.write_str(name)
    }
}

/// The Subject Key Identifier extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectKeyIdentifier {
    pub key_id: Vec<u8>,
}

impl AsExtension for SubjectKeyIdentifier {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::SubjectKeyIdentifier::OID;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let ski = x509_cert::ext::pkix::SubjectKeyIdentifier(
            OctetString::new(self.key_id.as_slice())
                .map_err(|e| CertForgeError::Encoding(e.to_string()))?,
        );
        ski.to_der()
            .map_err(|e| CertForgeError::Encoding(e.to_string()))
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let ski = x509_cert::ext::pkix::SubjectKeyIdentifier::from_der(value)?;
        Ok(Self {
            key_id: ski.0.as_bytes().to_vec(),
        })
    }
}

/// The Authority Key Identifier extension, key-identifier form only: issued
/// certificates never embed the issuer's name or serial here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityKeyIdentifier {
    pub key_identifier: Vec<u8>,
}

impl AsExtension for AuthorityKeyIdentifier {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::AuthorityKeyIdentifier::OID;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let aki = x509_cert::ext::pkix::AuthorityKeyIdentifier {
            key_identifier: Some(
                OctetString::new(self.key_identifier.as_slice())
                    .map_err(|e| CertForgeError::Encoding(e.to_string()))?,
            ),
            authority_cert_issuer: None,
            authority_cert_serial_number: None,
        };
        aki.to_der()
            .map_err(|e| CertForgeError::Encoding(e.to_string()))
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let aki = x509_cert::ext::pkix::AuthorityKeyIdentifier::from_der(value)?;
        Ok(Self {
            key_identifier: aki
                .key_identifier
                .map(|id| id.as_bytes().to_vec())
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_alt_name_encoding_decoding() {
        let original = SubjectAltName {
            dns_names: vec!["example.com".to_string(), "www.example.com".to_string()],
            email_addresses: vec!["admin@example.com".to_string()],
            ip_addresses: vec!["192.0.2.7".parse().unwrap(), "2001:db8::1".parse().unwrap()],
        };
        let encoded = original.to_extension_value().unwrap();
        let decoded = SubjectAltName::from_extension_value(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_key_usage_encoding_decoding() {
        let original = KeyUsage(KeyUsages::DigitalSignature | KeyUsages::CRLSign);
        let encoded = original.to_extension_value().unwrap();
        let decoded = KeyUsage::from_extension_value(&encoded).unwrap();
        assert_eq!(original, decoded);
        assert_eq!(original.names(), vec!["DigitalSignature", "CRLSign"]);
    }

    #[test]
    fn test_extended_key_usage_encoding_decoding() {
        let original = ExtendedKeyUsage {
            usage: vec![
                ExtendedKeyUsageOption::ServerAuth,
                ExtendedKeyUsageOption::ClientAuth,
            ],
        };
        let encoded = original.to_extension_value().unwrap();
        let decoded = ExtendedKeyUsage::from_extension_value(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_basic_constraints_encoding_decoding() {
        let original = BasicConstraints {
            is_ca: true,
            max_path_length: Some(3),
        };
        let encoded = original.to_extension_value().unwrap();
        let decoded = BasicConstraints::from_extension_value(&encoded).unwrap();
        assert_eq!(original.is_ca, decoded.is_ca);
        assert_eq!(original.max_path_length, decoded.max_path_length);
    }

    #[test]
    fn test_key_identifier_extensions_round_trip() {
        let ski = SubjectKeyIdentifier {
            key_id: vec![1, 2, 3, 4, 5],
        };
        let decoded =
            SubjectKeyIdentifier::from_extension_value(&ski.to_extension_value().unwrap()).unwrap();
        assert_eq!(ski, decoded);

        let aki = AuthorityKeyIdentifier {
            key_identifier: vec![1, 2, 3, 4, 5],
        };
        let decoded =
            AuthorityKeyIdentifier::from_extension_value(&aki.to_extension_value().unwrap())
                .unwrap();
        assert_eq!(aki, decoded);
    }

    #[test]
    fn test_extension_entry_carries_criticality() {
        let bc = BasicConstraints {
            is_ca: false,
            max_path_length: None,
        };
        let ext = bc.to_extension(true).unwrap();
        assert_eq!(ext.extn_id, BasicConstraints::OID);
        assert!(ext.critical);
    }
}
