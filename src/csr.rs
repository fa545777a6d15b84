//! PKCS#10 certification requests: decoding the requests the issuance
//! workflow consumes, and building signed requests for callers that need one.

use bon::Builder;
use const_oid::AssociatedOid;
use der::asn1::BitString;
use der::{Decode, Encode};
use x509_cert::attr::{Attribute, Attributes};
use x509_cert::name::Name;
use x509_cert::request::{CertReq, CertReqInfo, ExtensionReq, Version};
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::cert::extensions::{AsExtension, SubjectAltName};
use crate::cert::params::DistinguishedName;
use crate::error::{CertForgeError, Result};
use crate::key::{KeyAlgorithm, SigningKey};
use crate::{pem_utils, pki};

/// A decoded certification request: the fields issuance copies into the
/// certificate. Supplied by the caller, consumed once.
#[derive(Debug, Clone)]
pub struct CertificateSigningRequest {
    pub subject: Name,
    pub public_key: SubjectPublicKeyInfoOwned,
    pub san: SubjectAltName,
}

impl CertificateSigningRequest {
    /// Decodes a PEM-wrapped request (`CERTIFICATE REQUEST` block).
    pub fn from_pem(pem: &str) -> Result<Self> {
        let der = pem_utils::pem_to_der(pem, pem_utils::CERTIFICATE_REQUEST_LABEL)?;
        Self::from_der(&der)
    }

    /// Decodes a DER-encoded PKCS#10 request, pulling subject alternative
    /// names out of the `extensionRequest` attribute when present.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let req = CertReq::from_der(der)
            .map_err(|e| CertForgeError::Decoding(format!("PKCS#10 request: {e}")))?;

        let mut san = SubjectAltName::default();
        for attr in req.info.attributes.iter() {
            if attr.oid != ExtensionReq::OID {
                continue;
            }
            for value in attr.values.iter() {
                let requested: ExtensionReq = value.decode_as().map_err(|e| {
                    CertForgeError::Decoding(format!("extensionRequest attribute: {e}"))
                })?;
                for ext in requested.0 {
                    if ext.extn_id == SubjectAltName::OID {
                        san = SubjectAltName::from_extension_value(ext.extn_value.as_bytes())?;
                    }
                }
            }
        }

        Ok(Self {
            subject: req.info.subject,
            public_key: req.info.public_key,
            san,
        })
    }

    /// Classifies the request's public key, failing for algorithms the
    /// issuance workflow cannot handle.
    pub fn key_algorithm(&self) -> Result<KeyAlgorithm> {
        KeyAlgorithm::from_spki(&self.public_key)
    }
}

/// Parameters for building a certification request.
#[derive(Debug, Clone, Builder)]
pub struct CsrParams {
    pub subject: DistinguishedName,
    #[builder(default)]
    pub san: SubjectAltName,
}

impl CsrParams {
    /// Builds a PKCS#10 request for the key's public half, signs it with the
    /// same key, and returns it PEM-encoded.
    pub fn build_and_sign(&self, key: &SigningKey) -> Result<String> {
        let subject = self.subject.to_x509_name()?;
        let public_key = key.public_key_info()?;

        let mut attributes = Attributes::new();
        if !self.san.is_empty() {
            let requested = ExtensionReq(vec![self.san.to_extension(false)?]);
            let attribute = Attribute::try_from(requested)
                .map_err(|e| CertForgeError::Encoding(format!("extensionRequest: {e}")))?;
            attributes
                .insert(attribute)
                .map_err(|e| CertForgeError::Encoding(format!("request attributes: {e}")))?;
        }

        let info = CertReqInfo {
            version: Version::V1,
            subject,
            public_key,
            attributes,
        };

        let message = info
            .to_der()
            .map_err(|e| CertForgeError::Encoding(e.to_string()))?;
        let signature = pki::sign_data(key, &message)?;

        let req = CertReq {
            info,
            algorithm: key.signature_algorithm().into(),
            signature: BitString::from_bytes(&signature)
                .map_err(|e| CertForgeError::Encoding(e.to_string()))?,
        };

        let der = req
            .to_der()
            .map_err(|e| CertForgeError::Encoding(e.to_string()))?;
        Ok(pem_utils::der_to_pem(
            &der,
            pem_utils::CERTIFICATE_REQUEST_LABEL,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkcs8::EncodePrivateKey;
    use rand_core::OsRng;

    fn test_key() -> SigningKey {
        let key = p256::ecdsa::SigningKey::random(&mut OsRng);
        SigningKey::from_pkcs8_der(key.to_pkcs8_der().unwrap().as_bytes()).unwrap()
    }

    #[test]
    fn test_built_request_round_trips() {
        let key = test_key();
        let san = SubjectAltName {
            dns_names: vec!["test.example.com".to_string()],
            email_addresses: vec!["ops@example.com".to_string()],
            ip_addresses: vec!["192.0.2.1".parse().unwrap()],
        };
        let subject = DistinguishedName::builder()
            .common_name("test.example.com".to_string())
            .build();
        let pem = CsrParams::builder()
            .subject(subject)
            .san(san.clone())
            .build()
            .build_and_sign(&key)
            .unwrap();

        let decoded = CertificateSigningRequest::from_pem(&pem).unwrap();
        assert_eq!(decoded.subject.to_string(), "CN=test.example.com");
        assert_eq!(decoded.san, san);
        assert_eq!(decoded.key_algorithm().unwrap(), KeyAlgorithm::EcdsaP256);
    }

    #[test]
    fn test_request_without_san_has_empty_san() {
        let key = test_key();
        let subject = DistinguishedName::builder()
            .common_name("plain.example.com".to_string())
            .build();
        let pem = CsrParams::builder()
            .subject(subject)
            .build()
            .build_and_sign(&key)
            .unwrap();
        let decoded = CertificateSigningRequest::from_pem(&pem).unwrap();
        assert!(decoded.san.is_empty());
    }

    #[test]
    fn test_garbage_request_is_rejected() {
        let pem = pem_utils::der_to_pem(b"junk", pem_utils::CERTIFICATE_REQUEST_LABEL);
        let err = CertificateSigningRequest::from_pem(&pem).unwrap_err();
        assert!(matches!(err, CertForgeError::Decoding(_)));
    }
}
