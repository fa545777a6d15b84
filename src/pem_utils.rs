use crate::error::{CertForgeError, Result};

/// PEM label for X.509 certificates.
pub const CERTIFICATE_LABEL: &str = "CERTIFICATE";
/// PEM label for PKCS#10 certification requests.
pub const CERTIFICATE_REQUEST_LABEL: &str = "CERTIFICATE REQUEST";
/// PEM label for PKCS#8 private keys.
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
pub fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(&pem, pem::EncodeConfig::new())
}

/// Convert a PEM‑encoded string to DER‑encoded bytes, requiring the block to
/// carry the expected label. Fails if no block is present or the label differs.
pub fn pem_to_der(pem_str: &str, expected_label: &str) -> Result<Vec<u8>> {
    let pem = pem::parse(pem_str)?;
    if pem.tag() != expected_label {
        return Err(CertForgeError::Pem(format!(
            "expected a {expected_label} block, found {}",
            pem.tag()
        )));
    }
    Ok(pem.contents().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_contents() {
        let der = vec![0x30, 0x03, 0x02, 0x01, 0x01];
        let pem = der_to_pem(&der, CERTIFICATE_LABEL);
        assert!(pem.starts_with("-----BEGIN CERTIFICATE-----"));
        let back = pem_to_der(&pem, CERTIFICATE_LABEL).unwrap();
        assert_eq!(der, back);
    }

    #[test]
    fn test_missing_block_is_rejected() {
        let err = pem_to_der("no pem here", CERTIFICATE_LABEL).unwrap_err();
        assert!(matches!(err, CertForgeError::Pem(_)));
    }

    #[test]
    fn test_wrong_label_is_rejected() {
        let pem = der_to_pem(&[0u8; 4], PRIVATE_KEY_LABEL);
        let err = pem_to_der(&pem, CERTIFICATE_LABEL).unwrap_err();
        assert!(matches!(err, CertForgeError::Pem(_)));
    }
}
