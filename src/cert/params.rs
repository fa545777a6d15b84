use bon::Builder;
use time::OffsetDateTime;
use x509_cert::name::{Name, RdnSequence};

use crate::error::{CertForgeError, Result};

/// Distinguished name parameters for naming the subject of a certification
/// request.
///
/// Only the populated attributes are rendered; decoded names coming out of
/// CSRs and certificates stay in their `x509_cert::name::Name` form and are
/// never squeezed back through this struct.
#[derive(Clone, Debug, Builder, Default)]
pub struct DistinguishedName {
    pub common_name: String,
    pub country: Option<String>,
    pub state: Option<String>,
    pub locality: Option<String>,
    pub organization: Option<String>,
    pub organization_unit: Option<String>,
}

impl DistinguishedName {
    /// Renders the populated attributes as an RFC 4514 string and parses it
    /// into an X.509 name.
    pub fn to_x509_name(&self) -> Result<Name> {
        use core::str::FromStr;

        let mut parts = vec![format!("CN={}", self.common_name)];
        if let Some(ou) = &self.organization_unit {
            parts.push(format!("OU={ou}"));
        }
        if let Some(o) = &self.organization {
            parts.push(format!("O={o}"));
        }
        if let Some(l) = &self.locality {
            parts.push(format!("L={l}"));
        }
        if let Some(st) = &self.state {
            parts.push(format!("ST={st}"));
        }
        if let Some(c) = &self.country {
            parts.push(format!("C={c}"));
        }

        RdnSequence::from_str(&parts.join(","))
            .map_err(|e| CertForgeError::Encoding(format!("distinguished name: {e}")))
    }
}

/// Certificate validity period, the `notBefore`/`notAfter` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validity {
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_populated_attributes_are_rendered() {
        let dn = DistinguishedName::builder()
            .common_name("test.example.com".to_string())
            .organization("Example Corp".to_string())
            .build();
        let name = dn.to_x509_name().unwrap();
        assert_eq!(name.to_string(), "CN=test.example.com,O=Example Corp");
    }

    #[test]
    fn test_common_name_alone_round_trips() {
        let dn = DistinguishedName::builder()
            .common_name("Test CA".to_string())
            .build();
        assert_eq!(dn.to_x509_name().unwrap().to_string(), "CN=Test CA");
    }
}
