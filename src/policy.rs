//! The fixed issuance policy.
//!
//! Every certificate this crate issues gets the same validity length and the
//! same usage sets; callers cannot override them. Keeping the values here as
//! named items (rather than literals at the use sites) keeps the fixed-policy
//! contract auditable in one place.

use der::flagset::FlagSet;
use time::{Duration, OffsetDateTime};
use x509_cert::ext::pkix::KeyUsages;

use crate::cert::extensions::ExtendedKeyUsageOption;
use crate::cert::params::Validity;

/// Issued certificates are valid for exactly one calendar year.
pub const VALIDITY_YEARS: i32 = 1;

/// Serial numbers are drawn uniformly from [0, 2^128).
pub const SERIAL_NUMBER_BYTES: usize = 16;

/// Key usage bits asserted on every issued certificate.
pub fn key_usage() -> FlagSet<KeyUsages> {
    KeyUsages::DigitalSignature | KeyUsages::CRLSign
}

/// Extended key usages asserted on every issued certificate.
pub fn extended_key_usage() -> Vec<ExtendedKeyUsageOption> {
    vec![
        ExtendedKeyUsageOption::ServerAuth,
        ExtendedKeyUsageOption::ClientAuth,
    ]
}

/// The validity window for a certificate issued at `now`.
pub fn issuance_validity(now: OffsetDateTime) -> Validity {
    Validity {
        not_before: now,
        not_after: one_year_after(now),
    }
}

/// Same calendar date, one year later. Feb 29 has no anniversary in a common
/// year; that window ends on Mar 1 instead.
pub fn one_year_after(t: OffsetDateTime) -> OffsetDateTime {
    t.replace_year(t.year() + VALIDITY_YEARS)
        .unwrap_or_else(|_| t + Duration::days(366))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_one_year_after_keeps_the_calendar_date() {
        assert_eq!(
            one_year_after(datetime!(2026-08-06 09:30:00 UTC)),
            datetime!(2027-08-06 09:30:00 UTC)
        );
    }

    #[test]
    fn test_leap_day_rolls_over_to_march_first() {
        assert_eq!(
            one_year_after(datetime!(2024-02-29 12:00:00 UTC)),
            datetime!(2025-03-01 12:00:00 UTC)
        );
    }

    #[test]
    fn test_key_usage_is_exactly_digital_signature_and_crl_sign() {
        let flags = key_usage();
        assert!(flags.contains(KeyUsages::DigitalSignature));
        assert!(flags.contains(KeyUsages::CRLSign));
        assert_eq!(flags, KeyUsages::DigitalSignature | KeyUsages::CRLSign);
    }
}
