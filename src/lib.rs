//! # CertForge - Certificate Issuance and Inspection
//!
//! CertForge issues X.509 certificates from PKCS#10 certificate signing
//! requests and parses existing certificates into structured, JSON-ready
//! descriptions. It is built entirely on rustcrypto libraries, with no
//! dependencies on ring or openssl.
//!
//! The crate is a stateless pair of operations meant to be called from a
//! long-lived host process: every call decodes its inputs, runs to
//! completion, and returns. Nothing persists between calls.
//!
//! ## Issuance policy
//!
//! The issuance policy is fixed and not caller-configurable:
//! - validity of exactly one calendar year, starting at issuance time
//! - key usage `DigitalSignature` + `CRLSign`
//! - extended key usage `ServerAuth` + `ClientAuth`
//! - a random 128-bit serial number per certificate
//! - a SHA-1 subject key identifier derived from the subject's public key
//!
//! Self-signed certificates additionally get `IsCA = true` and an authority
//! key identifier equal to their subject key identifier. Chained
//! certificates take their issuer name from the supplied issuer certificate
//! and keep `IsCA = false`.
//!
//! ## Supported Key Types
//!
//! - **RSA** (PKCS#1 v1.5 signatures with SHA-256)
//! - **ECDSA**: P-256, P-384, and P-521 curves
//! - **Ed25519**
//!
//! ## Quick Start
//!
//! ### Issuing a Self-Signed Certificate
//!
//! ```rust,no_run
//! use certforge::{
//!     api,
//!     cert::params::DistinguishedName,
//!     csr::CsrParams,
//!     key::SigningKey,
//! };
//! use pkcs8::{EncodePrivateKey, LineEnding};
//!
//! # fn main() -> Result<(), certforge::error::CertForgeError> {
//! // Keys are caller-supplied as PKCS#8 PEM; generate one for the example.
//! let key_pem = p256::ecdsa::SigningKey::random(&mut rand_core::OsRng)
//!     .to_pkcs8_pem(LineEnding::LF)
//!     .expect("PKCS#8 encoding");
//!
//! let subject = DistinguishedName::builder()
//!     .common_name("example.com".to_string())
//!     .organization("Example Corp".to_string())
//!     .build();
//!
//! let csr_pem = CsrParams::builder()
//!     .subject(subject)
//!     .build()
//!     .build_and_sign(&SigningKey::from_pkcs8_pem(&key_pem)?)?;
//!
//! // The issuer certificate argument is ignored when self-signing.
//! let cert_pem = api::sign_certificate(&csr_pem, &key_pem, "", true)?;
//! println!("{cert_pem}");
//! # Ok(())
//! # }
//! ```
//!
//! ### Chaining to an Issuer Certificate
//!
//! ```rust,no_run
//! use certforge::api;
//! # fn issue(csr_pem: &str, ca_key_pem: &str, ca_cert_pem: &str)
//! #     -> Result<(), certforge::error::CertForgeError> {
//! let cert_pem = api::sign_certificate(csr_pem, ca_key_pem, ca_cert_pem, false)?;
//! let json = api::parse_certificate(&cert_pem)?;
//! println!("{json}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure comes back as a [`error::CertForgeError`] variant naming its
//! cause, so callers can distinguish malformed input from entropy or signing
//! failures:
//!
//! ```rust
//! use certforge::{error::CertForgeError, key::SigningKey};
//!
//! match SigningKey::from_pkcs8_pem("not a pem key") {
//!     Ok(_) => println!("Key imported"),
//!     Err(CertForgeError::Pem(msg)) => println!("No usable PEM block: {msg}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`api`]: the two boundary operations, `sign_certificate` and
//!   `parse_certificate`
//! - [`csr`]: PKCS#10 decoding and creation
//! - [`key`]: PKCS#8 private key decoding and classification
//! - [`ids`]: serial number and subject key identifier derivation
//! - [`policy`]: the fixed issuance policy, in one auditable place
//! - [`tbs_certificate`]: the unsigned certificate template
//! - [`issuer`]: the self-signed and chained signing paths
//! - [`cert`]: certificate wrapper, extensions, and name parameters
//! - [`describe`]: the JSON-facing certificate description
//! - [`pki`]: the signing/verification capability over the crypto backends
//! - [`error`]: error types and handling

pub mod api;
pub mod cert;
pub mod csr;
pub mod describe;
pub mod error;
pub mod ids;
pub mod issuer;
pub mod key;
pub mod pem_utils;
pub mod pki;
pub mod policy;
pub mod tbs_certificate;
