use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CertForgeError>;

/// Represents errors that can occur while issuing or inspecting certificates.
///
/// Each variant corresponds to one failure class, so callers can react per
/// cause: reject malformed input, retry an entropy failure, surface a key
/// mismatch to the operator.
#[derive(Debug, Error, Clone)]
pub enum CertForgeError {
    /// No PEM block was found, or the block carried the wrong label.
    #[error("Invalid PEM input: {0}")]
    Pem(String),

    /// A PEM block's content failed to parse as the expected DER structure.
    #[error("Failed to decode data: {0}")]
    Decoding(String),

    /// A structure could not be serialized to DER, PEM, or JSON.
    #[error("Failed to encode data: {0}")]
    Encoding(String),

    /// The secure randomness source was unavailable or exhausted.
    #[error("Randomness source failure: {0}")]
    Entropy(String),

    /// A key algorithm outside the supported set (RSA, ECDSA P-256/P-384/P-521,
    /// Ed25519).
    #[error("Unsupported key algorithm: {0}")]
    UnsupportedKeyAlgorithm(String),

    /// The signing key's public half does not match the certificate it is
    /// supposed to sign for.
    #[error("Issuer key mismatch: {0}")]
    IssuerKeyMismatch(String),

    /// The underlying signature primitive failed.
    #[error("Signing failed: {0}")]
    Signing(String),
}

impl From<der::Error> for CertForgeError {
    fn from(err: der::Error) -> Self {
        CertForgeError::Decoding(err.to_string())
    }
}

impl From<pem::PemError> for CertForgeError {
    fn from(err: pem::PemError) -> Self {
        CertForgeError::Pem(err.to_string())
    }
}

impl From<rsa::Error> for CertForgeError {
    fn from(err: rsa::Error) -> Self {
        CertForgeError::Signing(err.to_string())
    }
}
