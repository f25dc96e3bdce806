use thiserror::Error;

/// Error type for token issuing and validation.
///
/// Display strings are the messages surfaced to clients by the
/// authentication gate; they name the cause without leaking key material.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Expired token")]
    Expired,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Audience or subject mismatch")]
    AudienceOrSubjectMismatch,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Signing key too short: minimum {min} bytes, got {actual}")]
    KeyTooShort { min: usize, actual: usize },
}
