use thiserror::Error;

/// Error type for password hashing and verification.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    /// Recomputed hash does not match the stored one. Also reported by the
    /// login use-case for unknown accounts so callers cannot probe which
    /// user names exist.
    #[error("Invalid credentials")]
    CredentialsInvalid,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
