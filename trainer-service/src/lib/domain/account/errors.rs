use credentials::InputPasswordError;
use credentials::JwtError;
use credentials::PasswordError;
use credentials::PasswordHashError;
use credentials::SaltError;
use credentials::UserNameError;
use thiserror::Error;

/// Top-level error for registration, login and account lookup.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user name: {0}")]
    InvalidUserName(#[from] UserNameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] InputPasswordError),

    // Corrupted stored credentials surface as infrastructure faults, not
    // client errors
    #[error("Stored salt is unusable: {0}")]
    InvalidStoredSalt(#[from] SaltError),

    #[error("Stored hash is unusable: {0}")]
    InvalidStoredHash(#[from] PasswordHashError),

    // Domain-level errors
    /// Wrong password and unknown user collapse into this one error so the
    /// login endpoint cannot be used to enumerate accounts.
    #[error("Invalid credentials")]
    CredentialsInvalid,

    #[error("Forbidden: user is not active")]
    NotActive,

    #[error("User name already exists: {0}")]
    UserNameAlreadyExists(String),

    #[error("Account not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<PasswordError> for AccountError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::CredentialsInvalid => AccountError::CredentialsInvalid,
            other => AccountError::Password(other),
        }
    }
}
