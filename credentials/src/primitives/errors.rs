use thiserror::Error;

/// Error for UserName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserNameError {
    #[error("User name too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("User name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("User name contains forbidden characters (quote and ampersand are not allowed)")]
    ForbiddenCharacters,
}

/// Error for InputPassword validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputPasswordError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password contains forbidden characters (quote and ampersand are not allowed)")]
    ForbiddenCharacters,
}

/// Error for Salt validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SaltError {
    #[error("Salt too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Salt is not valid base64: {0}")]
    Malformed(String),
}

/// Error for Pepper validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PepperError {
    #[error("Pepper too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Error for PasswordHash parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordHashError {
    #[error("Password hash is not in PHC string format: {0}")]
    Malformed(String),
}

/// Error for scope claim parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScopeError {
    #[error("Unknown scope: {0}")]
    Unknown(String),
}
