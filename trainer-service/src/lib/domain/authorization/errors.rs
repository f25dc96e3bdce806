use credentials::UserNameError;
use thiserror::Error;

/// Error for the active-account stage of authorization.
///
/// Display strings for the two account states are the exact bodies the
/// authorization gate returns; the database variant is replaced with a
/// generic message at the boundary.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// The nickname claim does not parse as a user name; a validated token
    /// cannot normally carry one, so this points at a corrupted token.
    #[error("Invalid user name: {0}")]
    InvalidUserName(#[from] UserNameError),

    #[error("Unauthorized: Current user is no active manager")]
    NoActiveManager,

    #[error("Unauthorized: Cannot verify credentials")]
    CannotVerifyCredentials,

    #[error("Directory lookup failed: {0}")]
    Directory(String),
}
