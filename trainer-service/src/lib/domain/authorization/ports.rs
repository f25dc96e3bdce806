use async_trait::async_trait;

use credentials::UserName;

use crate::domain::authorization::errors::AccessError;

/// The two predicate calls authorization needs from account storage.
///
/// Each is invoked at most once per authorization attempt; a failure
/// surfaces immediately as an authorization error, with no retry.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Succeeds iff a registered account with this name exists.
    ///
    /// # Errors
    /// * `CannotVerifyCredentials` - No such account
    /// * `Directory` - Lookup failed
    async fn exists(&self, user_name: &UserName) -> Result<(), AccessError>;

    /// Succeeds iff an account with this name exists, is active and holds
    /// the manager role.
    ///
    /// # Errors
    /// * `NoActiveManager` - Account missing, deactivated or not a manager
    /// * `Directory` - Lookup failed
    async fn exists_and_is_active_manager(&self, user_name: &UserName)
        -> Result<(), AccessError>;
}
