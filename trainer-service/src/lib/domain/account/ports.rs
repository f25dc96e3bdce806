use async_trait::async_trait;

use credentials::UserName;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountStatus;
use crate::domain::account::models::LoggedInUser;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::RegisteredUser;

/// Port for account use-cases.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new trainer account.
    ///
    /// Generates a fresh salt, hashes the password under salt + pepper and
    /// persists the account.
    ///
    /// # Errors
    /// * `UserNameAlreadyExists` - Name is already taken
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Persistence failed
    async fn register(&self, command: RegisterCommand) -> Result<RegisteredUser, AccountError>;

    /// Verify credentials and issue a token.
    ///
    /// # Errors
    /// * `CredentialsInvalid` - Unknown user name or wrong password
    /// * `NotActive` - Credentials verified but the account is deactivated
    /// * `Token` - Token issuing failed
    /// * `DatabaseError` - Lookup failed
    async fn login(&self, command: LoginCommand) -> Result<LoggedInUser, AccountError>;

    /// Look up an account's status (manager operation).
    ///
    /// # Errors
    /// * `NotFound` - No account with this name
    /// * `DatabaseError` - Lookup failed
    async fn get_account(&self, user_name: &UserName) -> Result<AccountStatus, AccountError>;
}

/// Port for account persistence.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `UserNameAlreadyExists` - Unique constraint violated
    /// * `DatabaseError` - Insert failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account by user name.
    ///
    /// # Errors
    /// * `DatabaseError` - Query failed
    async fn find_by_user_name(
        &self,
        user_name: &UserName,
    ) -> Result<Option<Account>, AccountError>;
}
