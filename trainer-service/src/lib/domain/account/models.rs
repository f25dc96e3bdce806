use chrono::DateTime;
use chrono::Utc;

use credentials::InputPassword;
use credentials::JsonWebToken;
use credentials::PasswordHash;
use credentials::Role;
use credentials::Salt;
use credentials::UserName;

/// Account aggregate entity.
///
/// One record per registered trainer or manager. The salt is generated once
/// at registration and never rotated; the hash is the Argon2 digest of the
/// password under that salt plus the process pepper.
#[derive(Debug, Clone)]
pub struct Account {
    pub user_name: UserName,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: PasswordHash,
    pub salt: Salt,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Command to register a new account with validated credentials
#[derive(Debug)]
pub struct RegisterCommand {
    pub user_name: UserName,
    pub first_name: String,
    pub last_name: String,
    pub password: InputPassword,
}

impl RegisterCommand {
    pub fn new(
        user_name: UserName,
        first_name: String,
        last_name: String,
        password: InputPassword,
    ) -> Self {
        Self {
            user_name,
            first_name,
            last_name,
            password,
        }
    }
}

/// Command to log an existing account in
#[derive(Debug)]
pub struct LoginCommand {
    pub user_name: UserName,
    pub password: InputPassword,
}

impl LoginCommand {
    pub fn new(user_name: UserName, password: InputPassword) -> Self {
        Self {
            user_name,
            password,
        }
    }
}

/// Identity of an account whose credentials were just verified.
#[derive(Debug, Clone)]
pub struct ValidatedUser {
    pub user_name: UserName,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl ValidatedUser {
    pub fn from_account(account: &Account) -> Self {
        Self {
            user_name: account.user_name.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            role: account.role,
        }
    }
}

/// Read model returned by the registration use-case.
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    pub user_name: UserName,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Read model returned by the login use-case: the verified identity plus a
/// freshly issued token.
#[derive(Debug, Clone)]
pub struct LoggedInUser {
    pub user: ValidatedUser,
    pub token: JsonWebToken,
}

/// Read model for the manager-facing account lookup; carries no secrets.
#[derive(Debug, Clone)]
pub struct AccountStatus {
    pub user_name: UserName,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub active: bool,
}

impl AccountStatus {
    pub fn from_account(account: &Account) -> Self {
        Self {
            user_name: account.user_name.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            role: account.role,
            active: account.active,
        }
    }
}
