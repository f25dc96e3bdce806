use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use credentials::JwtManager;
use credentials::PasswordHasher;
use credentials::PasswordVector;
use credentials::Pepper;
use credentials::Role;
use credentials::Salt;
use credentials::TokenIdentity;
use credentials::UserName;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountStatus;
use crate::domain::account::models::LoggedInUser;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::RegisteredUser;
use crate::domain::account::models::ValidatedUser;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Domain service for registration, login and account lookup.
///
/// Holds the process-wide pepper and the token issuer; the per-user salt is
/// generated here at registration and read back from the repository at
/// every login.
pub struct AccountService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    password_hasher: PasswordHasher,
    pepper: Pepper,
    jwt_manager: Arc<JwtManager>,
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    pub fn new(repository: Arc<R>, pepper: Pepper, jwt_manager: Arc<JwtManager>) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
            pepper,
            jwt_manager,
        }
    }
}

#[async_trait]
impl<R> AccountServicePort for AccountService<R>
where
    R: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<RegisteredUser, AccountError> {
        let salt = Salt::generate();
        let vector = PasswordVector::new(salt.clone(), self.pepper.clone());
        let password_hash = self.password_hasher.hash(&command.password, &vector)?;

        let account = Account {
            user_name: command.user_name,
            first_name: command.first_name,
            last_name: command.last_name,
            password_hash,
            salt,
            role: Role::User,
            active: true,
            created_at: Utc::now(),
        };

        let created = self.repository.create(account).await?;

        Ok(RegisteredUser {
            user_name: created.user_name,
            first_name: created.first_name,
            last_name: created.last_name,
            role: created.role,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<LoggedInUser, AccountError> {
        // Unknown user and wrong password must be indistinguishable
        let account = self
            .repository
            .find_by_user_name(&command.user_name)
            .await?
            .ok_or(AccountError::CredentialsInvalid)?;

        let vector = PasswordVector::new(account.salt.clone(), self.pepper.clone());
        self.password_hasher
            .verify(&command.password, &vector, &account.password_hash)?;

        if !account.active {
            return Err(AccountError::NotActive);
        }

        let user = ValidatedUser::from_account(&account);
        let token = self.jwt_manager.issue(&TokenIdentity {
            user_name: user.user_name.as_str().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
        })?;

        Ok(LoggedInUser { user, token })
    }

    async fn get_account(&self, user_name: &UserName) -> Result<AccountStatus, AccountError> {
        self.repository
            .find_by_user_name(user_name)
            .await?
            .map(|account| AccountStatus::from_account(&account))
            .ok_or_else(|| AccountError::NotFound(user_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use credentials::FixedClock;
    use credentials::InputPassword;
    use credentials::JwtSettings;
    use mockall::mock;
    use mockall::predicate::eq;

    use super::*;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_user_name(
                &self,
                user_name: &UserName,
            ) -> Result<Option<Account>, AccountError>;
        }
    }

    const PEPPER: &str = "test-pepper-that-is-at-least-32-characters";

    fn pepper() -> Pepper {
        Pepper::new(PEPPER).unwrap()
    }

    fn jwt_manager() -> Arc<JwtManager> {
        let clock = FixedClock::at(chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        Arc::new(
            JwtManager::new(
                JwtSettings {
                    secret: "test-signing-key-of-at-least-32-bytes!".to_string(),
                    subject: "vocab-trainer".to_string(),
                    audience: "vocab-trainer-spa".to_string(),
                    lifetime_seconds: 7200,
                },
                Arc::new(clock),
            )
            .unwrap(),
        )
    }

    fn stored_account(password: &str, active: bool) -> Account {
        let salt = Salt::generate();
        let vector = PasswordVector::new(salt.clone(), pepper());
        let password_hash = PasswordHasher::new()
            .hash(&InputPassword::new(password).unwrap(), &vector)
            .unwrap();
        Account {
            user_name: UserName::new("Otto").unwrap(),
            first_name: "Otto".to_string(),
            last_name: "Normalverbraucher".to_string(),
            password_hash,
            salt,
            role: Role::User,
            active,
            created_at: Utc::now(),
        }
    }

    fn register_command() -> RegisterCommand {
        RegisterCommand::new(
            UserName::new("Otto").unwrap(),
            "Otto".to_string(),
            "Normalverbraucher".to_string(),
            InputPassword::new("myVerySecretlySecret").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_generates_salt_and_stores_hash() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_create()
            .withf(|account| {
                account.user_name.as_str() == "Otto"
                    && account.salt.as_str().len() >= 32
                    && account.password_hash.as_str().starts_with("$argon2")
                    && account.role == Role::User
                    && account.active
            })
            .times(1)
            .returning(Ok);

        let service = AccountService::new(Arc::new(repository), pepper(), jwt_manager());
        let registered = service
            .register(register_command())
            .await
            .expect("registration failed");

        assert_eq!(registered.user_name.as_str(), "Otto");
        assert_eq!(registered.role, Role::User);
    }

    #[tokio::test]
    async fn test_register_surfaces_duplicate_user_name() {
        let mut repository = MockTestAccountRepository::new();
        repository.expect_create().returning(|account| {
            Err(AccountError::UserNameAlreadyExists(
                account.user_name.to_string(),
            ))
        });

        let service = AccountService::new(Arc::new(repository), pepper(), jwt_manager());
        let result = service.register(register_command()).await;
        assert!(matches!(
            result,
            Err(AccountError::UserNameAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_login_success_issues_token() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account("myVerySecretlySecret", true);
        repository
            .expect_find_by_user_name()
            .with(eq(UserName::new("Otto").unwrap()))
            .returning(move |_| Ok(Some(account.clone())));

        let manager = jwt_manager();
        let service = AccountService::new(Arc::new(repository), pepper(), Arc::clone(&manager));

        let logged_in = service
            .login(LoginCommand::new(
                UserName::new("Otto").unwrap(),
                InputPassword::new("myVerySecretlySecret").unwrap(),
            ))
            .await
            .expect("login failed");

        assert_eq!(logged_in.user.user_name.as_str(), "Otto");
        let payload = manager
            .validate(logged_in.token.as_str())
            .expect("issued token does not validate");
        assert_eq!(payload.user_name, "Otto");
        assert_eq!(payload.role, Role::User);
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account("myVerySecretlySecret", true);
        repository
            .expect_find_by_user_name()
            .returning(move |_| Ok(Some(account.clone())));

        let service = AccountService::new(Arc::new(repository), pepper(), jwt_manager());
        let result = service
            .login(LoginCommand::new(
                UserName::new("Otto").unwrap(),
                InputPassword::new("wrongpassword").unwrap(),
            ))
            .await;

        assert!(matches!(result, Err(AccountError::CredentialsInvalid)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_reports_invalid_credentials() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_user_name()
            .returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(repository), pepper(), jwt_manager());
        let result = service
            .login(LoginCommand::new(
                UserName::new("Nobody").unwrap(),
                InputPassword::new("myVerySecretlySecret").unwrap(),
            ))
            .await;

        // Same error as a wrong password; callers cannot probe for names
        assert!(matches!(result, Err(AccountError::CredentialsInvalid)));
    }

    #[tokio::test]
    async fn test_login_rejects_inactive_account_after_verification() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account("myVerySecretlySecret", false);
        repository
            .expect_find_by_user_name()
            .returning(move |_| Ok(Some(account.clone())));

        let service = AccountService::new(Arc::new(repository), pepper(), jwt_manager());
        let result = service
            .login(LoginCommand::new(
                UserName::new("Otto").unwrap(),
                InputPassword::new("myVerySecretlySecret").unwrap(),
            ))
            .await;

        assert!(matches!(result, Err(AccountError::NotActive)));
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_user_name()
            .returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(repository), pepper(), jwt_manager());
        let result = service
            .get_account(&UserName::new("Nobody").unwrap())
            .await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }
}
