use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use credentials::Clock;
use credentials::FixedClock;
use credentials::InputPassword;
use credentials::JwtManager;
use credentials::JwtSettings;
use credentials::PasswordHasher;
use credentials::PasswordVector;
use credentials::Pepper;
use credentials::Role;
use credentials::Salt;
use credentials::SystemClock;
use credentials::UserName;
use trainer_service::domain::account::errors::AccountError;
use trainer_service::domain::account::models::Account;
use trainer_service::domain::account::ports::AccountRepository;
use trainer_service::domain::account::service::AccountService;
use trainer_service::domain::authorization::errors::AccessError;
use trainer_service::domain::authorization::ports::UserDirectory;
use trainer_service::domain::authorization::strategies::ManagerAuthorizationStrategy;
use trainer_service::domain::authorization::strategies::TrainerAuthorizationStrategy;
use trainer_service::inbound::http::router::create_router;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const PEPPER: &str = "test-pepper-for-hashing-at-least-32-bytes";
pub const SERVICE_ACCOUNT: &str = "vocab-trainer-client";

/// Account storage backed by a map; the API surface under test never
/// notices the difference.
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;
        let key = account.user_name.as_str().to_string();
        if accounts.contains_key(&key) {
            return Err(AccountError::UserNameAlreadyExists(key));
        }
        accounts.insert(key, account.clone());
        Ok(account)
    }

    async fn find_by_user_name(
        &self,
        user_name: &UserName,
    ) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(user_name.as_str()).cloned())
    }
}

#[async_trait]
impl UserDirectory for InMemoryAccountRepository {
    async fn exists(&self, user_name: &UserName) -> Result<(), AccessError> {
        let accounts = self.accounts.read().await;
        if accounts.contains_key(user_name.as_str()) {
            Ok(())
        } else {
            Err(AccessError::CannotVerifyCredentials)
        }
    }

    async fn exists_and_is_active_manager(
        &self,
        user_name: &UserName,
    ) -> Result<(), AccessError> {
        let accounts = self.accounts.read().await;
        match accounts.get(user_name.as_str()) {
            Some(account) if account.active && account.role == Role::Manager => Ok(()),
            _ => Err(AccessError::NoActiveManager),
        }
    }
}

/// Test application that spawns a real server on a random port
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub repository: Arc<InMemoryAccountRepository>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryAccountRepository::new());
        let jwt_manager = Arc::new(issuer_with_clock(Arc::new(SystemClock)));
        let account_service = Arc::new(AccountService::new(
            Arc::clone(&repository),
            Pepper::new(PEPPER).unwrap(),
            Arc::clone(&jwt_manager),
        ));
        let manager_strategy = Arc::new(ManagerAuthorizationStrategy::new(
            Arc::clone(&repository) as Arc<dyn UserDirectory>,
        ));
        let trainer_strategy = Arc::new(TrainerAuthorizationStrategy::new(
            Arc::clone(&repository) as Arc<dyn UserDirectory>,
            vec![SERVICE_ACCOUNT.to_string()],
        ));

        let application = create_router(
            account_service,
            jwt_manager,
            manager_strategy,
            trainer_strategy,
        );

        tokio::spawn(async move {
            axum::serve(listener, application)
                .await
                .expect("Server crashed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            repository,
        }
    }

    /// Insert an account directly into storage, bypassing the API.
    pub async fn seed_account(&self, user_name: &str, password: &str, role: Role, active: bool) {
        let salt = Salt::generate();
        let vector = PasswordVector::new(salt.clone(), Pepper::new(PEPPER).unwrap());
        let password_hash = PasswordHasher::new()
            .hash(&InputPassword::new(password).unwrap(), &vector)
            .unwrap();

        self.repository
            .create(Account {
                user_name: UserName::new(user_name).unwrap(),
                first_name: user_name.to_string(),
                last_name: "Testperson".to_string(),
                password_hash,
                salt,
                role,
                active,
                created_at: Utc::now(),
            })
            .await
            .expect("Failed to seed account");
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }
}

/// Issuer sharing the server's signing configuration; combined with a fixed
/// clock it mints tokens from any point in time.
pub fn issuer_with_clock(clock: Arc<dyn Clock>) -> JwtManager {
    JwtManager::new(
        JwtSettings {
            secret: JWT_SECRET.to_string(),
            subject: "vocab-trainer".to_string(),
            audience: "vocab-trainer-spa".to_string(),
            lifetime_seconds: 7200,
        },
        clock,
    )
    .expect("Failed to build test issuer")
}

/// Token minted at an arbitrary instant, for expiry scenarios.
pub fn token_issued_at(timestamp: i64, user_name: &str, role: Role) -> String {
    let clock = FixedClock::at(chrono::DateTime::from_timestamp(timestamp, 0).unwrap());
    issuer_with_clock(Arc::new(clock))
        .issue(&credentials::TokenIdentity {
            user_name: user_name.to_string(),
            first_name: user_name.to_string(),
            last_name: "Testperson".to_string(),
            role,
        })
        .expect("Failed to issue test token")
        .as_str()
        .to_string()
}
