use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use credentials::PasswordHash;
use credentials::Role;
use credentials::Salt;
use credentials::UserName;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::ports::AccountRepository;
use crate::domain::authorization::errors::AccessError;
use crate::domain::authorization::ports::UserDirectory;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn account_from_row(row: &PgRow) -> Result<Account, AccountError> {
        let user_name: String = row
            .try_get("user_name")
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
        let first_name: String = row
            .try_get("first_name")
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
        let last_name: String = row
            .try_get("last_name")
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
        let salt: String = row
            .try_get("salt")
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
        let role: String = row
            .try_get("role")
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
        let active: bool = row
            .try_get("active")
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
        let created_at = row
            .try_get("created_at")
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(Account {
            user_name: UserName::new(user_name)?,
            first_name,
            last_name,
            password_hash: PasswordHash::new(password_hash)?,
            salt: Salt::new(salt)?,
            role: role_from_column(&role)?,
            active,
            created_at,
        })
    }
}

fn role_from_column(value: &str) -> Result<Role, AccountError> {
    match value {
        "USER" => Ok(Role::User),
        "MANAGER" => Ok(Role::Manager),
        other => Err(AccountError::DatabaseError(format!(
            "Unknown role column value: {}",
            other
        ))),
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (user_name, first_name, last_name, password_hash, salt, role, active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(account.user_name.as_str())
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.password_hash.as_str())
        .bind(account.salt.as_str())
        .bind(account.role.to_string())
        .bind(account.active)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountError::UserNameAlreadyExists(
                        account.user_name.as_str().to_string(),
                    );
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_user_name(
        &self,
        user_name: &UserName,
    ) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT user_name, first_name, last_name, password_hash, salt, role, active, created_at
            FROM accounts
            WHERE user_name = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::account_from_row(&r)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserDirectory for PostgresAccountRepository {
    async fn exists(&self, user_name: &UserName) -> Result<(), AccessError> {
        let row = sqlx::query(
            r#"
            SELECT 1 AS one
            FROM accounts
            WHERE user_name = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccessError::Directory(e.to_string()))?;

        match row {
            Some(_) => Ok(()),
            None => Err(AccessError::CannotVerifyCredentials),
        }
    }

    async fn exists_and_is_active_manager(
        &self,
        user_name: &UserName,
    ) -> Result<(), AccessError> {
        let row = sqlx::query(
            r#"
            SELECT 1 AS one
            FROM accounts
            WHERE user_name = $1 AND role = 'MANAGER' AND active = TRUE
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccessError::Directory(e.to_string()))?;

        match row {
            Some(_) => Ok(()),
            None => Err(AccessError::NoActiveManager),
        }
    }
}
