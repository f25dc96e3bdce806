use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use credentials::Role;
use credentials::UserName;

use crate::domain::authorization::errors::AccessError;
use crate::domain::authorization::models::AuthorizationDecision;
use crate::domain::authorization::models::Session;
use crate::domain::authorization::ports::UserDirectory;

/// Role policy applied by the authorization gate.
///
/// One implementation per protected surface, selected at route wiring
/// time. `authorize` is a pure role check; `check_active` is the single
/// external call of the pipeline.
#[async_trait]
pub trait AuthorizationStrategy: Send + Sync + 'static {
    /// Decide whether the session's role satisfies this surface.
    fn authorize(&self, session: &Session) -> AuthorizationDecision;

    /// Confirm the account behind the session is still acceptable.
    ///
    /// # Errors
    /// * `InvalidUserName` - Session carries an unparseable user name
    /// * `NoActiveManager` / `CannotVerifyCredentials` - Account state check failed
    /// * `Directory` - Lookup failed
    async fn check_active(&self, session: &Session) -> Result<(), AccessError>;

    /// Body of the 401 returned when `authorize` denies.
    fn unauthorized_message(&self) -> &'static str;

    /// Info-level line logged when the request is let through.
    fn granted_log_message(&self, user_name: &str, role: Role) -> String;

    /// Info-level line logged when `check_active` fails.
    fn denied_log_message(&self, user_name: Option<&str>) -> String;
}

/// Policy for the word and verb management surface: managers only, and the
/// manager must still be active in the directory.
pub struct ManagerAuthorizationStrategy {
    directory: Arc<dyn UserDirectory>,
}

impl ManagerAuthorizationStrategy {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl AuthorizationStrategy for ManagerAuthorizationStrategy {
    fn authorize(&self, session: &Session) -> AuthorizationDecision {
        match session.role {
            Role::Manager => {
                AuthorizationDecision::granted(session.user_name.clone(), session.role)
            }
            Role::User => AuthorizationDecision::Denied,
        }
    }

    async fn check_active(&self, session: &Session) -> Result<(), AccessError> {
        let user_name = UserName::new(session.user_name.as_str())?;
        self.directory
            .exists_and_is_active_manager(&user_name)
            .await
    }

    fn unauthorized_message(&self) -> &'static str {
        "Unauthorized: No rights for managing words or verbs"
    }

    fn granted_log_message(&self, user_name: &str, role: Role) -> String {
        format!(
            "Management request authorized for {} with role {}",
            user_name, role
        )
    }

    fn denied_log_message(&self, user_name: Option<&str>) -> String {
        format!(
            "Management request denied for {}",
            user_name.unwrap_or("<unresolved user>")
        )
    }
}

/// Policy for the training surface: any registered role. Machine accounts
/// from the configured allowlist skip the directory lookup; their tokens
/// are not backed by an account record.
pub struct TrainerAuthorizationStrategy {
    directory: Arc<dyn UserDirectory>,
    service_accounts: HashSet<String>,
}

impl TrainerAuthorizationStrategy {
    pub fn new(directory: Arc<dyn UserDirectory>, service_accounts: Vec<String>) -> Self {
        Self {
            directory,
            service_accounts: service_accounts.into_iter().collect(),
        }
    }
}

#[async_trait]
impl AuthorizationStrategy for TrainerAuthorizationStrategy {
    fn authorize(&self, session: &Session) -> AuthorizationDecision {
        // Managers train too
        AuthorizationDecision::granted(session.user_name.clone(), session.role)
    }

    async fn check_active(&self, session: &Session) -> Result<(), AccessError> {
        if self.service_accounts.contains(&session.user_name) {
            return Ok(());
        }
        let user_name = UserName::new(session.user_name.as_str())?;
        self.directory.exists(&user_name).await
    }

    fn unauthorized_message(&self) -> &'static str {
        "Unauthorized: No rights for training"
    }

    fn granted_log_message(&self, user_name: &str, role: Role) -> String {
        format!(
            "Training request authorized for {} with role {}",
            user_name, role
        )
    }

    fn denied_log_message(&self, user_name: Option<&str>) -> String {
        format!(
            "Training request denied for {}",
            user_name.unwrap_or("<unresolved user>")
        )
    }
}
