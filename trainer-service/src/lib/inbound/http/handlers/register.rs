use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use credentials::InputPassword;
use credentials::InputPasswordError;
use credentials::UserName;
use credentials::UserNameError;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::RegisteredUser;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisteredUserData>, ApiError> {
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref registered| ApiSuccess::new(StatusCode::CREATED, registered.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    user_name: String,
    first_name: String,
    last_name: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid user name: {0}")]
    UserName(#[from] UserNameError),

    #[error("Invalid password: {0}")]
    Password(#[from] InputPasswordError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let user_name = UserName::new(self.user_name)?;
        let password = InputPassword::new(self.password)?;
        Ok(RegisterCommand::new(
            user_name,
            self.first_name,
            self.last_name,
            password,
        ))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredUserData {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl From<&RegisteredUser> for RegisteredUserData {
    fn from(registered: &RegisteredUser) -> Self {
        Self {
            user_name: registered.user_name.as_str().to_string(),
            first_name: registered.first_name.clone(),
            last_name: registered.last_name.clone(),
            role: registered.role.to_string(),
        }
    }
}
