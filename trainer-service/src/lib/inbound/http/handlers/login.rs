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
use crate::domain::account::models::LoggedInUser;
use crate::domain::account::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoggedInUserData>, ApiError> {
    state
        .account_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref logged_in| ApiSuccess::new(StatusCode::OK, logged_in.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    user_name: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseLoginRequestError {
    #[error("Invalid user name: {0}")]
    UserName(#[from] UserNameError),

    #[error("Invalid password: {0}")]
    Password(#[from] InputPasswordError),
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ParseLoginRequestError> {
        let user_name = UserName::new(self.user_name)?;
        let password = InputPassword::new(self.password)?;
        Ok(LoginCommand::new(user_name, password))
    }
}

impl From<ParseLoginRequestError> for ApiError {
    fn from(err: ParseLoginRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggedInUserData {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub token: String,
}

impl From<&LoggedInUser> for LoggedInUserData {
    fn from(logged_in: &LoggedInUser) -> Self {
        Self {
            user_name: logged_in.user.user_name.as_str().to_string(),
            first_name: logged_in.user.first_name.clone(),
            last_name: logged_in.user.last_name.clone(),
            role: logged_in.user.role.to_string(),
            token: logged_in.token.as_str().to_string(),
        }
    }
}
