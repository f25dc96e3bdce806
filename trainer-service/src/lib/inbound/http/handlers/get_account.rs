use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use credentials::UserName;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AccountStatus;
use crate::inbound::http::router::AppState;

pub async fn get_account(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> Result<ApiSuccess<AccountStatusData>, ApiError> {
    let user_name =
        UserName::new(user_name).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .account_service
        .get_account(&user_name)
        .await
        .map_err(ApiError::from)
        .map(|ref status| ApiSuccess::new(StatusCode::OK, status.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountStatusData {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub active: bool,
}

impl From<&AccountStatus> for AccountStatusData {
    fn from(status: &AccountStatus) -> Self {
        Self {
            user_name: status.user_name.as_str().to_string(),
            first_name: status.first_name.clone(),
            last_name: status.last_name.clone(),
            role: status.role.to_string(),
            active: status.active,
        }
    }
}
