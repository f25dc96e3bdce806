use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authorization::models::Session;

/// Echo of the authenticated session; the SPA calls this on startup to
/// restore its identity state.
pub async fn get_session(
    Extension(session): Extension<Session>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, SessionData::from(&session)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionData {
    pub user_name: String,
    pub scope: String,
    pub expires_at: i64,
}

impl From<&Session> for SessionData {
    fn from(session: &Session) -> Self {
        Self {
            user_name: session.user_name.clone(),
            scope: session.role.as_scope().to_string(),
            expires_at: session.expires_at,
        }
    }
}
