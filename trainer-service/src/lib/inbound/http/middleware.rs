use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use credentials::JwtError;

use crate::domain::authorization::errors::AccessError;
use crate::domain::authorization::models::AuthorizationDecision;
use crate::domain::authorization::models::Session;
use crate::domain::authorization::strategies::AuthorizationStrategy;
use crate::inbound::http::router::AppState;

/// Authentication gate.
///
/// Requires a bearer token, validates it and populates the per-request
/// session; every failure short-circuits with a 401 before the downstream
/// handler runs. Fails closed, no retries.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Unauthorized: No header"))?;

    let header = header
        .to_str()
        .map_err(|_| unauthorized("Invalid token: unreadable Authorization header"))?;

    // Bearer prefix stripping is the codec's job
    let payload = state.jwt_manager.validate(header).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        unauthorized(&token_error_message(&e))
    })?;

    req.extensions_mut().insert(Session::from(payload));

    Ok(next.run(req).await)
}

/// Authorization gate for the word/verb management surface.
pub async fn authorize_manager(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    authorize(Arc::clone(&state.manager_strategy), req, next).await
}

/// Authorization gate for the training surface.
pub async fn authorize_trainer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    authorize(Arc::clone(&state.trainer_strategy), req, next).await
}

/// Three-stage authorization pipeline with early exit at each stage:
/// role check, then active-account check, then pass-through.
async fn authorize(
    strategy: Arc<dyn AuthorizationStrategy>,
    req: Request,
    next: Next,
) -> Response {
    // The authentication gate runs first on every protected route; a
    // missing session means the request never passed it
    let Some(session) = req.extensions().get::<Session>().cloned() else {
        return unauthorized(strategy.unauthorized_message());
    };

    let (user_name, role) = match strategy.authorize(&session) {
        AuthorizationDecision::Denied => {
            return unauthorized(strategy.unauthorized_message());
        }
        AuthorizationDecision::Granted { user_name, role } => (user_name, role),
    };

    if let Err(e) = strategy.check_active(&session).await {
        tracing::info!("{}", strategy.denied_log_message(Some(&user_name)));
        tracing::error!(error = %e, "Active-account check failed");
        return access_error_response(&e);
    }

    tracing::info!("{}", strategy.granted_log_message(&user_name, role));

    next.run(req).await
}

fn token_error_message(err: &JwtError) -> String {
    match err {
        // "Token expired: Expired token"
        JwtError::Expired => format!("Token expired: {}", err),
        other => format!("Invalid token: {}", other),
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": message })),
    )
        .into_response()
}

fn access_error_response(err: &AccessError) -> Response {
    let (status, message) = match err {
        // A nickname that fails user-name validation points at a corrupted
        // or forged token, not at account state
        AccessError::InvalidUserName(_) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        AccessError::NoActiveManager | AccessError::CannotVerifyCredentials => {
            (StatusCode::UNAUTHORIZED, err.to_string())
        }
        // Lookup faults stay fail-closed and generic; the detail is in the log
        AccessError::Directory(_) => (
            StatusCode::UNAUTHORIZED,
            AccessError::CannotVerifyCredentials.to_string(),
        ),
    };

    (status, Json(json!({ "message": message }))).into_response()
}
