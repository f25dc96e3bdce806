use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use credentials::JwtManager;

use super::handlers::get_account::get_account;
use super::handlers::get_session::get_session;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate;
use super::middleware::authorize_manager;
use super::middleware::authorize_trainer;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::authorization::strategies::AuthorizationStrategy;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub jwt_manager: Arc<JwtManager>,
    pub manager_strategy: Arc<dyn AuthorizationStrategy>,
    pub trainer_strategy: Arc<dyn AuthorizationStrategy>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    jwt_manager: Arc<JwtManager>,
    manager_strategy: Arc<dyn AuthorizationStrategy>,
    trainer_strategy: Arc<dyn AuthorizationStrategy>,
) -> Router {
    let state = AppState {
        account_service,
        jwt_manager,
        manager_strategy,
        trainer_strategy,
    };

    let public_routes = Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login));

    // Gate order matters: authentication populates the session the
    // authorization gates read, so it is the outer layer
    let trainer_routes = Router::new()
        .route("/api/session", get(get_session))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authorize_trainer,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let manager_routes = Router::new()
        .route("/api/accounts/:user_name", get(get_account))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authorize_manager,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(trainer_routes)
        .merge(manager_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
