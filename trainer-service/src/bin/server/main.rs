use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use credentials::JwtManager;
use credentials::JwtSettings;
use credentials::Pepper;
use credentials::SystemClock;
use trainer_service::config::Config;
use trainer_service::domain::account::service::AccountService;
use trainer_service::domain::authorization::strategies::ManagerAuthorizationStrategy;
use trainer_service::domain::authorization::strategies::TrainerAuthorizationStrategy;
use trainer_service::inbound::http::router::create_router;
use trainer_service::outbound::repositories::PostgresAccountRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trainer_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "trainer-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_subject = %config.jwt.subject,
        jwt_audience = %config.jwt.audience,
        jwt_lifetime_seconds = config.jwt.lifetime_seconds,
        "Configuration loaded"
    );

    // Both secrets are startup invariants: refusing to boot beats serving
    // with weak credentials
    let pepper = Pepper::new(config.security.pepper.clone())
        .context("security.pepper is unset or too short")?;
    let jwt_manager = Arc::new(
        JwtManager::new(
            JwtSettings {
                secret: config.jwt.secret.clone(),
                subject: config.jwt.subject.clone(),
                audience: config.jwt.audience.clone(),
                lifetime_seconds: config.jwt.lifetime_seconds,
            },
            Arc::new(SystemClock),
        )
        .context("jwt.secret is unset or too short")?,
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let repository = Arc::new(PostgresAccountRepository::new(pg_pool));
    let account_service = Arc::new(AccountService::new(
        Arc::clone(&repository),
        pepper,
        Arc::clone(&jwt_manager),
    ));
    let manager_strategy = Arc::new(ManagerAuthorizationStrategy::new(repository.clone()));
    let trainer_strategy = Arc::new(TrainerAuthorizationStrategy::new(
        repository,
        config.security.service_accounts.clone(),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        account_service,
        jwt_manager,
        manager_strategy,
        trainer_strategy,
    );
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
