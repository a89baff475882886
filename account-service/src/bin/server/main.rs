use std::sync::Arc;

use account_service::account::ports::AuthServicePort;
use account_service::account::service::AuthService;
use account_service::config::Config;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountStore;
use account_service::outbound::repositories::PostgresAccountStore;
use auth::AuthSettings;
use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let database = match config.database.url {
        Some(_) => "postgresql",
        None => "memory",
    };

    tracing::info!(
        http_port = config.server.http_port,
        database = database,
        token_ttl_minutes = config.jwt.expiration_minutes,
        "Configuration loaded"
    );

    let settings = AuthSettings::new(
        config.jwt.secret.as_bytes(),
        config.token_ttl(),
        config.password.into(),
    )
    .map_err(|e| {
        tracing::error!(error = %e, "Refusing to start with invalid authentication settings");
        e
    })?;
    let authenticator = Arc::new(Authenticator::new(&settings)?);

    let auth_service: Arc<dyn AuthServicePort> = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let store = Arc::new(PostgresAccountStore::new(pg_pool));
            Arc::new(AuthService::new(store, Arc::clone(&authenticator)))
        }
        None => {
            tracing::warn!("No database url configured, accounts are kept in memory");
            let store = Arc::new(InMemoryAccountStore::new());
            Arc::new(AuthService::new(store, Arc::clone(&authenticator)))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
