use std::net::SocketAddr;
use std::sync::Arc;

use auth::HashingCost;
use auth::PasswordHasher;
use auth::TokenIssuer;
use sso_service::config::Config;
use sso_service::config::DatabaseBackend;
use sso_service::domain::auth::ports::CredentialStore;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::create_grpc_router;
use sso_service::inbound::http::router::create_router;
use sso_service::repositories::PostgresCredentialStore;
use sso_service::repositories::SqliteCredentialStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sso_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "sso-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_backend = ?config.database.backend,
        http_port = config.server.http_port,
        grpc_port = config.server.grpc_port,
        request_timeout_secs = config.server.request_timeout_secs,
        token_ttl_secs = config.token.ttl_secs,
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_cost(HashingCost::from(&config.password))?;
    let cost = password_hasher.cost();
    tracing::info!(
        memory_kib = cost.memory_kib,
        iterations = cost.iterations,
        parallelism = cost.parallelism,
        "Password hasher ready"
    );
    let token_issuer = TokenIssuer::new(config.token.ttl());

    match config.database.backend {
        DatabaseBackend::Postgres => {
            let store = PostgresCredentialStore::connect(
                &config.database.url,
                config.database.max_connections,
                config.database.acquire_timeout(),
            )
            .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            store.migrate().await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            serve(store, &config, password_hasher, token_issuer).await
        }
        DatabaseBackend::Sqlite => {
            let store = SqliteCredentialStore::connect(
                &config.database.url,
                config.database.max_connections,
                config.database.acquire_timeout(),
            )
            .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "sqlite",
                "Database connection pool created"
            );

            store.migrate().await?;
            tracing::info!(database = "sqlite", "Database migrations completed");

            serve(store, &config, password_hasher, token_issuer).await
        }
    }
}

async fn serve<S>(
    store: S,
    config: &Config,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
) -> Result<(), anyhow::Error>
where
    S: CredentialStore,
{
    let auth_service = Arc::new(AuthService::new(
        Arc::new(store),
        password_hasher,
        token_issuer,
        config.server.request_timeout(),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(Arc::clone(&auth_service));
    let http_server =
        tokio::spawn(async move { axum::serve(http_listener, http_application).await });

    let grpc_address: SocketAddr = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_application =
        create_grpc_router(Arc::clone(&auth_service), config.server.request_timeout());
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    let grpc_server = tokio::spawn(async move { grpc_application.serve(grpc_address).await });

    match tokio::try_join!(http_server, grpc_server) {
        Ok((http_result, grpc_result)) => {
            http_result?;
            grpc_result?;
            tracing::info!("Servers exited successfully");
        }
        Err(e) => tracing::error!(error = %e, "Server error"),
    };

    Ok(())
}
