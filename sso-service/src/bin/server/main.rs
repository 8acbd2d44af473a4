use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::HashingCost;
use sso_service::config::Config;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::outbound::BlockingHasher;
use sso_service::outbound::JwtTokenIssuer;
use sso_service::outbound::SqliteStorage;
use sso_service::proto::auth_server::AuthServer;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sso_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "sso-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let token_ttl = config.token_ttl()?;

    tracing::info!(
        storage_url = %config.storage.url,
        grpc_port = config.grpc.port,
        grpc_timeout_secs = config.grpc.timeout_secs,
        token_ttl_secs = config.token.ttl_secs,
        hashing_max_concurrency = config.hashing.max_concurrency,
        "Configuration loaded"
    );

    let storage =
        Arc::new(SqliteStorage::connect(&config.storage.url, config.storage.max_connections).await?);
    tracing::info!(
        max_connections = config.storage.max_connections,
        database = "sqlite",
        "Database connection pool created"
    );

    storage.migrate().await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let hasher = Arc::new(BlockingHasher::new(
        HashingCost::from(&config.hashing),
        config.hashing.max_concurrency,
    )?);
    let token_issuer = Arc::new(JwtTokenIssuer::new());

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&storage),
        Arc::clone(&storage),
        Arc::clone(&storage),
        hasher,
        token_issuer,
        token_ttl,
    ));

    let grpc_address: SocketAddr = format!("0.0.0.0:{}", config.grpc.port).parse()?;
    let grpc_service = AuthGrpcService::new(auth_service);
    tracing::info!(
        address = %grpc_address,
        port = config.grpc.port,
        protocol = "grpc",
        "gRpc server listening"
    );

    Server::builder()
        .timeout(Duration::from_secs(config.grpc.timeout_secs))
        .add_service(AuthServer::new(grpc_service))
        .serve_with_shutdown(grpc_address, shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests");
}
