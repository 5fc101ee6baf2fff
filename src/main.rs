use std::sync::Arc;

use inotebook::{
    config,
    handlers::rest::{self, AppState, TokenRegistry},
    repository::{self, PostgresRepository},
    service::NoteService,
};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config: {e}");
    });
    tracing::info!("Successfully loaded server config: {:?}", cfg);

    // Database connection and migration, exits the process on failure
    let database = Arc::new(repository::bootstrap(&cfg.database_dsn).await);

    // Service creation
    let service = NoteService::new(Arc::new(PostgresRepository::new(database.clone())));
    let tokens = TokenRegistry::from_users(&cfg.users);
    if tokens.is_empty() {
        tracing::warn!("No auth-tokens configured, every notes request will be rejected");
    } else {
        tracing::info!("Accepting auth-tokens of {} users", tokens.len());
    }

    let router = rest::router(Arc::new(AppState::new(service, tokens)));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind port {}: {e}", cfg.port);
            panic!("failed to bind port {}: {e}", cfg.port);
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("REST server starting, listening on {}", addr),
        Err(e) => tracing::warn!("REST server starting, local address unknown: {e}"),
    }

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("HTTP server error: {e}");
    }

    // Router and its state are gone once serve returns
    match Arc::try_unwrap(database) {
        Ok(database) => database.shutdown().await,
        Err(_) => tracing::warn!("Database handle still in use, skipping explicit shutdown"),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
