use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use backend::{api, config::ServerConfig, registry::SessionRegistry, store::SqliteMoveStore};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    let options = SqliteConnectOptions::from_str(&config.database_url)
        .context("Invalid database URL")?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    let store = SqliteMoveStore::new(pool);
    store
        .migrate()
        .await
        .context("Failed to initialize database schema")?;

    let registry = Arc::new(SessionRegistry::new(Arc::new(store), config.allow_spectators));
    let app = api::router(registry);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("[SERVER] Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("[SERVER] Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
    info!("[SERVER] Ctrl-C received, shutting down");
}
