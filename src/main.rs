//! userstore service.
//!
//! Main entry point. Loads configuration, opens the database, ensures the
//! schema exists, and serves the HTTP API until a shutdown signal arrives.

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::{error, info};
use userstore_api::Config;
use userstore_core::{storage, Storage, UserService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    init_tracing(&config.rust_log)?;

    info!(
        database_url = %config.database_url_masked(),
        host = %config.host,
        port = config.port,
        max_connections = config.database_max_connections,
        "Configuration loaded"
    );

    let pool = create_database_pool(&config).await?;
    info!("Database connection pool established");

    storage::migrate(&pool).await.context("Failed to create users table")?;
    info!("Database schema ready");

    let addr = config.parse_server_addr()?;
    let users = UserService::new(Storage::new(pool.clone()));

    if let Err(e) = userstore_api::start_server(users, addr, config.request_timeout()).await {
        error!(error = %e, "Server failed");
        pool.close().await;
        return Err(e).context("HTTP server failed");
    }

    pool.close().await;
    info!("Database connections closed");

    info!("userstore shutdown complete");
    Ok(())
}

/// Initializes tracing, preferring `RUST_LOG` over the configured filter.
fn init_tracing(default_filter: &str) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .context("Invalid log filter")?;

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
    Ok(())
}

/// Creates the database connection pool with retry logic.
///
/// In-memory databases keep every connection open for the life of the
/// process; the data disappears with the last connection.
async fn create_database_pool(config: &Config) -> Result<SqlitePool> {
    const MAX_RETRIES: u32 = 5;
    const RETRY_DELAY: Duration = Duration::from_secs(2);

    let (idle_timeout, max_lifetime) = if config.is_in_memory_database() {
        (None, None)
    } else {
        (
            Some(Duration::from_secs(config.database_idle_timeout)),
            Some(Duration::from_secs(config.database_max_lifetime)),
        )
    };

    let mut retries = 0;
    loop {
        match SqlitePoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections.max(1))
            .acquire_timeout(Duration::from_secs(config.database_connection_timeout))
            .idle_timeout(idle_timeout)
            .max_lifetime(max_lifetime)
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => {
                sqlx::query("SELECT 1")
                    .fetch_one(&pool)
                    .await
                    .context("Failed to verify database connection")?;

                return Ok(pool);
            },
            Err(e) if retries < MAX_RETRIES => {
                retries += 1;
                info!(
                    attempt = retries,
                    max_retries = MAX_RETRIES,
                    error = %e,
                    "Database connection failed, retrying..."
                );
                tokio::time::sleep(RETRY_DELAY).await;
            },
            Err(e) => {
                return Err(e).context("Failed to create database connection pool after retries");
            },
        }
    }
}
