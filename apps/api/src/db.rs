use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Steady-state connections plus burst headroom.
const MAX_CONNECTIONS: u32 = 30;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Creates the PostgreSQL pool backing tenant-scoped CRM reads.
///
/// Connections are validated before being handed out so a restarted database
/// does not surface as stale-socket errors in request handlers.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL (max_connections={MAX_CONNECTIONS})");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .test_before_acquire(true)
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    Ok(pool)
}
