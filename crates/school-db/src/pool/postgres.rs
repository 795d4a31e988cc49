//! PostgreSQL connection pool

use std::str::FromStr;
use std::time::Duration;

use school_common::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

/// Name reported in `pg_stat_activity`
pub const APPLICATION_NAME: &str = "school-attendance";

#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long a request may wait for a free connection
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl From<&DatabaseConfig> for PoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections,
            min_connections: config.min_connections.min(config.max_connections),
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

impl PoolConfig {
    fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        Ok(PgConnectOptions::from_str(&self.url)?.application_name(APPLICATION_NAME))
    }
}

/// Open the pool and wait for the first connection
pub async fn create_pool(config: &PoolConfig) -> Result<PgPool, sqlx::Error> {
    let options = config.connect_options()?;
    info!(
        host = options.get_host(),
        database = options.get_database().unwrap_or("(default)"),
        max_connections = config.max_connections,
        "Opening PostgreSQL pool"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .connect_with(options)
        .await
}
