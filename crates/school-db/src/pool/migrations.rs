//! Startup migrations

use std::path::Path;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use tracing::info;

/// Apply pending SQL migrations from a directory.
///
/// SQLx takes an advisory lock while migrating, so several instances
/// starting together apply each migration once.
pub async fn run_migrations(pool: &PgPool, dir: impl AsRef<Path>) -> Result<(), MigrateError> {
    let dir = dir.as_ref();
    let migrator = Migrator::new(dir).await?;
    info!(dir = %dir.display(), migrations = migrator.iter().count(), "Running database migrations");
    migrator.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
