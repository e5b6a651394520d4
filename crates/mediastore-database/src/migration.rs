//! Schema migrations.

use sqlx::PgPool;
use tracing::info;

use mediastore_core::error::{AppError, ErrorKind};
use mediastore_core::result::AppResult;

/// Run all pending migrations from the embedded `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!("Running database migrations");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
        })?;
    info!("Migrations complete");
    Ok(())
}
