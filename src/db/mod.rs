pub mod plants;
pub mod pool;
pub mod snapshots;
pub mod users;

use sqlx::{migrate::Migrator, PgPool};

pub use pool::create_pool;

/// Schema migrations embedded at compile time from `./migrations`
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Bring the schema up to date
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations...");
    MIGRATOR.run(pool).await?;
    tracing::info!("Migrations complete");
    Ok(())
}
