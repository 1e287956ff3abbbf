//! # Campusgate DB
//!
//! PostgreSQL pool construction and embedded migrations.
//!
//! # Example
//!
//! ```ignore
//! use campusgate_config::DatabaseConfig;
//! use campusgate_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! ```

use anyhow::Context;
use campusgate_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;

/// Migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Connects a pool using `config`.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

/// Builds a pool that connects on first use. Useful when the caller wants
/// a state object before the database is reachable, e.g. in router tests
/// that never issue a query.
pub fn init_lazy_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy(&config.url)
        .context("Invalid DATABASE_URL")
}

/// Applies pending migrations.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");
    Ok(())
}
