//! # Tokengate DB
//!
//! PostgreSQL connection pool and embedded migrations for the user store.
//!
//! # Example
//!
//! ```ignore
//! use tokengate_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&database_url).await?;
//! run_migrations(&pool).await?;
//! ```

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connects a PostgreSQL pool.
///
/// The pool is cheaply cloneable and should be created once at startup
/// and handed to the user store.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("Database pool initialized");
    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
