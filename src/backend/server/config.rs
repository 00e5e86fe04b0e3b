/**
 * Server Configuration
 *
 * Database connection and migrations. Unlike the rest of the
 * configuration, which is plain data in [`AppConfig`](crate::shared::AppConfig),
 * this needs I/O, so it lives with the server.
 *
 * # Error Handling
 *
 * The database is required: connection or migration failures are returned
 * to the caller and abort start-up.
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

const MAX_CONNECTIONS: u32 = 5;

/// Open a pool for `database_url` and run the bundled migrations
///
/// An in-memory URL (`sqlite::memory:`) gets a single connection that is
/// never recycled, since each SQLite connection would otherwise see its own
/// empty database.
///
/// # Example
///
/// ```rust,no_run
/// use bookshelf::backend::server::config::connect_database;
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let pool = connect_database("sqlite::memory:").await?;
/// # Ok(())
/// # }
/// ```
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    let pool = pool_options.connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Connect to the configured database, logging progress
pub async fn load_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let pool = connect_database(database_url).await.map_err(|e| {
        tracing::error!("Failed to open database or run migrations: {}", e);
        e
    })?;

    tracing::info!("Database ready, migrations applied");
    Ok(pool)
}
