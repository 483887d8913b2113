// src/db.rs

//! Pool construction, migrations and repository selection.

use std::{future::Future, str::FromStr, sync::Arc, time::Duration};

use sqlx::{
    SqlitePool,
    postgres::PgPoolOptions,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::{
    config::{Config, DatabaseKind},
    repository::{PgQuizRepository, QuizRepository, SqliteQuizRepository},
};

const MAX_CONNECT_RETRIES: u32 = 5;
const RETRY_DELAY: Duration = Duration::from_secs(2);

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Connects to the configured database, applies migrations and returns the matching repository.
pub async fn init_repository(config: &Config) -> Result<Arc<dyn QuizRepository>, BoxError> {
    match config.database_kind() {
        Some(DatabaseKind::Postgres) => {
            let pool = with_retry(|| {
                PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(&config.database_url)
            })
            .await?;
            tracing::info!("Database connected...");

            tracing::info!("Running migrations...");
            sqlx::migrate!("./migrations/postgres").run(&pool).await?;
            tracing::info!("Migrations applied successfully.");

            Ok(Arc::new(PgQuizRepository::new(pool)))
        }
        Some(DatabaseKind::Sqlite) => {
            let pool =
                with_retry(|| open_sqlite(&config.database_url, config.max_connections)).await?;
            tracing::info!("Database connected...");

            tracing::info!("Running migrations...");
            migrate_sqlite(&pool).await?;
            tracing::info!("Migrations applied successfully.");

            Ok(Arc::new(SqliteQuizRepository::new(pool)))
        }
        None => Err(format!(
            "Unsupported DATABASE_URL scheme (expected postgres:// or sqlite:): {}",
            config.database_url
        )
        .into()),
    }
}

/// Opens a SQLite pool and runs the SQLite migrations.
pub async fn connect_sqlite(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let pool = open_sqlite(url, max_connections).await?;
    migrate_sqlite(&pool).await?;
    Ok(pool)
}

/// Opens a SQLite pool without touching the schema.
///
/// An in-memory database lives as long as its connection, so `:memory:` URLs
/// are pinned to one connection that is never recycled.
pub async fn open_sqlite(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool = if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?
    };

    Ok(pool)
}

pub async fn migrate_sqlite(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))
}

async fn with_retry<T, F, Fut>(mut connect: F) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut retry_count = 0;
    loop {
        match connect().await {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                retry_count += 1;
                if retry_count > MAX_CONNECT_RETRIES {
                    tracing::error!("Failed to connect to database after {} retries", MAX_CONNECT_RETRIES);
                    return Err(e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {}): {}", retry_count, e);
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sqlite_url_yields_working_repository() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            rust_log: "error".to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            max_connections: 4,
        };

        let repo = init_repository(&config).await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_scheme_is_rejected() {
        let config = Config {
            database_url: "mysql://localhost/quizdb".to_string(),
            rust_log: "error".to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            max_connections: 1,
        };

        let err = init_repository(&config).await.err().unwrap();
        assert!(err.to_string().contains("Unsupported DATABASE_URL"));
    }

    #[tokio::test]
    async fn open_sqlite_leaves_schema_to_migrations() {
        let pool = open_sqlite("sqlite::memory:", 1).await.unwrap();

        let tables = || {
            sqlx::query_scalar::<_, String>(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'quiz'",
            )
            .fetch_optional(&pool)
        };
        assert!(tables().await.unwrap().is_none());

        migrate_sqlite(&pool).await.unwrap();
        assert_eq!(tables().await.unwrap().as_deref(), Some("quiz"));
    }

    #[tokio::test(start_paused = true)]
    async fn retry_gives_up_after_max_attempts() {
        let mut attempts = 0;

        let result: Result<(), sqlx::Error> = with_retry(|| {
            attempts += 1;
            async { Err(sqlx::Error::PoolTimedOut) }
        })
        .await;

        assert!(matches!(result, Err(sqlx::Error::PoolTimedOut)));
        assert_eq!(attempts, MAX_CONNECT_RETRIES + 1);
    }
}
