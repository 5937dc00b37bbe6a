//! Database Module
//!
//! Handles the SQLite connection pool, migrations and the per-operation
//! time budget.

pub mod repository;

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use repository::{RepoError, RepoResult};

/// Database service: owns a SQLite connection pool and the time budget
/// applied to every store round trip.
#[derive(Clone, Debug)]
pub struct DbService {
    pub pool: SqlitePool,
    op_timeout: Duration,
}

impl DbService {
    /// Open (or create) the database at `url` with WAL mode and foreign keys on
    pub async fn connect(url: &str, op_timeout: Duration) -> RepoResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| RepoError::Database(format!("Invalid database url: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::Database(format!("Failed to open database: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL)");

        let db = Self { pool, op_timeout };
        db.migrate().await?;
        Ok(db)
    }

    /// Private in-memory database, used by tests.
    ///
    /// A single connection that never expires, since every connection to
    /// `sqlite::memory:` opens its own empty database.
    pub async fn in_memory(op_timeout: Duration) -> RepoResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RepoError::Database(e.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::Database(format!("Failed to open database: {e}")))?;

        let db = Self { pool, op_timeout };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> RepoResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepoError::Database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    /// Time budget of a single store operation
    pub fn op_timeout(&self) -> Duration {
        self.op_timeout
    }

    /// Run one store operation against the time budget.
    ///
    /// The operation races the timer and the first to finish wins. When the
    /// timer wins, the operation future is dropped and the caller gets
    /// [`RepoError::Timeout`].
    pub async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> RepoResult<T>
    where
        F: Future<Output = RepoResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.op_timeout.as_millis() as u64,
                    "Store operation timed out"
                );
                Err(RepoError::Timeout(operation.to_string()))
            }
        }
    }
}
