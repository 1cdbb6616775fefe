// SQLite Connection Pool Setup

use gamedb_core::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

const DEFAULT_DB_URL: &str = "sqlite://gamedb.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;

/// Connection settings for the SQLite pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub busy_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DB_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout: Duration::from_secs(DEFAULT_BUSY_TIMEOUT_SECS),
        }
    }
}

impl DatabaseConfig {
    /// Private in-memory database behind a single connection
    ///
    /// One connection keeps units of work strictly sequential, so a dropped
    /// transaction is always rolled back before the next one begins.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Self::default()
        }
    }

    /// Load from the environment
    ///
    /// # Environment Variables
    ///
    /// - `GAMEDB_DB_URL`: database URL (default: sqlite://gamedb.db)
    /// - `GAMEDB_DB_MAX_CONNECTIONS`: pool size (default: 10)
    /// - `GAMEDB_DB_BUSY_TIMEOUT_SECS`: SQLite busy timeout (default: 5)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("GAMEDB_DB_URL") {
            config.url = url;
        }

        if let Some(raw) = lookup("GAMEDB_DB_MAX_CONNECTIONS") {
            config.max_connections = raw.parse().map_err(|_| {
                AppError::Config(format!("GAMEDB_DB_MAX_CONNECTIONS is not a number: {}", raw))
            })?;
            if config.max_connections == 0 {
                return Err(AppError::Config(
                    "GAMEDB_DB_MAX_CONNECTIONS must be at least 1".to_string(),
                ));
            }
        }

        if let Some(raw) = lookup("GAMEDB_DB_BUSY_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| {
                AppError::Config(format!("GAMEDB_DB_BUSY_TIMEOUT_SECS is not a number: {}", raw))
            })?;
            config.busy_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

/// Create SQLite connection pool with WAL mode
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| AppError::Config(format!("Invalid database URL {}: {}", config.url, e)))?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(crate::map_sqlx_error)?;

    info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Database pool ready"
    );

    Ok(pool)
}
