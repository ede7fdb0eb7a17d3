//! `SQLite` connection settings and pool setup.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;

/// `[database]` section of the daemon configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL (e.g. `sqlite:mqttsync.db` or `sqlite::memory:`).
    pub url: String,
    pub max_connections: u32,
    /// How long a statement waits on a locked database, in seconds.
    pub busy_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:mqttsync.db?mode=rwc".to_string(),
            max_connections: 4,
            busy_timeout_secs: 5,
        }
    }
}

impl DatabaseConfig {
    /// Settings for a private in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            ..Self::default()
        }
    }

    /// Open the pool, creating the file if needed, and bring the schema up
    /// to date.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is invalid, the connection fails,
    /// or a migration fails.
    pub async fn open(&self) -> Result<SqlitePool, StorageError> {
        let options = SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(self.busy_timeout_secs));

        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections.max(1))
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!(
            url = %self.url,
            max_connections = self.max_connections,
            "settings database ready"
        );

        Ok(pool)
    }
}
