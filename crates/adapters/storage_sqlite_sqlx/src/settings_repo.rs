//! `SQLite` implementation of [`SettingsRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use mqttsync_app::ports::SettingsRepository;
use mqttsync_domain::config::ConfigRecord;
use mqttsync_domain::error::MqttSyncError;
use mqttsync_domain::time::now;

use crate::error::StorageError;

/// Wrapper for converting database rows into a [`ConfigRecord`].
struct Wrapper(ConfigRecord);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(ConfigRecord {
            enabled: row.try_get("enabled")?,
            broker: row.try_get("broker")?,
            port: row.try_get("port")?,
            user: row.try_get("username")?,
            password: row.try_get("password")?,
        }))
    }
}

const SELECT: &str = "SELECT enabled, broker, port, username, password FROM mqtt_settings WHERE id = 1";
const UPSERT: &str = "INSERT INTO mqtt_settings (id, enabled, broker, port, username, password, updated_at) \
     VALUES (1, ?, ?, ?, ?, ?, ?) \
     ON CONFLICT(id) DO UPDATE SET \
     enabled = excluded.enabled, broker = excluded.broker, port = excluded.port, \
     username = excluded.username, password = excluded.password, updated_at = excluded.updated_at";

/// `SQLite`-backed settings repository holding a single row.
pub struct SqliteSettingsRepository {
    pool: SqlitePool,
}

impl SqliteSettingsRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SettingsRepository for SqliteSettingsRepository {
    fn load(&self) -> impl Future<Output = Result<Option<ConfigRecord>, MqttSyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn save(
        &self,
        record: ConfigRecord,
    ) -> impl Future<Output = Result<ConfigRecord, MqttSyncError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPSERT)
                .bind(record.enabled)
                .bind(&record.broker)
                .bind(record.port)
                .bind(&record.user)
                .bind(&record.password)
                .bind(now().to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(record)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DatabaseConfig;

    async fn setup() -> SqliteSettingsRepository {
        let pool = DatabaseConfig::in_memory().open().await.unwrap();
        SqliteSettingsRepository::new(pool)
    }

    fn record() -> ConfigRecord {
        ConfigRecord {
            enabled: true,
            broker: "10.0.0.5".to_string(),
            port: 1883,
            user: "admin".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn should_return_none_when_nothing_saved() {
        let repo = setup().await;
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_save_and_load_record() {
        let repo = setup().await;
        repo.save(record()).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, record());
    }

    #[tokio::test]
    async fn should_replace_previous_record() {
        let repo = setup().await;
        repo.save(record()).await.unwrap();

        let mut next = record();
        next.enabled = false;
        next.user = String::new();
        next.password = String::new();
        repo.save(next.clone()).await.unwrap();

        assert_eq!(repo.load().await.unwrap(), Some(next));

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM mqtt_settings")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn should_store_zero_and_negative_ports() {
        let repo = setup().await;
        for port in [0, -1] {
            let mut rec = record();
            rec.port = port;
            repo.save(rec).await.unwrap();
            assert_eq!(repo.load().await.unwrap().unwrap().port, port);
        }
    }
}
