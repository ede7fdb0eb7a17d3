//! Storage port — persistence of the configuration record.

use std::future::Future;

use mqttsync_domain::config::ConfigRecord;
use mqttsync_domain::error::MqttSyncError;

/// Single-record store for the MQTT configuration.
pub trait SettingsRepository {
    /// Return the stored record, `None` when nothing was saved yet.
    fn load(&self) -> impl Future<Output = Result<Option<ConfigRecord>, MqttSyncError>> + Send;

    /// Replace the stored record.
    fn save(
        &self,
        record: ConfigRecord,
    ) -> impl Future<Output = Result<ConfigRecord, MqttSyncError>> + Send;
}
