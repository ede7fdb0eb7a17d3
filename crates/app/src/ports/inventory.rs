//! Inventory port — software installed on the host.

use std::future::Future;

use mqttsync_domain::dependency::SoftwareInfo;
use mqttsync_domain::error::MqttSyncError;

/// Lists software known to the host.
pub trait SoftwareInventory {
    fn list(&self) -> impl Future<Output = Result<Vec<SoftwareInfo>, MqttSyncError>> + Send;
}
