//! MQTT adapter error types.

use std::time::Duration;

use mqttsync_domain::error::MqttSyncError;

/// Errors raised while probing a broker.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// No answer from the broker in time.
    #[error("connection timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The broker answered the CONNECT with a refusal.
    #[error("connection refused by broker: {0:?}")]
    Refused(rumqttc::ConnectReturnCode),

    /// The connection could not be established.
    #[error("{0}")]
    Connection(#[source] rumqttc::ConnectionError),
}

impl From<rumqttc::ConnectionError> for ProbeError {
    fn from(err: rumqttc::ConnectionError) -> Self {
        match err {
            rumqttc::ConnectionError::ConnectionRefused(code) => Self::Refused(code),
            other => Self::Connection(other),
        }
    }
}

impl From<ProbeError> for MqttSyncError {
    fn from(err: ProbeError) -> Self {
        Self::Probe(Box::new(err))
    }
}

/// Errors raised while listing installed tools.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// The blocking scan task did not complete.
    #[error("inventory scan aborted")]
    Join(#[from] tokio::task::JoinError),
}

impl From<InventoryError> for MqttSyncError {
    fn from(err: InventoryError) -> Self {
        Self::Inventory(Box::new(err))
    }
}
