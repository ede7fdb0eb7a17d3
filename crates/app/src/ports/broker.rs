//! Broker port — one-shot connectivity check against an MQTT broker.

use std::future::Future;

use mqttsync_domain::config::TestRequest;
use mqttsync_domain::error::MqttSyncError;

/// Checks whether a broker accepts a connection with the given parameters.
pub trait BrokerProbe {
    /// Connect once, wait for the broker's answer, disconnect.
    ///
    /// Refusals and timeouts are reported as [`MqttSyncError::Probe`].
    fn probe(&self, request: TestRequest)
    -> impl Future<Output = Result<(), MqttSyncError>> + Send;
}
