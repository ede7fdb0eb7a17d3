//! MQTT adapter configuration.

use serde::Deserialize;

/// Configuration of the broker probe.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// MQTT client identifier used for test connections.
    pub client_id: String,
    /// How long to wait for the broker's answer, in seconds.
    pub timeout_secs: u64,
    /// Keep-alive interval announced in the CONNECT packet, in seconds.
    pub keep_alive_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            client_id: "mqttsync-test".to_string(),
            timeout_secs: 5,
            keep_alive_secs: 30,
        }
    }
}

/// Configuration of the tools inventory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Directories to search, `PATH` syntax. Falls back to the process `PATH`.
    pub search_path: Option<String>,
}
