//! Installed MQTT tools, found by scanning the search path.

use std::ffi::OsString;
use std::future::Future;
use std::path::PathBuf;

use mqttsync_app::ports::SoftwareInventory;
use mqttsync_domain::dependency::SoftwareInfo;
use mqttsync_domain::error::MqttSyncError;

use crate::config::InventoryConfig;
use crate::error::InventoryError;

/// Executables looked up on the search path.
const BINARIES: &[&str] = &["mosquitto", "mosquitto_pub", "mosquitto_sub"];

/// [`SoftwareInventory`] reporting which MQTT binaries are on the search path.
#[derive(Debug, Clone, Default)]
pub struct PathInventory {
    config: InventoryConfig,
}

impl PathInventory {
    #[must_use]
    pub fn new(config: InventoryConfig) -> Self {
        Self { config }
    }

    fn search_path(&self) -> Option<OsString> {
        self.config
            .search_path
            .as_ref()
            .map(OsString::from)
            .or_else(|| std::env::var_os("PATH"))
    }
}

fn scan(search_path: Option<OsString>) -> Vec<SoftwareInfo> {
    let Some(search_path) = search_path else {
        return Vec::new();
    };
    let dirs: Vec<PathBuf> = std::env::split_paths(&search_path).collect();

    BINARIES
        .iter()
        .filter_map(|name| {
            dirs.iter()
                .map(|dir| dir.join(name))
                .find(|candidate| candidate.is_file())
                .map(|path| {
                    SoftwareInfo::new(*name)
                        .with("installed", true)
                        .with("path", path.display().to_string())
                })
        })
        .collect()
}

impl SoftwareInventory for PathInventory {
    fn list(&self) -> impl Future<Output = Result<Vec<SoftwareInfo>, MqttSyncError>> + Send {
        let search_path = self.search_path();
        async move {
            let found = tokio::task::spawn_blocking(move || scan(search_path))
                .await
                .map_err(InventoryError::from)?;
            tracing::debug!(count = found.len(), "scanned for MQTT tools");
            Ok(found)
        }
    }
}
