//! Shared application state for axum handlers.

use std::sync::Arc;

use mqttsync_app::ports::{BrokerProbe, SettingsRepository, SoftwareInventory};
use mqttsync_app::services::settings_service::SettingsService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository, probe and inventory types to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types do not
/// need to be `Clone`.
pub struct AppState<R, P, I> {
    pub settings_service: Arc<SettingsService<R, P, I>>,
}

impl<R, P, I> Clone for AppState<R, P, I> {
    fn clone(&self) -> Self {
        Self {
            settings_service: Arc::clone(&self.settings_service),
        }
    }
}

impl<R, P, I> AppState<R, P, I>
where
    R: SettingsRepository + Send + Sync + 'static,
    P: BrokerProbe + Send + Sync + 'static,
    I: SoftwareInventory + Send + Sync + 'static,
{
    pub fn new(settings_service: SettingsService<R, P, I>) -> Self {
        Self::from_arc(Arc::new(settings_service))
    }

    /// Build the state around a service that is shared elsewhere too.
    pub fn from_arc(settings_service: Arc<SettingsService<R, P, I>>) -> Self {
        Self { settings_service }
    }
}
