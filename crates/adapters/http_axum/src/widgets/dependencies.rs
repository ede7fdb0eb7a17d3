//! Dependencies widget payload.

use axum::Json;
use axum::extract::State;

use mqttsync_app::ports::{BrokerProbe, SettingsRepository, SoftwareInventory};
use mqttsync_domain::response::DependenciesPayload;
use mqttsync_domain::time::now;

use crate::state::AppState;

/// `GET /api/widgets/mqtt/dependencies`
///
/// A failing inventory yields an empty list; the widget then shows its
/// placeholder row.
pub async fn payload<R, P, I>(State(state): State<AppState<R, P, I>>) -> Json<DependenciesPayload>
where
    R: SettingsRepository + Send + Sync + 'static,
    P: BrokerProbe + Send + Sync + 'static,
    I: SoftwareInventory + Send + Sync + 'static,
{
    let software = state
        .settings_service
        .dependencies()
        .await
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "unable to list installed software");
            Vec::new()
        });

    Json(DependenciesPayload {
        success: true,
        software,
        timestamp: Some(now()),
    })
}
