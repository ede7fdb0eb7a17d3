//! Status widget payload.

use axum::Json;
use axum::extract::State;

use mqttsync_app::ports::{BrokerProbe, SettingsRepository, SoftwareInventory};
use mqttsync_domain::response::StatusPayload;
use mqttsync_domain::time::now;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/widgets/mqtt/status`
pub async fn payload<R, P, I>(
    State(state): State<AppState<R, P, I>>,
) -> Result<Json<StatusPayload>, ApiError>
where
    R: SettingsRepository + Send + Sync + 'static,
    P: BrokerProbe + Send + Sync + 'static,
    I: SoftwareInventory + Send + Sync + 'static,
{
    let status = state.settings_service.status().await?;
    Ok(Json(StatusPayload {
        success: true,
        service: "mqtt".to_string(),
        status,
        timestamp: Some(now()),
    }))
}
