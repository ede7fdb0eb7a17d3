//! JSON handlers for the MQTT configuration.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use mqttsync_app::ports::{BrokerProbe, SettingsRepository, SoftwareInventory};
use mqttsync_domain::config::{ConfigRecord, TestRequest};
use mqttsync_domain::error::MqttSyncError;
use mqttsync_domain::response::{ConfigSummary, SaveResponse, TestResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /api/mqtt/save`
pub async fn save<R, P, I>(
    State(state): State<AppState<R, P, I>>,
    body: Result<Json<ConfigRecord>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError>
where
    R: SettingsRepository + Send + Sync + 'static,
    P: BrokerProbe + Send + Sync + 'static,
    I: SoftwareInventory + Send + Sync + 'static,
{
    let Json(record) = body?;
    let ack = state.settings_service.save(record).await?;
    Ok(Json(SaveResponse::saved(ack.restart_required)))
}

/// `POST /api/mqtt/test`
///
/// An unreachable broker is a regular answer (`200`, `success: false`);
/// only unusable input and internal failures change the status code.
pub async fn test<R, P, I>(
    State(state): State<AppState<R, P, I>>,
    body: Result<Json<TestRequest>, JsonRejection>,
) -> Result<Json<TestResponse>, ApiError>
where
    R: SettingsRepository + Send + Sync + 'static,
    P: BrokerProbe + Send + Sync + 'static,
    I: SoftwareInventory + Send + Sync + 'static,
{
    let Json(request) = body?;
    match state.settings_service.test_connection(request).await {
        Ok(()) => Ok(Json(TestResponse::connected())),
        Err(MqttSyncError::Probe(err)) => {
            tracing::info!(error = %err, "MQTT connection test failed");
            Ok(Json(TestResponse::failed(err.to_string())))
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET /api/mqtt/status`
pub async fn status<R, P, I>(
    State(state): State<AppState<R, P, I>>,
) -> Result<Json<ConfigSummary>, ApiError>
where
    R: SettingsRepository + Send + Sync + 'static,
    P: BrokerProbe + Send + Sync + 'static,
    I: SoftwareInventory + Send + Sync + 'static,
{
    Ok(Json(state.settings_service.summary().await?))
}
