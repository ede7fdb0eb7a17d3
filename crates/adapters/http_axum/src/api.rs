//! JSON API handlers.

#[allow(clippy::missing_errors_doc)]
pub mod mqtt;

use axum::Router;
use axum::routing::{get, post};

use mqttsync_app::ports::{BrokerProbe, SettingsRepository, SoftwareInventory};

use crate::state::AppState;

/// Build the `/api/mqtt` sub-router.
pub fn routes<R, P, I>() -> Router<AppState<R, P, I>>
where
    R: SettingsRepository + Send + Sync + 'static,
    P: BrokerProbe + Send + Sync + 'static,
    I: SoftwareInventory + Send + Sync + 'static,
{
    Router::new()
        .route("/save", post(mqtt::save::<R, P, I>))
        .route("/test", post(mqtt::test::<R, P, I>))
        .route("/status", get(mqtt::status::<R, P, I>))
}
