//! Widget endpoints: the settings form fragment and the read-only widgets.

#[allow(clippy::missing_errors_doc)]
pub mod dependencies;
#[allow(clippy::missing_errors_doc)]
pub mod settings;
#[allow(clippy::missing_errors_doc)]
pub mod status;

use axum::Router;
use axum::routing::get;

use mqttsync_app::ports::{BrokerProbe, SettingsRepository, SoftwareInventory};

use crate::state::AppState;

/// Build the `/api/widgets/mqtt` sub-router.
pub fn routes<R, P, I>() -> Router<AppState<R, P, I>>
where
    R: SettingsRepository + Send + Sync + 'static,
    P: BrokerProbe + Send + Sync + 'static,
    I: SoftwareInventory + Send + Sync + 'static,
{
    Router::new()
        .route("/settings", get(settings::fragment::<R, P, I>))
        .route("/status", get(status::payload::<R, P, I>))
        .route("/dependencies", get(dependencies::payload::<R, P, I>))
}
