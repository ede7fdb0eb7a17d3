//! Gateway port — the widget endpoints as seen from the settings form.

use std::future::Future;

use mqttsync_domain::config::{ConfigRecord, TestRequest};
use mqttsync_domain::dependency::SoftwareInfo;
use mqttsync_domain::error::FormError;
use mqttsync_domain::response::SaveAck;
use mqttsync_domain::status::ServiceStatus;

/// Remote endpoints the widgets talk to.
///
/// Every method issues exactly one request. A body with `success: false`
/// comes back as [`FormError::Application`]; a network failure or a body
/// that is not the expected JSON comes back as [`FormError::Transport`].
pub trait SettingsGateway: Send + Sync {
    /// `GET /api/widgets/mqtt/settings` — the settings form markup.
    fn load_settings_widget(&self) -> impl Future<Output = Result<String, FormError>> + Send;

    /// `POST /api/mqtt/save`.
    fn save(&self, record: ConfigRecord)
    -> impl Future<Output = Result<SaveAck, FormError>> + Send;

    /// `POST /api/mqtt/test`.
    fn test_connection(
        &self,
        request: TestRequest,
    ) -> impl Future<Output = Result<(), FormError>> + Send;

    /// `GET /api/widgets/mqtt/status`.
    fn fetch_status(&self) -> impl Future<Output = Result<ServiceStatus, FormError>> + Send;

    /// `GET /api/widgets/mqtt/dependencies`.
    fn fetch_dependencies(
        &self,
    ) -> impl Future<Output = Result<Vec<SoftwareInfo>, FormError>> + Send;
}
