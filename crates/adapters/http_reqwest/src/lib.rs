//! # mqttsync-adapter-http-reqwest
//!
//! Client side of the widget endpoints, implementing
//! [`SettingsGateway`](mqttsync_app::ports::SettingsGateway) with `reqwest`.
//!
//! JSON bodies are read whatever the status code: the endpoints answer a
//! rejected request with `{success: false, error}` and a 4xx/5xx status,
//! and the form wants the server's text in that case. Only a request that
//! fails or a body that is not the expected JSON becomes a transport error.

use std::future::Future;
use std::time::Duration;

use mqttsync_app::ports::SettingsGateway;
use mqttsync_domain::config::{ConfigRecord, TestRequest};
use mqttsync_domain::dependency::SoftwareInfo;
use mqttsync_domain::error::FormError;
use mqttsync_domain::response::{
    DependenciesPayload, SaveAck, SaveResponse, StatusPayload, TestResponse,
};
use mqttsync_domain::status::ServiceStatus;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

const SETTINGS_WIDGET_PATH: &str = "api/widgets/mqtt/settings";
const SAVE_PATH: &str = "api/mqtt/save";
const TEST_PATH: &str = "api/mqtt/test";
const STATUS_WIDGET_PATH: &str = "api/widgets/mqtt/status";
const DEPENDENCIES_WIDGET_PATH: &str = "api/widgets/mqtt/dependencies";

/// Where and how to reach the widget endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend, e.g. `http://127.0.0.1:8080`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Errors raised while building the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid base url")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unable to build http client")]
    Client(#[from] reqwest::Error),
}

/// [`SettingsGateway`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSettingsGateway {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpSettingsGateway {
    /// Build a gateway from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the base URL does not parse or the HTTP
    /// client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, FormError> {
        self.base_url.join(path).map_err(FormError::transport)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FormError> {
        let status = response.status();
        response.json::<T>().await.map_err(|err| {
            tracing::warn!(%status, error = %err, "unexpected response body");
            FormError::transport(err)
        })
    }
}

impl SettingsGateway for HttpSettingsGateway {
    fn load_settings_widget(&self) -> impl Future<Output = Result<String, FormError>> + Send {
        let http = self.http.clone();
        let url = self.endpoint(SETTINGS_WIDGET_PATH);
        async move {
            let response = http
                .get(url?)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(FormError::transport)?;
            response.text().await.map_err(FormError::transport)
        }
    }

    fn save(
        &self,
        record: ConfigRecord,
    ) -> impl Future<Output = Result<SaveAck, FormError>> + Send {
        let http = self.http.clone();
        let url = self.endpoint(SAVE_PATH);
        async move {
            let response = http
                .post(url?)
                .json(&record)
                .send()
                .await
                .map_err(FormError::transport)?;
            Self::read_json::<SaveResponse>(response)
                .await?
                .into_result()
        }
    }

    fn test_connection(
        &self,
        request: TestRequest,
    ) -> impl Future<Output = Result<(), FormError>> + Send {
        let http = self.http.clone();
        let url = self.endpoint(TEST_PATH);
        async move {
            let response = http
                .post(url?)
                .json(&request)
                .send()
                .await
                .map_err(FormError::transport)?;
            Self::read_json::<TestResponse>(response)
                .await?
                .into_result()
        }
    }

    fn fetch_status(&self) -> impl Future<Output = Result<ServiceStatus, FormError>> + Send {
        let http = self.http.clone();
        let url = self.endpoint(STATUS_WIDGET_PATH);
        async move {
            let response = http
                .get(url?)
                .send()
                .await
                .map_err(FormError::transport)?;
            let payload = Self::read_json::<StatusPayload>(response).await?;
            if payload.success {
                Ok(payload.status)
            } else {
                Err(FormError::application(None))
            }
        }
    }

    fn fetch_dependencies(
        &self,
    ) -> impl Future<Output = Result<Vec<SoftwareInfo>, FormError>> + Send {
        let http = self.http.clone();
        let url = self.endpoint(DEPENDENCIES_WIDGET_PATH);
        async move {
            let response = http
                .get(url?)
                .send()
                .await
                .map_err(FormError::transport)?;
            let payload = Self::read_json::<DependenciesPayload>(response).await?;
            if payload.success {
                Ok(payload.software)
            } else {
                Err(FormError::application(None))
            }
        }
    }
}
