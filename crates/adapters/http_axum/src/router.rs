//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use mqttsync_app::ports::{BrokerProbe, SettingsRepository, SoftwareInventory};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the settings API under `/api/mqtt` and the widget endpoints under
/// `/api/widgets/mqtt`. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<R, P, I>(state: AppState<R, P, I>) -> Router
where
    R: SettingsRepository + Send + Sync + 'static,
    P: BrokerProbe + Send + Sync + 'static,
    I: SoftwareInventory + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/mqtt", crate::api::routes())
        .nest("/api/widgets/mqtt", crate::widgets::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use mqttsync_app::services::settings_service::SettingsService;
    use mqttsync_domain::config::{ConfigRecord, TestRequest};
    use mqttsync_domain::dependency::SoftwareInfo;
    use mqttsync_domain::error::MqttSyncError;
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use tower::ServiceExt;

    #[derive(Default)]
    struct StubRepo {
        record: Mutex<Option<ConfigRecord>>,
        broken: bool,
    }

    struct StubProbe;
    struct StubInventory;

    impl SettingsRepository for StubRepo {
        async fn load(&self) -> Result<Option<ConfigRecord>, MqttSyncError> {
            if self.broken {
                return Err(MqttSyncError::Storage("disk full".into()));
            }
            Ok(self.record.lock().unwrap().clone())
        }

        async fn save(&self, record: ConfigRecord) -> Result<ConfigRecord, MqttSyncError> {
            if self.broken {
                return Err(MqttSyncError::Storage("disk full".into()));
            }
            *self.record.lock().unwrap() = Some(record.clone());
            Ok(record)
        }
    }

    impl BrokerProbe for StubProbe {
        async fn probe(&self, request: TestRequest) -> Result<(), MqttSyncError> {
            if request.broker == "10.0.0.5" {
                Ok(())
            } else {
                Err(MqttSyncError::Probe("Connection refused".into()))
            }
        }
    }

    impl SoftwareInventory for StubInventory {
        async fn list(&self) -> Result<Vec<SoftwareInfo>, MqttSyncError> {
            Ok(vec![
                SoftwareInfo::new("mosquitto_pub").with("version", "2.0.18"),
                SoftwareInfo::new("ffmpeg"),
            ])
        }
    }

    fn app_with(repo: StubRepo) -> Router {
        build(AppState::new(SettingsService::new(
            repo,
            StubProbe,
            StubInventory,
        )))
    }

    fn app() -> Router {
        app_with(StubRepo::default())
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_save_record_and_ask_for_restart() {
        let response = app()
            .oneshot(post_json(
                "/api/mqtt/save",
                &json!({
                    "mqtt_enabled": true,
                    "mqtt_broker": "10.0.0.5",
                    "mqtt_port": 1883,
                    "mqtt_user": "",
                    "mqtt_password": "",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["restart_required"], true);
    }

    #[tokio::test]
    async fn should_answer_malformed_save_body_with_failure_json() {
        let response = app()
            .oneshot(post_json("/api/mqtt/save", &json!({"mqtt_port": "abc"})))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        let body = read_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn should_hide_storage_details_on_save_failure() {
        let app = app_with(StubRepo {
            broken: true,
            ..StubRepo::default()
        });
        let response = app
            .oneshot(post_json("/api/mqtt/save", &json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert_eq!(body["error"], "internal server error");
    }

    #[tokio::test]
    async fn should_report_successful_connection_test() {
        let response = app()
            .oneshot(post_json(
                "/api/mqtt/test",
                &json!({"broker": "10.0.0.5", "port": 1883, "user": "", "password": ""}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["success"], true);
    }

    #[tokio::test]
    async fn should_report_unreachable_broker_as_regular_answer() {
        let response = app()
            .oneshot(post_json(
                "/api/mqtt/test",
                &json!({"broker": "10.0.0.9", "port": 1883}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Connection refused");
    }

    #[tokio::test]
    async fn should_reject_test_with_invalid_port() {
        let response = app()
            .oneshot(post_json(
                "/api/mqtt/test",
                &json!({"broker": "10.0.0.5", "port": 0}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "port 0 is not a valid TCP port");
    }

    #[tokio::test]
    async fn should_summarize_stored_configuration() {
        let app = app();
        app.clone()
            .oneshot(post_json(
                "/api/mqtt/save",
                &json!({"mqtt_enabled": true, "mqtt_broker": "mqtt.local", "mqtt_user": "hub", "mqtt_password": "pw"}),
            ))
            .await
            .unwrap();

        let body = read_json(app.oneshot(get("/api/mqtt/status")).await.unwrap()).await;
        assert_eq!(
            body,
            json!({
                "enabled": true,
                "broker": "mqtt.local",
                "port": 1883,
                "authenticated": true,
                "status": "active",
            })
        );
    }

    #[tokio::test]
    async fn should_serve_settings_fragment_as_html() {
        let response = app()
            .oneshot(get("/api/widgets/mqtt/settings"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("id=\"mqtt_broker\""));
    }

    #[tokio::test]
    async fn should_serve_status_widget_payload() {
        let response = app()
            .oneshot(get("/api/widgets/mqtt/status"))
            .await
            .unwrap();

        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["service"], "mqtt");
        assert_eq!(body["status"], "inactive");
        assert_eq!(body["running"], false);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn should_serve_only_mqtt_dependencies() {
        let response = app()
            .oneshot(get("/api/widgets/mqtt/dependencies"))
            .await
            .unwrap();

        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(
            body["software"],
            json!([{"name": "mosquitto_pub", "version": "2.0.18"}])
        );
    }
}
