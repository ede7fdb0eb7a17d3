//! Settings service — backend use-cases behind the widget endpoints.

use mqttsync_domain::config::{ConfigRecord, TestRequest};
use mqttsync_domain::dependency::SoftwareInfo;
use mqttsync_domain::error::MqttSyncError;
use mqttsync_domain::response::{ConfigSummary, SaveAck};
use mqttsync_domain::status::ServiceStatus;

use crate::ports::{BrokerProbe, SettingsRepository, SoftwareInventory};

/// Application service for the MQTT configuration.
pub struct SettingsService<R, P, I> {
    repo: R,
    probe: P,
    inventory: I,
}

impl<R, P, I> SettingsService<R, P, I>
where
    R: SettingsRepository,
    P: BrokerProbe,
    I: SoftwareInventory,
{
    pub fn new(repo: R, probe: P, inventory: I) -> Self {
        Self {
            repo,
            probe,
            inventory,
        }
    }

    /// The stored configuration, or the defaults when nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn load(&self) -> Result<ConfigRecord, MqttSyncError> {
        Ok(self.repo.load().await?.unwrap_or_default())
    }

    /// Persist the configuration as sent by the form.
    ///
    /// No range check is applied to the port; the form is the source of
    /// truth. The publishing service only reads its configuration at start,
    /// so every accepted save asks for a restart.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn save(&self, record: ConfigRecord) -> Result<SaveAck, MqttSyncError> {
        let saved = self.repo.save(record).await?;
        tracing::info!(
            enabled = saved.enabled,
            broker = %saved.broker,
            port = saved.port,
            authenticated = saved.is_authenticated(),
            "MQTT configuration saved"
        );
        Ok(SaveAck {
            restart_required: true,
        })
    }

    /// Check that a broker accepts the given connection parameters.
    ///
    /// # Errors
    ///
    /// Returns [`MqttSyncError::Validation`] when the request cannot name a
    /// socket, or [`MqttSyncError::Probe`] when the broker is unreachable or
    /// refuses the connection.
    pub async fn test_connection(&self, request: TestRequest) -> Result<(), MqttSyncError> {
        request.validate()?;
        tracing::debug!(broker = %request.broker, port = request.port, "probing MQTT broker");
        self.probe.probe(request).await
    }

    /// Running state of the publishing service.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn status(&self) -> Result<ServiceStatus, MqttSyncError> {
        let record = self.load().await?;
        Ok(ServiceStatus::from_enabled(record.enabled))
    }

    /// Short description of the stored configuration, without secrets.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn summary(&self) -> Result<ConfigSummary, MqttSyncError> {
        let record = self.load().await?;
        Ok(ConfigSummary {
            status: ServiceStatus::from_enabled(record.enabled).status,
            authenticated: record.is_authenticated(),
            enabled: record.enabled,
            broker: record.broker,
            port: record.port,
        })
    }

    /// Installed software that relates to MQTT.
    ///
    /// # Errors
    ///
    /// Returns an inventory error when the host listing fails.
    pub async fn dependencies(&self) -> Result<Vec<SoftwareInfo>, MqttSyncError> {
        let software = self.inventory.list().await?;
        Ok(software
            .into_iter()
            .filter(SoftwareInfo::is_mqtt_related)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mqttsync_domain::error::ValidationError;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemorySettingsRepo {
        record: Mutex<Option<ConfigRecord>>,
    }

    impl SettingsRepository for InMemorySettingsRepo {
        fn load(
            &self,
        ) -> impl Future<Output = Result<Option<ConfigRecord>, MqttSyncError>> + Send {
            let record = self.record.lock().unwrap().clone();
            async { Ok(record) }
        }

        fn save(
            &self,
            record: ConfigRecord,
        ) -> impl Future<Output = Result<ConfigRecord, MqttSyncError>> + Send {
            *self.record.lock().unwrap() = Some(record.clone());
            async { Ok(record) }
        }
    }

    #[derive(Default)]
    struct RecordingProbe {
        refuse: bool,
        probed: Mutex<Vec<TestRequest>>,
    }

    impl BrokerProbe for RecordingProbe {
        fn probe(
            &self,
            request: TestRequest,
        ) -> impl Future<Output = Result<(), MqttSyncError>> + Send {
            self.probed.lock().unwrap().push(request);
            let refuse = self.refuse;
            async move {
                if refuse {
                    Err(MqttSyncError::Probe("Connection refused".into()))
                } else {
                    Ok(())
                }
            }
        }
    }

    struct FixedInventory(Vec<SoftwareInfo>);

    impl SoftwareInventory for FixedInventory {
        fn list(&self) -> impl Future<Output = Result<Vec<SoftwareInfo>, MqttSyncError>> + Send {
            let software = self.0.clone();
            async { Ok(software) }
        }
    }

    type TestService = SettingsService<InMemorySettingsRepo, RecordingProbe, FixedInventory>;

    fn make_service() -> TestService {
        SettingsService::new(
            InMemorySettingsRepo::default(),
            RecordingProbe::default(),
            FixedInventory(vec![]),
        )
    }

    fn record() -> ConfigRecord {
        ConfigRecord {
            enabled: true,
            broker: "10.0.0.5".to_string(),
            port: 1883,
            user: "admin".to_string(),
            password: "secret".to_string(),
        }
    }

    fn request(port: i64) -> TestRequest {
        TestRequest {
            broker: "10.0.0.5".to_string(),
            port,
            ..TestRequest::default()
        }
    }

    #[tokio::test]
    async fn should_load_defaults_when_nothing_saved() {
        let svc = make_service();
        let loaded = svc.load().await.unwrap();
        assert_eq!(loaded, ConfigRecord::default());
        assert_eq!(loaded.port, 1883);
    }

    #[tokio::test]
    async fn should_save_and_reload_record() {
        let svc = make_service();
        let ack = svc.save(record()).await.unwrap();
        assert!(ack.restart_required);
        assert_eq!(svc.load().await.unwrap(), record());
    }

    #[tokio::test]
    async fn should_store_out_of_range_port_verbatim() {
        let svc = make_service();
        let mut rec = record();
        rec.port = 0;
        svc.save(rec).await.unwrap();
        assert_eq!(svc.load().await.unwrap().port, 0);
    }

    #[tokio::test]
    async fn should_reject_test_with_port_out_of_range() {
        let svc = make_service();
        let result = svc.test_connection(request(70_000)).await;
        assert!(matches!(
            result,
            Err(MqttSyncError::Validation(ValidationError::PortOutOfRange(
                70_000
            )))
        ));
        assert!(svc.probe.probed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_test_with_empty_broker() {
        let svc = make_service();
        let result = svc.test_connection(TestRequest::default()).await;
        assert!(matches!(
            result,
            Err(MqttSyncError::Validation(ValidationError::EmptyBroker))
        ));
    }

    #[tokio::test]
    async fn should_probe_valid_request_once() {
        let svc = make_service();
        svc.test_connection(request(1883)).await.unwrap();
        assert_eq!(svc.probe.probed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_surface_probe_failure() {
        let svc = SettingsService::new(
            InMemorySettingsRepo::default(),
            RecordingProbe {
                refuse: true,
                ..RecordingProbe::default()
            },
            FixedInventory(vec![]),
        );
        let err = svc.test_connection(request(1883)).await.unwrap_err();
        assert_eq!(err.to_string(), "Connection refused");
    }

    #[tokio::test]
    async fn should_report_status_from_enabled_flag() {
        let svc = make_service();
        assert_eq!(svc.status().await.unwrap(), ServiceStatus::inactive());

        svc.save(record()).await.unwrap();
        assert_eq!(svc.status().await.unwrap(), ServiceStatus::active());
    }

    #[tokio::test]
    async fn should_summarize_without_password() {
        let svc = make_service();
        svc.save(record()).await.unwrap();

        let summary = svc.summary().await.unwrap();
        assert!(summary.enabled);
        assert!(summary.authenticated);
        assert_eq!(summary.status, "active");
        assert!(!serde_json::to_string(&summary).unwrap().contains("secret"));
    }

    #[tokio::test]
    async fn should_keep_only_mqtt_dependencies() {
        let svc = SettingsService::new(
            InMemorySettingsRepo::default(),
            RecordingProbe::default(),
            FixedInventory(vec![
                SoftwareInfo::new("ffmpeg"),
                SoftwareInfo::new("mosquitto_pub").with("version", "2.0.18"),
                SoftwareInfo::new("python-paho-mqtt"),
            ]),
        );

        let names: Vec<String> = svc
            .dependencies()
            .await
            .unwrap()
            .into_iter()
            .map(|info| info.name)
            .collect();
        assert_eq!(names, vec!["mosquitto_pub", "python-paho-mqtt"]);
    }
}
