//! Broker probe on top of rumqttc.

use std::future::Future;
use std::time::Duration;

use rumqttc::{AsyncClient, Event, MqttOptions, Packet};

use mqttsync_app::ports::BrokerProbe;
use mqttsync_domain::config::TestRequest;
use mqttsync_domain::error::MqttSyncError;

use crate::config::ProbeConfig;
use crate::error::ProbeError;

/// [`BrokerProbe`] that opens one MQTT session and waits for the CONNACK.
#[derive(Debug, Clone, Default)]
pub struct RumqttcProbe {
    config: ProbeConfig,
}

impl RumqttcProbe {
    #[must_use]
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    fn options(&self, request: &TestRequest, port: u16) -> MqttOptions {
        let mut options = MqttOptions::new(&self.config.client_id, request.broker.trim(), port);
        options.set_keep_alive(Duration::from_secs(self.config.keep_alive_secs));
        options.set_clean_session(true);
        match request.credentials() {
            Some((user, password)) => {
                tracing::debug!("using credentials for test connection");
                options.set_credentials(user, password);
            }
            None => tracing::debug!("no credentials for test connection"),
        }
        options
    }
}

async fn handshake(options: MqttOptions) -> Result<(), ProbeError> {
    let (_client, mut eventloop) = AsyncClient::new(options, 10);
    loop {
        match eventloop.poll().await? {
            Event::Incoming(Packet::ConnAck(ack)) => {
                tracing::debug!(code = ?ack.code, "broker answered");
                return Ok(());
            }
            other => tracing::trace!(event = ?other, "ignoring event before connack"),
        }
    }
}

impl BrokerProbe for RumqttcProbe {
    fn probe(
        &self,
        request: TestRequest,
    ) -> impl Future<Output = Result<(), MqttSyncError>> + Send {
        let timeout = Duration::from_secs(self.config.timeout_secs);
        let options = request
            .validate()
            .map(|port| self.options(&request, port));
        async move {
            let options = options.map_err(MqttSyncError::from)?;
            let (host, port) = options.broker_address();
            tracing::info!(%host, port, "testing MQTT broker connection");

            match tokio::time::timeout(timeout, handshake(options)).await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(err)) => {
                    tracing::info!(%host, port, error = %err, "MQTT broker unreachable");
                    Err(err.into())
                }
                Err(_) => Err(ProbeError::Timeout(timeout).into()),
            }
        }
    }
}
