//! Wire payloads returned by the widget endpoints.

use serde::{Deserialize, Serialize};

use crate::dependency::SoftwareInfo;
use crate::error::FormError;
use crate::status::ServiceStatus;
use crate::time::Timestamp;

/// Body of `POST /api/mqtt/save` responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub restart_required: bool,
}

impl SaveResponse {
    /// A successful save.
    #[must_use]
    pub fn saved(restart_required: bool) -> Self {
        Self {
            success: true,
            message: Some("MQTT configuration saved".to_string()),
            error: None,
            restart_required,
        }
    }

    /// Interpret the body as seen by the form.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Application`] when `success` is `false`.
    pub fn into_result(self) -> Result<SaveAck, FormError> {
        if self.success {
            Ok(SaveAck {
                restart_required: self.restart_required,
            })
        } else {
            Err(FormError::application(self.error))
        }
    }
}

/// Outcome of an accepted save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveAck {
    /// The managed service must restart for the change to apply.
    pub restart_required: bool,
}

/// Body of `POST /api/mqtt/test` responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestResponse {
    /// The broker accepted the connection.
    #[must_use]
    pub fn connected() -> Self {
        Self {
            success: true,
            message: Some("Connection successful".to_string()),
            error: None,
        }
    }

    /// The broker could not be reached.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }

    /// Interpret the body as seen by the form.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Application`] when `success` is `false`.
    pub fn into_result(self) -> Result<(), FormError> {
        if self.success {
            Ok(())
        } else {
            Err(FormError::application(self.error))
        }
    }
}

/// Body of `GET /api/widgets/mqtt/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub service: String,
    #[serde(flatten)]
    pub status: ServiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

/// Body of `GET /api/widgets/mqtt/dependencies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependenciesPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub software: Vec<SoftwareInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

/// Body of `GET /api/mqtt/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSummary {
    pub enabled: bool,
    pub broker: String,
    pub port: i64,
    pub authenticated: bool,
    pub status: String,
}
