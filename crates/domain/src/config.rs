//! Configuration record — the MQTT settings persisted by the backend.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Port used when the form holds nothing parseable.
pub const DEFAULT_PORT: i64 = 1883;

/// Flat MQTT configuration as sent to `POST /api/mqtt/save`.
///
/// `user` and `password` are empty whenever authentication is disabled.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRecord {
    #[serde(rename = "mqtt_enabled")]
    pub enabled: bool,
    #[serde(rename = "mqtt_broker")]
    pub broker: String,
    #[serde(rename = "mqtt_port")]
    pub port: i64,
    #[serde(rename = "mqtt_user")]
    pub user: String,
    #[serde(rename = "mqtt_password")]
    pub password: String,
}

impl Default for ConfigRecord {
    fn default() -> Self {
        Self {
            enabled: false,
            broker: String::new(),
            port: DEFAULT_PORT,
            user: String::new(),
            password: String::new(),
        }
    }
}

impl ConfigRecord {
    /// Whether the record carries a user name (authentication in use).
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.user.is_empty()
    }

    /// Connection parameters of this record as a [`TestRequest`].
    #[must_use]
    pub fn test_request(&self) -> TestRequest {
        TestRequest {
            broker: self.broker.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for ConfigRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigRecord")
            .field("enabled", &self.enabled)
            .field("broker", &self.broker)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &redacted(&self.password))
            .finish()
    }
}

/// Throwaway connection parameters for `POST /api/mqtt/test`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestRequest {
    pub broker: String,
    pub port: i64,
    pub user: String,
    pub password: String,
}

impl Default for TestRequest {
    fn default() -> Self {
        Self {
            broker: String::new(),
            port: DEFAULT_PORT,
            user: String::new(),
            password: String::new(),
        }
    }
}

impl TestRequest {
    /// Check that the request can be turned into a socket address.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyBroker`] for a blank host and
    /// [`ValidationError::PortOutOfRange`] when the port is not `1..=65535`.
    pub fn validate(&self) -> Result<u16, ValidationError> {
        if self.broker.trim().is_empty() {
            return Err(ValidationError::EmptyBroker);
        }
        u16::try_from(self.port)
            .ok()
            .filter(|port| *port != 0)
            .ok_or(ValidationError::PortOutOfRange(self.port))
    }

    /// Credentials to present, if any.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.user.is_empty() {
            None
        } else {
            Some((self.user.as_str(), self.password.as_str()))
        }
    }
}

impl fmt::Debug for TestRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRequest")
            .field("broker", &self.broker)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &redacted(&self.password))
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "***" }
}

/// Parse the raw port input the way the form does.
///
/// Surrounding whitespace is ignored, an optional sign is honoured and the
/// leading run of digits is taken (`"1884abc"` is `1884`). Anything without a
/// leading digit, or too large for an `i64`, yields [`DEFAULT_PORT`]. No range
/// check is applied: `0` and negative values pass through.
#[must_use]
pub fn parse_port(raw: &str) -> i64 {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = unsigned
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(unsigned.len());

    match unsigned[..end].parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => DEFAULT_PORT,
    }
}
