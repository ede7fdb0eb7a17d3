//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into these via
//! `#[from]` or an explicit `From` impl at the port boundary.

use std::error::Error as StdError;

/// Boxed source error carried across port boundaries.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Backend-side error returned by application services.
#[derive(Debug, thiserror::Error)]
pub enum MqttSyncError {
    /// Input rejected before reaching any adapter.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The settings store failed.
    #[error("storage error")]
    Storage(#[source] BoxError),

    /// The broker could not be reached or refused the connection.
    #[error("{0}")]
    Probe(#[source] BoxError),

    /// The software inventory could not be read.
    #[error("inventory error")]
    Inventory(#[source] BoxError),
}

/// Reasons a record or request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The broker host is empty.
    #[error("broker must not be empty")]
    EmptyBroker,

    /// The port does not fit a TCP port number.
    #[error("port {0} is not a valid TCP port")]
    PortOutOfRange(i64),
}

/// Failure of a widget request as seen by the form controller.
///
/// Both kinds end in the same `Error` indicator state but carry distinct
/// user-facing messages.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The server answered with `success: false`.
    #[error("{message}")]
    Application { message: String },

    /// The request never produced a usable JSON answer.
    #[error("{0}")]
    Transport(#[source] BoxError),
}

impl FormError {
    /// Build an [`Application`](Self::Application) error, falling back to a
    /// generic text when the server sent none.
    #[must_use]
    pub fn application(message: Option<String>) -> Self {
        Self::Application {
            message: message.unwrap_or_else(|| "unknown error".to_string()),
        }
    }

    /// Wrap any error as a [`Transport`](Self::Transport) failure.
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport(err.into())
    }

    /// Whether the server itself rejected the request.
    #[must_use]
    pub fn is_application(&self) -> bool {
        matches!(self, Self::Application { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_server_text_for_application_error() {
        let err = FormError::application(Some("bad host".to_string()));
        assert_eq!(err.to_string(), "bad host");
        assert!(err.is_application());
    }

    #[test]
    fn should_fall_back_to_generic_text_when_server_sent_none() {
        let err = FormError::application(None);
        assert_eq!(err.to_string(), "unknown error");
    }

    #[test]
    fn should_display_source_text_for_transport_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = FormError::transport(io);
        assert_eq!(err.to_string(), "connection refused");
        assert!(!err.is_application());
    }

    #[test]
    fn should_convert_validation_error_into_sync_error() {
        let err: MqttSyncError = ValidationError::EmptyBroker.into();
        assert!(matches!(
            err,
            MqttSyncError::Validation(ValidationError::EmptyBroker)
        ));
    }

    #[test]
    fn should_display_probe_source() {
        let err = MqttSyncError::Probe("connection timed out".into());
        assert_eq!(err.to_string(), "connection timed out");
    }
}
