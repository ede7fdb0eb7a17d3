//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use mqttsync_domain::error::MqttSyncError;

/// JSON error body, shaped like the `success: false` answers the form reads.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

/// Maps failures to an HTTP response with an appropriate status code.
pub enum ApiError {
    /// A use-case failed.
    Service(MqttSyncError),
    /// The request body could not be read.
    BadRequest(String),
    /// An HTML fragment failed to render.
    Render(askama::Error),
}

impl From<MqttSyncError> for ApiError {
    fn from(err: MqttSyncError) -> Self {
        Self::Service(err)
    }
}

impl From<askama::Error> for ApiError {
    fn from(err: askama::Error) -> Self {
        Self::Render(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Service(MqttSyncError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Service(MqttSyncError::Probe(err)) => (StatusCode::BAD_GATEWAY, err.to_string()),
            Self::Render(err) => {
                tracing::error!(error = %err, "template rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::Service(err) => {
                tracing::error!(error = %err, source = ?std::error::Error::source(&err), "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_render_failure_to_internal_error() {
        let response = ApiError::from(askama::Error::Fmt(std::fmt::Error)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn should_map_validation_failure_to_bad_request() {
        let err = MqttSyncError::Validation(
            mqttsync_domain::error::ValidationError::PortOutOfRange(0),
        );
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
