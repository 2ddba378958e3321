//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Anything convertible into
//! `AppError` (including `UploadError` from the pipeline) renders with the same status,
//! body shape and logging. Whether details are shown comes from `Config::is_production`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docrec_core::{AppError, ErrorMetadata, LogLevel};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether retrying the same request may succeed
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: both the trait and `AppError` live in other crates)
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    /// Drop `details` and `error_type` from the body even for non-sensitive errors
    pub production: bool,
}

impl HttpAppError {
    pub fn new(error: impl Into<AppError>, production: bool) -> Self {
        Self {
            error: error.into(),
            production,
        }
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.error;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let show_details = !self.production && !app_error.is_sensitive();
        let body = ErrorResponse {
            error: app_error.client_message(),
            details: show_details.then(|| app_error.detailed_message()),
            error_type: show_details.then(|| app_error.error_type().to_string()),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use docrec_processing::UploadError;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_bad_request_with_details() {
        let err = HttpAppError::new(UploadError::Validation("empty filename".to_string()), false);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "empty filename");
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["error_type"], "InvalidInput");
        assert_eq!(body["details"], "Invalid input: empty filename");
    }

    #[tokio::test]
    async fn test_production_hides_details() {
        let err = HttpAppError::new(UploadError::Validation("empty filename".to_string()), true);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "empty filename");
        assert!(body.get("details").is_none());
        assert!(body.get("error_type").is_none());
    }

    #[tokio::test]
    async fn test_sensitive_error_hides_details_outside_production() {
        let err = HttpAppError::new(
            AppError::Staging("Failed to create file /tmp/docrec_uploads/x.png".to_string()),
            false,
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to store upload");
        assert!(body.get("details").is_none());
        assert!(!body.to_string().contains("/tmp"));
    }
}
