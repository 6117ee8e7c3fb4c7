use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::json;

use dentiq_core::CoreError;
use dentiq_storage::StorageError;

/// API-facing error wrapper mapping domain and storage failures to HTTP
/// status codes and a JSON problem body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Storage(e) => match e {
                StorageError::NotFound { .. } => StatusCode::NOT_FOUND,
                StorageError::AlreadyExists { .. } => StatusCode::CONFLICT,
                StorageError::InvalidData { .. } => StatusCode::BAD_REQUEST,
                StorageError::ConnectionError { .. } | StorageError::Internal { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Core(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Storage(e) => match e.category() {
                dentiq_storage::ErrorCategory::NotFound => "not_found",
                dentiq_storage::ErrorCategory::Conflict => "conflict",
                dentiq_storage::ErrorCategory::Validation => "invalid",
                _ => "internal",
            },
            Self::Core(e) if e.is_client_error() => "invalid",
            Self::Core(_) => "internal",
            Self::BadRequest(_) => "invalid",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(StorageError::not_found("Visit", "v-1"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let err = ApiError::from(StorageError::already_exists("Visit", "v-1"));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_core_client_error_maps_to_400() {
        let err = ApiError::from(CoreError::invalid_visit_state("NOPE"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "invalid");
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        let err = ApiError::from(StorageError::connection_error("down"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "internal");
    }
}
