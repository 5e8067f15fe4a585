//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::pipeline::correction::CorrectionError;
use crate::pipeline::extraction::ExtractionError;
use crate::session::SessionError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Unsupported upload type: {0}")]
    UnsupportedMedia(String),
    #[error("Upload too large")]
    PayloadTooLarge { max_bytes: usize },
    #[error("No text extracted yet")]
    NoExtractedText,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Service not configured: {0}")]
    Config(String),
    #[error("Upstream service failure: {0}")]
    Upstream(String),
    #[error("Upstream response unusable: {0}")]
    UpstreamParse(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::UnsupportedMedia(detail) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA",
                detail.clone(),
            ),
            ApiError::PayloadTooLarge { max_bytes } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                format!("Upload too large. Maximum {}MB.", max_bytes / (1024 * 1024)),
            ),
            ApiError::NoExtractedText => (
                StatusCode::CONFLICT,
                "NO_TEXT",
                "Extract text from an image first.".to_string(),
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::Config(detail) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NOT_CONFIGURED",
                detail.clone(),
            ),
            ApiError::Upstream(detail) => (StatusCode::BAD_GATEWAY, "UPSTREAM", detail.clone()),
            ApiError::UpstreamParse(detail) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_PARSE",
                detail.clone(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ExtractionError> for ApiError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFormat => ApiError::UnsupportedMedia(err.to_string()),
            ExtractionError::ImageProcessing(_) => ApiError::BadRequest(err.to_string()),
            ExtractionError::RemoteUnreachable(_)
            | ExtractionError::RemoteTimeout(_)
            | ExtractionError::RemoteStatus { .. }
            | ExtractionError::RemoteNoResult(_) => ApiError::Upstream(err.to_string()),
            ExtractionError::ResponseParsing(_) => ApiError::UpstreamParse(err.to_string()),
            // Local-engine errors are swallowed by the fallback and should
            // never surface; if one does, treat it as internal.
            ExtractionError::OcrInit(_)
            | ExtractionError::OcrProcessing(_)
            | ExtractionError::TessdataNotFound(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<CorrectionError> for ApiError {
    fn from(err: CorrectionError) -> Self {
        match err {
            CorrectionError::MissingCredential => ApiError::Config(err.to_string()),
            CorrectionError::EmptyInput => ApiError::BadRequest(err.to_string()),
            CorrectionError::Unreachable(_)
            | CorrectionError::Timeout(_)
            | CorrectionError::Status { .. } => ApiError::Upstream(err.to_string()),
            CorrectionError::MissingContent | CorrectionError::ResponseParsing(_) => {
                ApiError::UpstreamParse(err.to_string())
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
