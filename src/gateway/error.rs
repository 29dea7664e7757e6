use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::any::Any;
use tracing::{error, warn};

use crate::consts::missing_key_message;
use crate::upstream::UpstreamError;

pub const INVALID_REQUEST: &str = "Invalid request data";
pub const EMPTY_SEGMENT: &str = "Segment content cannot be empty";

/// Every way `/analyze` can fail, as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Body was not usable JSON or the segment was blank.
    InvalidInput(&'static str),
    /// No API key loaded at startup.
    Configuration,
    Upstream(UpstreamError),
    /// Anything else.
    Internal(String),
}

impl From<UpstreamError> for ApiError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::MissingApiKey => ApiError::Configuration,
            other => ApiError::Upstream(other),
        }
    }
}

impl ApiError {
    /// The one place error kinds map to HTTP status codes.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(UpstreamError::Status { code, .. }) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Upstream(UpstreamError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Configuration | ApiError::Upstream(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Caller-facing message. Never carries the raw upstream body.
    pub fn message(&self) -> String {
        match self {
            ApiError::InvalidInput(msg) => msg.to_string(),
            ApiError::Configuration | ApiError::Upstream(UpstreamError::MissingApiKey) => {
                missing_key_message()
            }
            ApiError::Upstream(UpstreamError::Status { code, .. }) => {
                format!("API request failed ({})", code)
            }
            ApiError::Upstream(UpstreamError::Format(_)) => "API response format abnormal".to_string(),
            ApiError::Upstream(UpstreamError::Timeout) => {
                "Request timeout, please try again".to_string()
            }
            ApiError::Upstream(UpstreamError::Network(detail)) => {
                format!("Network request exception: {}", detail)
            }
            ApiError::Upstream(UpstreamError::Decode(detail)) | ApiError::Internal(detail) => {
                format!("Server internal error: {}", detail)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        match &self {
            ApiError::InvalidInput(_) => warn!("rejected request: {}", message),
            ApiError::Upstream(e) => error!(status = status.as_u16(), "{}: {}", message, e),
            _ => error!(status = status.as_u16(), "{}", message),
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Turn a handler panic into the same JSON shape as every other failure.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "handler panicked".to_string()
    };
    ApiError::Internal(detail).into_response()
}
