use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use serde::Serialize;
use serde_json::Value;

use super::AppState;
use super::error::{ApiError, EMPTY_SEGMENT, INVALID_REQUEST};

#[derive(Debug, Serialize)]
pub struct AnalyzeSuccess {
    pub success: bool,
    pub result: String,
    pub original: String,
}

/// POST /analyze: relay one segment to upstream and return its analysis.
///
/// The body is read raw so malformed JSON, and a body that cannot be read at
/// all, get our own 400 instead of axum's plain-text extractor rejection.
pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnalyzeSuccess>, ApiError> {
    let body = body.map_err(|e| {
        tracing::warn!("failed to read request body: {}", e);
        ApiError::InvalidInput(INVALID_REQUEST)
    })?;
    let segment = parse_segment(&body)?;

    if !state.upstream.is_configured() {
        return Err(ApiError::Configuration);
    }

    let result = state.upstream.analyze(&segment).await?;

    Ok(Json(AnalyzeSuccess {
        success: true,
        result,
        original: segment,
    }))
}

/// Extract the trimmed `segment` from a request body.
///
/// Missing `segment` is treated as empty. Anything that is not a non-empty
/// JSON object, or a `segment` that is not a string, is invalid.
pub fn parse_segment(body: &[u8]) -> Result<String, ApiError> {
    let data: Value =
        serde_json::from_slice(body).map_err(|_| ApiError::InvalidInput(INVALID_REQUEST))?;

    let fields = match data {
        Value::Object(fields) if !fields.is_empty() => fields,
        _ => return Err(ApiError::InvalidInput(INVALID_REQUEST)),
    };

    let segment = match fields.get("segment") {
        None => "",
        Some(Value::String(s)) => s.trim(),
        Some(_) => return Err(ApiError::InvalidInput(INVALID_REQUEST)),
    };

    if segment.is_empty() {
        return Err(ApiError::InvalidInput(EMPTY_SEGMENT));
    }
    Ok(segment.to_string())
}
