use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::AppState;
use crate::consts::missing_key_message;

/// Upstream statuses that prove the endpoint is reachable. 401 and 429 count:
/// the probe checks the connection, not the key or the quota.
const REACHABLE_STATUSES: &[u16] = &[200, 401, 429];

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HealthReport {
    Connected { model: String, api_status: u16 },
    Error { message: String },
}

/// GET /health: probe upstream reachability.
///
/// Only a missing API key yields a non-200 status. Every upstream problem is
/// reported in the body so infrastructure checks do not flap.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    if !state.upstream.is_configured() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthReport::Error {
                message: missing_key_message(),
            }),
        );
    }

    let report = match state.upstream.probe().await {
        Ok(code) if REACHABLE_STATUSES.contains(&code) => HealthReport::Connected {
            model: state.config.model_name.clone(),
            api_status: code,
        },
        Ok(code) => HealthReport::Error {
            message: format!("API response abnormal: {}", code),
        },
        Err(e) => {
            tracing::warn!("health probe failed: {}", e);
            HealthReport::Error {
                message: format!("Connection test failed: {}", e),
            }
        }
    };

    (StatusCode::OK, Json(report))
}
