use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::model::AccessLogSummary;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct AddressQuery {
    postal_code: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct AccessLogsBody {
    access_logs: Vec<AccessLogSummary>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

pub async fn root() -> Response {
    Json(serde_json::json!({ "message": "Hello, World!" })).into_response()
}

/// GET /address?postal_code=NNNNNNN
///
/// Records the lookup first; a store failure fails the request before the
/// resolver is ever consulted.
pub async fn address(State(state): State<AppState>, Query(query): Query<AddressQuery>) -> Response {
    let Some(postal_code) = query.postal_code.filter(|code| !code.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "postal_code is required");
    };

    if let Err(e) = state.access_log.record(&postal_code).await {
        tracing::error!(error = %e, %postal_code, "failed to record access log");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to save access log",
        );
    }

    match state.resolver.resolve(&postal_code).await {
        Ok(Some(summary)) => (StatusCode::OK, Json(summary)).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "address not found"),
        Err(e) => {
            tracing::error!(error = %e, %postal_code, "address resolution failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

/// GET /address/access_logs
pub async fn access_logs(State(state): State<AppState>) -> Response {
    match state.access_log.report().await {
        Ok(logs) => (StatusCode::OK, Json(AccessLogsBody { access_logs: logs })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to aggregate access logs");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}
