//! Handler for the county data lookup endpoint.
//!
//! Sequences validation, the read-only store query, and result shaping,
//! mapping every outcome through the central error taxonomy.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;
use crate::store::HealthRecord;
use crate::validate::validate;

/// POST /county_data
///
/// Body: `{"zip": string, "measure_name": string, "limit"?: integer}`.
/// Returns the matching records as a JSON array, newest year span first.
/// A validated request with zero matches is a 404, not an empty 200.
#[instrument(name = "county_data", skip(state, body))]
pub async fn lookup(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<HealthRecord>>, AppError> {
    let Json(body) = body.map_err(AppError::from_rejection)?;
    let request = validate(&body)?;

    tracing::debug!(
        zip = %request.zip,
        measure_name = %request.measure_name,
        limit = request.limit,
        "Validated lookup request"
    );

    // rusqlite is synchronous; keep the query off the async workers. The
    // connection lives entirely inside the closure.
    let store = state.store.clone();
    let measure_name = request.measure_name.clone();
    let records = tokio::task::spawn_blocking(move || store.lookup(&request))
        .await
        .map_err(|e| AppError::Internal(format!("lookup task failed: {e}")))??;

    if records.is_empty() {
        return Err(AppError::NotFound(format!(
            "No data found for measure {measure_name}"
        )));
    }

    tracing::debug!(rows = records.len(), "Lookup succeeded");
    Ok(Json(records))
}
