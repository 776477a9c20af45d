//! Handlers for bulk IMEI import.
//!
//! The upload body is decoded first; any file-level failure (empty file,
//! missing columns) aborts with a single 400 before any row is touched.
//! Once decoding succeeds, the reconciler classifies every row and the
//! full outcome report is returned regardless of how many rows failed.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use mobimart_core::imei::IMPORT_CSV_TEMPLATE;
use mobimart_core::import::decode_csv;

use crate::error::{AppError, AppResult};
use crate::reconcile::reconcile;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for the bulk import endpoint.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub csv_data: String,
}

/// POST /admin/inventory/devices/import
///
/// Decode and reconcile an uploaded CSV of `(imei, product_id,
/// is_registered)` rows. Returns the per-batch outcome report
/// `{ total, success, failed, duplicates, errors }`.
pub async fn import_devices(
    State(state): State<AppState>,
    Json(input): Json<ImportRequest>,
) -> AppResult<impl IntoResponse> {
    let rows = decode_csv(&input.csv_data).map_err(|e| AppError::BadRequest(e.to_string()))?;

    tracing::info!(rows = rows.len(), "Bulk device import started");

    let outcome = reconcile(&state.pool, &rows).await;

    Ok(Json(DataResponse { data: outcome }))
}

/// GET /admin/inventory/devices/import/template
///
/// Static two-line CSV example (header plus one sample row) for admins to
/// download as a starting point.
pub async fn import_template() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/csv")], IMPORT_CSV_TEMPLATE)
}
