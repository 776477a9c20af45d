//! Handlers for the device identity (IMEI) registry endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use mobimart_core::error::CoreError;
use mobimart_core::paging::{clamp_limit, clamp_offset};
use mobimart_core::types::DbId;
use mobimart_db::repositories::device_identity_repo::DeleteDevice;
use mobimart_db::repositories::DeviceIdentityRepo;

use crate::error::{AppError, AppResult};
use crate::query::DeviceListParams;
use crate::reconcile::register_one;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for single-unit registration.
#[derive(Debug, Deserialize)]
pub struct RegisterDeviceRequest {
    pub imei: String,
    pub product_id: DbId,
    #[serde(default)]
    pub is_registered: bool,
}

/// POST /admin/inventory/devices
///
/// Register exactly one device identity via the admin form. Same
/// validation pipeline as one bulk-import row: 400 for a malformed IMEI,
/// 404 for a missing product, 409 for a duplicate.
pub async fn register_device(
    State(state): State<AppState>,
    Json(input): Json<RegisterDeviceRequest>,
) -> AppResult<impl IntoResponse> {
    let device = register_one(
        &state.pool,
        &input.imei,
        input.product_id,
        input.is_registered,
    )
    .await?;

    tracing::info!(
        device_id = device.id,
        imei = %device.number,
        product_id = device.product_id,
        "Device identity registered"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: device })))
}

/// GET /admin/inventory/devices?product_id=&limit=&offset=
pub async fn list_devices(
    State(state): State<AppState>,
    Query(params): Query<DeviceListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, 25, 100);
    let offset = clamp_offset(params.offset);

    let devices = DeviceIdentityRepo::list(&state.pool, params.product_id, limit, offset).await?;
    Ok(Json(DataResponse { data: devices }))
}

/// POST /admin/inventory/devices/{id}/toggle-status
///
/// Flip a unit between AVAILABLE and SOLD. The owning product's stock
/// count is adjusted in the same transaction, so stock stays "count of
/// AVAILABLE units" under toggling as well as under sale/delete.
pub async fn toggle_device_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let device = DeviceIdentityRepo::toggle_status_with_stock(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DeviceIdentity",
            id,
        }))?;

    tracing::info!(device_id = id, status = %device.status, "Device status toggled");

    Ok(Json(DataResponse { data: device }))
}

/// DELETE /admin/inventory/devices/{id}
///
/// Permitted only while AVAILABLE; sold units are retained for audit.
/// Decrements the owning product's stock count atomically.
pub async fn delete_device(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    match DeviceIdentityRepo::delete_with_stock(&state.pool, id).await? {
        DeleteDevice::Deleted => {
            tracing::info!(device_id = id, "Device identity deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        DeleteDevice::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "DeviceIdentity",
            id,
        })),
        DeleteDevice::Sold => Err(AppError::Core(CoreError::Conflict(
            "Sold units cannot be deleted".to_string(),
        ))),
    }
}
