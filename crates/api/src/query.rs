//! Shared query parameter types for API handlers.

use serde::Deserialize;

use mobimart_core::types::DbId;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped via `mobimart_core::paging::clamp_limit` /
/// `clamp_offset` before reaching the repository layer.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Pagination plus an optional owning-product filter, used by the device
/// registry listing.
#[derive(Debug, Deserialize)]
pub struct DeviceListParams {
    pub product_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
