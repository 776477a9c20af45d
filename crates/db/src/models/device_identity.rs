//! Device identity (IMEI record) models and DTOs.

use mobimart_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Status of a physical unit still in inventory.
pub const DEVICE_STATUS_AVAILABLE: &str = "available";

/// Status of a unit consumed by an order. Sold rows are immutable and
/// retained for audit; they can never be deleted.
pub const DEVICE_STATUS_SOLD: &str = "sold";

/// A row from the `device_identities` table: one physical handset,
/// identified by its globally unique IMEI.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeviceIdentity {
    pub id: DbId,
    /// 15-digit IMEI, unique across the table (`uq_device_identities_number`).
    pub number: String,
    pub product_id: DbId,
    /// Whether the unit has passed TRCSL registration.
    pub is_registered: bool,
    /// `available` or `sold`.
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a device identity. The IMEI must already be
/// normalized (`mobimart_core::imei::normalize_imei`) by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDeviceIdentity {
    pub number: String,
    pub product_id: DbId,
    pub is_registered: bool,
}
