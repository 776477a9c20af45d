//! Product catalog models and DTOs.
//!
//! `stock_count` is a denormalized cache of the number of AVAILABLE device
//! identities owned by the product. It is only ever mutated inside the same
//! transaction as the corresponding device insert/delete/status-flip (see
//! `DeviceIdentityRepo`), never recomputed lazily on the read path.

use mobimart_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub brand: String,
    pub model_name: String,
    /// Retail price in Sri Lankan rupees.
    pub price_lkr: i64,
    /// Count of AVAILABLE device identities owned by this product.
    pub stock_count: i32,
    /// Whether the model itself has TRCSL type approval.
    pub is_trcsl_approved: bool,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub brand: String,
    pub model_name: String,
    pub price_lkr: i64,
    #[serde(default)]
    pub is_trcsl_approved: bool,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

/// DTO for partially updating a product. `stock_count` is deliberately
/// absent: it moves only through the transactional device paths.
#[derive(Debug, Deserialize)]
pub struct UpdateProduct {
    pub brand: Option<String>,
    pub model_name: Option<String>,
    pub price_lkr: Option<i64>,
    pub is_trcsl_approved: Option<bool>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}
