//! Repository for the `device_identities` table.
//!
//! Every write that changes the set of AVAILABLE units also adjusts the
//! owning product's `stock_count` inside the same transaction, so the
//! invariant "stock_count == count of AVAILABLE rows for the product" is
//! never observably violated, even transiently.

use sqlx::PgPool;

use mobimart_core::types::DbId;

use crate::models::device_identity::{
    CreateDeviceIdentity, DeviceIdentity, DEVICE_STATUS_AVAILABLE, DEVICE_STATUS_SOLD,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, number, product_id, is_registered, status, created_at, updated_at";

/// Outcome of an insert attempt. The unique constraint on `number` is the
/// authority on duplicates: the insert uses `ON CONFLICT DO NOTHING`, so
/// two racing importers never see a constraint error, the loser simply
/// observes `DuplicateNumber`.
#[derive(Debug)]
pub enum InsertDevice {
    Created(DeviceIdentity),
    DuplicateNumber,
}

/// Outcome of a delete attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteDevice {
    Deleted,
    NotFound,
    /// Sold units are retained for audit and may not be deleted.
    Sold,
}

/// Provides persistence operations for device identities.
pub struct DeviceIdentityRepo;

impl DeviceIdentityRepo {
    /// Find a device identity by its IMEI.
    pub async fn find_by_number(
        pool: &PgPool,
        number: &str,
    ) -> Result<Option<DeviceIdentity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM device_identities WHERE number = $1");
        sqlx::query_as::<_, DeviceIdentity>(&query)
            .bind(number)
            .fetch_optional(pool)
            .await
    }

    /// Find a device identity by primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DeviceIdentity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM device_identities WHERE id = $1");
        sqlx::query_as::<_, DeviceIdentity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List device identities, newest first, optionally filtered by owning
    /// product.
    pub async fn list(
        pool: &PgPool,
        product_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DeviceIdentity>, sqlx::Error> {
        match product_id {
            Some(pid) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM device_identities \
                     WHERE product_id = $1 \
                     ORDER BY created_at DESC \
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, DeviceIdentity>(&query)
                    .bind(pid)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM device_identities \
                     ORDER BY created_at DESC \
                     LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, DeviceIdentity>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Count AVAILABLE rows for a product straight from the detail table.
    ///
    /// This is the source of truth that `products.stock_count` caches;
    /// used by drift checks and tests, never on the hot path.
    pub async fn count_available_by_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM device_identities WHERE product_id = $1 AND status = $2",
        )
        .bind(product_id)
        .bind(DEVICE_STATUS_AVAILABLE)
        .fetch_one(pool)
        .await
    }

    /// Insert a device identity with status AVAILABLE and increment the
    /// owning product's stock count, atomically.
    ///
    /// Duplicate IMEIs are absorbed by `ON CONFLICT (number) DO NOTHING`:
    /// the transaction is rolled back and [`InsertDevice::DuplicateNumber`]
    /// returned, leaving the stock count untouched. A missing product
    /// surfaces as a foreign-key error from the insert itself.
    pub async fn insert_with_stock(
        pool: &PgPool,
        body: &CreateDeviceIdentity,
    ) -> Result<InsertDevice, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO device_identities (number, product_id, is_registered, status) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (number) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, DeviceIdentity>(&query)
            .bind(&body.number)
            .bind(body.product_id)
            .bind(body.is_registered)
            .bind(DEVICE_STATUS_AVAILABLE)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(device) = inserted else {
            tx.rollback().await?;
            return Ok(InsertDevice::DuplicateNumber);
        };

        sqlx::query(
            "UPDATE products SET stock_count = stock_count + 1, updated_at = now() \
             WHERE id = $1",
        )
        .bind(body.product_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(InsertDevice::Created(device))
    }

    /// Delete a device identity, permitted only while AVAILABLE, and
    /// decrement the owning product's stock count atomically (symmetric
    /// to [`Self::insert_with_stock`]).
    pub async fn delete_with_stock(pool: &PgPool, id: DbId) -> Result<DeleteDevice, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM device_identities WHERE id = $1 FOR UPDATE");
        let device = sqlx::query_as::<_, DeviceIdentity>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(device) = device else {
            tx.rollback().await?;
            return Ok(DeleteDevice::NotFound);
        };
        if device.status == DEVICE_STATUS_SOLD {
            tx.rollback().await?;
            return Ok(DeleteDevice::Sold);
        }

        sqlx::query("DELETE FROM device_identities WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE products SET stock_count = stock_count - 1, updated_at = now() \
             WHERE id = $1",
        )
        .bind(device.product_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(DeleteDevice::Deleted)
    }

    /// Flip a unit between AVAILABLE and SOLD, adjusting the owning
    /// product's stock count by the matching delta in the same
    /// transaction. Returns the updated row, or `None` if not found.
    pub async fn toggle_status_with_stock(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DeviceIdentity>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM device_identities WHERE id = $1 FOR UPDATE");
        let device = sqlx::query_as::<_, DeviceIdentity>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(device) = device else {
            tx.rollback().await?;
            return Ok(None);
        };

        let (new_status, delta) = if device.status == DEVICE_STATUS_AVAILABLE {
            (DEVICE_STATUS_SOLD, -1i32)
        } else {
            (DEVICE_STATUS_AVAILABLE, 1i32)
        };

        let query = format!(
            "UPDATE device_identities SET status = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, DeviceIdentity>(&query)
            .bind(id)
            .bind(new_status)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE products SET stock_count = stock_count + $2, updated_at = now() \
             WHERE id = $1",
        )
        .bind(device.product_id)
        .bind(delta)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }
}
