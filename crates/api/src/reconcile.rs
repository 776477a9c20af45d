//! Registry reconciler: commits batches of device-identity rows against
//! the store while keeping `products.stock_count` consistent.
//!
//! Rows are processed sequentially in input order. Each row is classified
//! into exactly one of SUCCESS / DUPLICATE / FAILED, so the counts in the
//! resulting [`ImportOutcome`] always partition the input. Per-row failures
//! never abort the batch; the only fatal condition is a file-level decode
//! failure, which the import handler rejects before this module runs.
//!
//! Duplicate detection is insert-first: the unique constraint on
//! `device_identities.number` is the authority, and the repository reports
//! a non-insert as the duplicate signal. There is no read-then-act
//! pre-check and therefore no race window between concurrent importers.

use sqlx::PgPool;

use mobimart_core::imei::{normalize_imei, parse_registered_flag};
use mobimart_core::import::{ImportOutcome, RawRow, RowOutcome};
use mobimart_core::types::DbId;
use mobimart_db::models::device_identity::{CreateDeviceIdentity, DeviceIdentity};
use mobimart_db::repositories::device_identity_repo::InsertDevice;
use mobimart_db::repositories::{DeviceIdentityRepo, ProductRepo};

/// Typed error for single-unit registration.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    /// IMEI is not exactly 15 ASCII digits after trimming.
    #[error("Invalid IMEI: {0}")]
    InvalidFormat(String),

    /// A device identity with this IMEI already exists.
    #[error("IMEI already registered: {0}")]
    DuplicateIdentity(String),

    /// The referenced product does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(DbId),

    /// The atomic insert-plus-stock-increment failed.
    #[error("Transaction failure: {0}")]
    TransactionFailure(#[from] sqlx::Error),
}

/// Register exactly one device identity: validate the IMEI, check the
/// owning product exists, then insert the row and increment the product's
/// stock count in one transaction.
pub async fn register_one(
    pool: &PgPool,
    imei: &str,
    product_id: DbId,
    is_registered: bool,
) -> Result<DeviceIdentity, RegisterError> {
    let number =
        normalize_imei(imei).ok_or_else(|| RegisterError::InvalidFormat(imei.trim().to_string()))?;

    ProductRepo::find_by_id(pool, product_id)
        .await?
        .ok_or(RegisterError::ProductNotFound(product_id))?;

    let body = CreateDeviceIdentity {
        number: number.to_string(),
        product_id,
        is_registered,
    };
    match DeviceIdentityRepo::insert_with_stock(pool, &body).await? {
        InsertDevice::Created(device) => Ok(device),
        InsertDevice::DuplicateNumber => {
            Err(RegisterError::DuplicateIdentity(number.to_string()))
        }
    }
}

impl From<RegisterError> for crate::error::AppError {
    fn from(err: RegisterError) -> Self {
        use mobimart_core::error::CoreError;
        match err {
            RegisterError::InvalidFormat(value) => {
                Self::Core(CoreError::Validation(format!("Invalid IMEI: {value}")))
            }
            RegisterError::DuplicateIdentity(number) => Self::Core(CoreError::Conflict(format!(
                "IMEI already registered: {number}"
            ))),
            RegisterError::ProductNotFound(id) => Self::Core(CoreError::NotFound {
                entity: "Product",
                id,
            }),
            RegisterError::TransactionFailure(err) => Self::Database(err),
        }
    }
}

/// Reconcile a batch of decoded rows against the store.
///
/// Never fails as a whole: every row ends up counted in the returned
/// [`ImportOutcome`], including rows that hit infrastructure errors
/// (classified FAILED with a generic message carrying the raw row for
/// operator diagnosis).
pub async fn reconcile(pool: &PgPool, rows: &[RawRow]) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();

    for row in rows {
        outcome.record(process_row(pool, row).await);
    }

    tracing::info!(
        total = outcome.total,
        success = outcome.success,
        failed = outcome.failed,
        duplicates = outcome.duplicates,
        "Bulk device import reconciled"
    );

    outcome
}

/// Classify one raw row. Format validation runs before the product
/// lookup, so a malformed IMEI is reported as such regardless of whether
/// the product id resolves.
async fn process_row(pool: &PgPool, row: &RawRow) -> RowOutcome {
    if normalize_imei(&row.imei).is_none() {
        return RowOutcome::Failed(format!("Invalid IMEI: {}", row.imei.trim()));
    }

    let product_field = row.product_id.trim();

    // An unparseable product id cannot reference any product.
    let Ok(product_id) = product_field.parse::<DbId>() else {
        return RowOutcome::Failed(format!("Product not found: {product_field}"));
    };

    match register_one(
        pool,
        &row.imei,
        product_id,
        parse_registered_flag(row.is_registered.as_deref()),
    )
    .await
    {
        Ok(_) => RowOutcome::Success,
        Err(RegisterError::DuplicateIdentity(_)) => RowOutcome::Duplicate,
        Err(RegisterError::InvalidFormat(value)) => {
            RowOutcome::Failed(format!("Invalid IMEI: {value}"))
        }
        Err(RegisterError::ProductNotFound(id)) => {
            RowOutcome::Failed(format!("Product not found: {id}"))
        }
        Err(RegisterError::TransactionFailure(err)) => {
            tracing::warn!(
                error = %err,
                imei = %row.imei,
                product_id = %row.product_id,
                "Device import row failed"
            );
            RowOutcome::Failed(format!(
                "Error processing row: {},{}",
                row.imei.trim(),
                product_field
            ))
        }
    }
}
