//! Repository for the `products` table.

use sqlx::PgPool;

use mobimart_core::types::DbId;

use crate::models::product::{CreateProduct, Product, UpdateProduct};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, brand, model_name, price_lkr, stock_count, \
    is_trcsl_approved, category, image_url, created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row. Stock starts at 0;
    /// it only moves through the transactional device-identity paths.
    pub async fn create(pool: &PgPool, body: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products \
                (brand, model_name, price_lkr, is_trcsl_approved, category, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&body.brand)
            .bind(&body.model_name)
            .bind(body.price_lkr)
            .bind(body.is_trcsl_approved)
            .bind(&body.category)
            .bind(&body.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a single product by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List products, newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Partially update a product. Returns the updated row, or `None` if
    /// not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                brand = COALESCE($2, brand), \
                model_name = COALESCE($3, model_name), \
                price_lkr = COALESCE($4, price_lkr), \
                is_trcsl_approved = COALESCE($5, is_trcsl_approved), \
                category = COALESCE($6, category), \
                image_url = COALESCE($7, image_url), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.brand)
            .bind(&input.model_name)
            .bind(input.price_lkr)
            .bind(input.is_trcsl_approved)
            .bind(&input.category)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product. Returns `true` if a row was removed.
    ///
    /// The `device_identities.product_id` foreign key is `ON DELETE
    /// RESTRICT`, so deleting a product that still owns device rows fails
    /// with a 23503 error surfaced to the caller.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
