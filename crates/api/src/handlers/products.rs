//! Handlers for the product catalog admin endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use mobimart_core::error::CoreError;
use mobimart_core::paging::{clamp_limit, clamp_offset};
use mobimart_core::types::DbId;
use mobimart_db::models::product::{CreateProduct, UpdateProduct};
use mobimart_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /admin/products
///
/// Create a new product. Stock starts at zero and only moves through the
/// device registry paths.
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    if input.brand.trim().is_empty() || input.model_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "brand and model_name must not be empty".to_string(),
        ));
    }
    if input.price_lkr < 0 {
        return Err(AppError::BadRequest(
            "price_lkr must not be negative".to_string(),
        ));
    }

    let product = ProductRepo::create(&state.pool, &input).await?;

    tracing::info!(product_id = product.id, brand = %product.brand, "Product created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /admin/products?limit=&offset=
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, 25, 100);
    let offset = clamp_offset(params.offset);

    let products = ProductRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /admin/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(DataResponse { data: product }))
}

/// PUT /admin/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /admin/products/{id}
///
/// Fails with 409 while the product still owns device identities (FK is
/// ON DELETE RESTRICT).
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ProductRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }

    tracing::info!(product_id = id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}
