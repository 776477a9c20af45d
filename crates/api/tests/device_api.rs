//! HTTP-level integration tests for the device identity registry:
//! single-unit registration, status toggling, and deletion, including
//! the stock-count side effects of each.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post, post_json, stock_count};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Single-unit registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_device_returns_201_and_increments_stock(pool: PgPool) {
    let product_id = common::seed_product(&pool, "Samsung", "Galaxy A55").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/admin/inventory/devices",
        serde_json::json!({
            "imei": "358128870236764",
            "product_id": product_id,
            "is_registered": true,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["number"], "358128870236764");
    assert_eq!(json["data"]["status"], "available");
    assert_eq!(json["data"]["is_registered"], true);

    assert_eq!(stock_count(&pool, product_id).await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_device_trims_imei(pool: PgPool) {
    let product_id = common::seed_product(&pool, "Samsung", "Galaxy A55").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/admin/inventory/devices",
        serde_json::json!({"imei": "  358128870236764 ", "product_id": product_id}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["number"], "358128870236764");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_device_invalid_imei_returns_400(pool: PgPool) {
    let product_id = common::seed_product(&pool, "Samsung", "Galaxy A55").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/admin/inventory/devices",
        serde_json::json!({"imei": "bad-imei", "product_id": product_id}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid IMEI: bad-imei");

    // Nothing written.
    assert_eq!(stock_count(&pool, product_id).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_device_missing_product_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/admin/inventory/devices",
        serde_json::json!({"imei": "358128870236764", "product_id": 999999}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_imei_returns_409(pool: PgPool) {
    let product_id = common::seed_product(&pool, "Samsung", "Galaxy A55").await;

    let body = serde_json::json!({"imei": "358128870236764", "product_id": product_id});

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/admin/inventory/devices", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/admin/inventory/devices", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The losing write left the stock untouched.
    assert_eq!(stock_count(&pool, product_id).await, 1);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_devices_filtered_by_product(pool: PgPool) {
    let p1 = common::seed_product(&pool, "Samsung", "Galaxy A55").await;
    let p2 = common::seed_product(&pool, "Apple", "iPhone 15").await;

    for (imei, pid) in [
        ("358128870236764", p1),
        ("358128870236765", p1),
        ("358128870236766", p2),
    ] {
        let app = common::build_test_app(pool.clone());
        post_json(
            app,
            "/api/v1/admin/inventory/devices",
            serde_json::json!({"imei": imei, "product_id": pid}),
        )
        .await;
    }

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/admin/inventory/devices?product_id={p1}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/admin/inventory/devices").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Status toggle
// ---------------------------------------------------------------------------

async fn register_device(pool: &PgPool, imei: &str, product_id: i64) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/admin/inventory/devices",
        serde_json::json!({"imei": imei, "product_id": product_id}),
    )
    .await;
    let json = body_json(response).await;
    json["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_toggle_status_adjusts_stock_both_ways(pool: PgPool) {
    let product_id = common::seed_product(&pool, "Samsung", "Galaxy A55").await;
    let device_id = register_device(&pool, "358128870236764", product_id).await;
    assert_eq!(stock_count(&pool, product_id).await, 1);

    // AVAILABLE -> SOLD: stock drops.
    let app = common::build_test_app(pool.clone());
    let response = post(
        app,
        &format!("/api/v1/admin/inventory/devices/{device_id}/toggle-status"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "sold");
    assert_eq!(stock_count(&pool, product_id).await, 0);

    // SOLD -> AVAILABLE: stock comes back.
    let app = common::build_test_app(pool.clone());
    let response = post(
        app,
        &format!("/api/v1/admin/inventory/devices/{device_id}/toggle-status"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "available");
    assert_eq!(stock_count(&pool, product_id).await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_toggle_nonexistent_device_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post(app, "/api/v1/admin/inventory/devices/999999/toggle-status").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_available_device_decrements_stock(pool: PgPool) {
    let product_id = common::seed_product(&pool, "Samsung", "Galaxy A55").await;
    let device_id = register_device(&pool, "358128870236764", product_id).await;
    assert_eq!(stock_count(&pool, product_id).await, 1);

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/admin/inventory/devices/{device_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(stock_count(&pool, product_id).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_sold_device_returns_409(pool: PgPool) {
    let product_id = common::seed_product(&pool, "Samsung", "Galaxy A55").await;
    let device_id = register_device(&pool, "358128870236764", product_id).await;

    // Sell it first.
    let app = common::build_test_app(pool.clone());
    post(
        app,
        &format!("/api/v1/admin/inventory/devices/{device_id}/toggle-status"),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/admin/inventory/devices/{device_id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Sold units are retained; stock was already 0 from the sale.
    assert_eq!(stock_count(&pool, product_id).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_nonexistent_device_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/api/v1/admin/inventory/devices/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
