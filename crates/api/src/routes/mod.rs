//! Route tree assembly.

pub mod health;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/products                                  list, create
/// /admin/products/{id}                             get, update, delete
///
/// /admin/inventory/devices                         list, register one
/// /admin/inventory/devices/{id}                    delete
/// /admin/inventory/devices/{id}/toggle-status      flip AVAILABLE/SOLD (POST)
/// /admin/inventory/devices/import                  bulk CSV import (POST)
/// /admin/inventory/devices/import/template         CSV template (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // -- Products --
        .route(
            "/admin/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/admin/products/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        // -- Device registry --
        .route(
            "/admin/inventory/devices",
            get(handlers::devices::list_devices).post(handlers::devices::register_device),
        )
        .route(
            "/admin/inventory/devices/import",
            post(handlers::import::import_devices),
        )
        .route(
            "/admin/inventory/devices/import/template",
            get(handlers::import::import_template),
        )
        .route(
            "/admin/inventory/devices/{id}",
            delete(handlers::devices::delete_device),
        )
        .route(
            "/admin/inventory/devices/{id}/toggle-status",
            post(handlers::devices::toggle_device_status),
        )
}
