//! Router assembly.

use axum::routing::{get, patch, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{addresses, carts, orders, products, users, wishlists};
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async { Json(serde_json::json!({"status": "healthy", "service": "storefront"})) }),
        )
        .route("/api/products", get(products::list))
        .route("/api/products/create", post(products::create))
        .route(
            "/api/products/:id",
            get(products::get)
                .put(products::update)
                .patch(products::update)
                .delete(products::delete),
        )
        .route("/api/products/:id/related", get(products::related))
        .route(
            "/api/carts",
            get(carts::list).post(carts::add).delete(carts::remove),
        )
        .route("/api/carts/:productId", patch(carts::set_quantity))
        .route(
            "/api/wishlists",
            get(wishlists::list)
                .post(wishlists::add)
                .delete(wishlists::remove),
        )
        .route(
            "/api/delivery-addresses",
            get(addresses::list).post(addresses::create),
        )
        .route(
            "/api/delivery-addresses/:id",
            get(addresses::get)
                .put(addresses::update)
                .delete(addresses::delete)
                .patch(addresses::set_default),
        )
        .route("/api/orders", get(orders::list).post(orders::create))
        .route("/api/orders/all", get(orders::list_all))
        .route(
            "/api/orders/:id",
            get(orders::get).patch(orders::update_status),
        )
        .route("/api/users", get(users::search).post(users::register))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
