//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Health check
//!
//! # Catalog
//! GET  /catalog/categories        - Category list
//! GET  /catalog/items             - Item list (?search=&category=)
//! GET  /catalog/items/{id}        - Item detail with favorite flag
//! GET  /catalog/restaurants       - Restaurant list
//!
//! # Cart
//! GET  /cart                      - Cart with subtotal, delivery fee and total
//! POST /cart/add                  - Add item {item_id, quantity?}
//! POST /cart/update               - Set quantity {item_id, quantity}
//! POST /cart/remove               - Remove line {item_id}
//! POST /cart/clear                - Empty the cart
//! GET  /cart/count                - Units in cart (badge)
//!
//! # Favorites
//! GET  /favorites                 - Favorite items
//! POST /favorites/{id}/toggle     - Toggle one favorite
//!
//! # Orders
//! POST /orders                    - Place an order for the current cart
//! GET  /orders/{id}               - Order tracking status
//! ```

pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod orders;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::{RequestSpan, request_id_middleware};
use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(catalog::categories))
        .route("/items", get(catalog::items))
        .route("/items/{id}", get(catalog::item))
        .route("/restaurants", get(catalog::restaurants))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the favorites routes router.
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::index))
        .route("/{id}/toggle", post(favorites::toggle))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::place))
        .route("/{id}", get(orders::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/catalog", catalog_routes())
        .nest("/cart", cart_routes())
        .nest("/favorites", favorite_routes())
        .nest("/orders", order_routes())
}

/// Build the full application router with state, request IDs and tracing.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
