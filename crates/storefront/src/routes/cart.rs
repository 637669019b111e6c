//! Cart route handlers.
//!
//! Every mutating endpoint returns the updated cart so clients can re-render
//! without a second request.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use quickbite_core::{CartLine, FoodItemId, Price};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// One cart line as shown to the customer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    #[serde(flatten)]
    pub line: CartLine,
    pub line_price: Price,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
    pub item_count: u64,
}

impl CartView {
    /// Build the view from the current cart.
    ///
    /// The delivery fee only applies once the cart has something in it.
    fn from_state(state: &AppState) -> Self {
        let snapshot = state.cart().snapshot();
        let subtotal = snapshot.total();
        let delivery_fee = if snapshot.is_empty() {
            Price::ZERO
        } else {
            state.orders().delivery_fee()
        };

        Self {
            items: snapshot
                .lines()
                .iter()
                .map(|line| CartItemView {
                    line_price: line.line_total(),
                    line: line.clone(),
                })
                .collect(),
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
            item_count: snapshot.item_count(),
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub item_id: FoodItemId,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub item_id: FoodItemId,
    pub quantity: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub item_id: FoodItemId,
}

/// Display the cart.
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::from_state(&state))
}

/// Add an item to the cart.
///
/// The item's display fields are looked up in the catalog; unknown IDs are
/// rejected.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    body: std::result::Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Json(body) = body?;
    let item = state
        .catalog()
        .item(body.item_id)
        .ok_or_else(|| AppError::NotFound(format!("food item {}", body.item_id)))?;

    let quantity = body.quantity.unwrap_or(1);
    state.cart().add_to_cart(item, quantity);
    let item_id = body.item_id.to_string();
    let quantity = quantity.to_string();
    add_breadcrumb(
        "cart",
        "Added item to cart",
        Some(&[("item_id", item_id.as_str()), ("quantity", quantity.as_str())]),
    );

    Ok(Json(CartView::from_state(&state)))
}

/// Set the quantity of a cart line. Zero or below removes it.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    body: std::result::Result<Json<UpdateCartRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Json(body) = body?;
    state.cart().update_quantity(body.item_id, body.quantity);
    Ok(Json(CartView::from_state(&state)))
}

/// Remove a cart line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    body: std::result::Result<Json<RemoveFromCartRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Json(body) = body?;
    state.cart().remove_from_cart(body.item_id);
    Ok(Json(CartView::from_state(&state)))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    state.cart().clear_cart();
    Json(CartView::from_state(&state))
}

/// Number of units in the cart (for the badge).
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    Json(CartCount {
        count: state.cart().cart_item_count(),
    })
}
