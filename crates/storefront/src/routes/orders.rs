//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use quickbite_core::{OrderId, OrderStage, Price, StageStatus};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::PlacedOrder;
use crate::state::AppState;

/// Order tracking display data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: OrderId,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
    pub item_count: u64,
    pub placed_at: DateTime<Utc>,
    pub stage: OrderStage,
    pub progress: f64,
    pub estimated_delivery: &'static str,
    pub stages: Vec<StageStatus>,
}

impl From<PlacedOrder> for OrderView {
    fn from(order: PlacedOrder) -> Self {
        Self {
            id: order.id,
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            total: order.total,
            item_count: order.item_count,
            placed_at: order.placed_at,
            stage: order.progress.current(),
            progress: order.progress.fraction(),
            estimated_delivery: order.progress.estimated_delivery(),
            stages: order.progress.stages(),
        }
    }
}

/// Place an order for the current cart.
#[instrument(skip(state))]
pub async fn place(State(state): State<AppState>) -> Result<(StatusCode, Json<OrderView>)> {
    let order = state.orders().place_order(state.cart())?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// Show an order's tracking status.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    id: std::result::Result<Path<OrderId>, PathRejection>,
) -> Result<Json<OrderView>> {
    let Path(id) = id?;
    state
        .orders()
        .get(id)
        .map(|order| Json(order.into()))
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}
