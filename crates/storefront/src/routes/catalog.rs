//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::PathRejection},
};
use quickbite_core::{CatalogFilter, Category, FoodItem, FoodItemId, Restaurant};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Item detail with the customer's favorite flag.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetail {
    #[serde(flatten)]
    pub item: FoodItem,
    pub is_favorite: bool,
}

/// List all categories.
pub async fn categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog().categories().to_vec())
}

/// List food items matching an optional search text and category.
#[instrument(skip(state))]
pub async fn items(
    State(state): State<AppState>,
    Query(filter): Query<CatalogFilter>,
) -> Json<Vec<FoodItem>> {
    Json(state.catalog().filter(&filter).cloned().collect())
}

/// Show one food item.
#[instrument(skip(state))]
pub async fn item(
    State(state): State<AppState>,
    id: std::result::Result<Path<FoodItemId>, PathRejection>,
) -> Result<Json<ItemDetail>> {
    let Path(id) = id?;
    let item = state
        .catalog()
        .item(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("food item {id}")))?;

    Ok(Json(ItemDetail {
        is_favorite: state.cart().is_favorite(id),
        item,
    }))
}

/// List all restaurants.
pub async fn restaurants(State(state): State<AppState>) -> Json<Vec<Restaurant>> {
    Json(state.catalog().restaurants().to_vec())
}
