//! Favorites route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use quickbite_core::{FoodItem, FoodItemId};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// The customer's favorites, resolved against the catalog.
#[derive(Debug, Serialize)]
pub struct FavoritesView {
    pub ids: Vec<FoodItemId>,
    pub items: Vec<FoodItem>,
}

/// Result of toggling one favorite.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteToggled {
    pub item_id: FoodItemId,
    pub is_favorite: bool,
}

/// List favorites.
///
/// IDs no longer present in the catalog are listed in `ids` but have no
/// entry in `items`.
pub async fn index(State(state): State<AppState>) -> Json<FavoritesView> {
    let ids: Vec<FoodItemId> = state.cart().favorites().into_iter().collect();
    let items = ids
        .iter()
        .filter_map(|&id| state.catalog().item(id).cloned())
        .collect();
    Json(FavoritesView { ids, items })
}

/// Toggle one item in or out of favorites.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    item_id: std::result::Result<Path<FoodItemId>, PathRejection>,
) -> Result<Json<FavoriteToggled>> {
    let Path(item_id) = item_id?;
    if state.catalog().item(item_id).is_none() {
        return Err(AppError::NotFound(format!("food item {item_id}")));
    }

    state.cart().toggle_favorite(item_id);
    Ok(Json(FavoriteToggled {
        item_id,
        is_favorite: state.cart().is_favorite(item_id),
    }))
}
