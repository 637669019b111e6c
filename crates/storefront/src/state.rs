//! Application state shared across handlers.

use std::sync::Arc;

use quickbite_core::Catalog;

use crate::config::StorefrontConfig;
use crate::services::{CartManager, OrderService};
use crate::store::KvStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog, the cart manager and the order service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Catalog,
    cart: CartManager,
    orders: OrderService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `store` - Durable store for the cart and favorites
    ///
    /// Persisted cart state is not loaded here; call
    /// [`CartManager::spawn_load`] once the runtime is up.
    #[must_use]
    pub fn new(config: StorefrontConfig, store: Arc<dyn KvStore>) -> Self {
        let cart = CartManager::new(store);
        let orders = OrderService::new(config.delivery_fee, config.tracking_interval);

        Self {
            inner: Arc::new(AppStateInner {
                catalog: Catalog::builtin(),
                cart,
                orders,
            }),
        }
    }

    /// Get a reference to the read-only catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart manager.
    #[must_use]
    pub fn cart(&self) -> &CartManager {
        &self.inner.cart
    }

    /// Get a reference to the order service.
    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }
}
