//! Order placement and simulated tracking.
//!
//! Placing an order snapshots the cart total, clears the cart and starts a
//! timer that walks the order through its stages one tick at a time until
//! it is delivered. There is no payment or real delivery behind any of it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use quickbite_core::{OrderId, OrderProgress, Price};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::services::cart::CartManager;

/// Errors from order placement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,
}

/// A placed order with its current progress.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedOrder {
    pub id: OrderId,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
    pub item_count: u64,
    pub placed_at: DateTime<Utc>,
    #[serde(skip)]
    pub progress: OrderProgress,
}

/// Places orders and advances their tracking timers.
///
/// Orders are kept in memory for the life of the process, delivered ones
/// included; nothing evicts them. Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct OrderService {
    inner: Arc<OrderServiceInner>,
}

struct OrderServiceInner {
    delivery_fee: Price,
    tick: Duration,
    orders: RwLock<HashMap<OrderId, PlacedOrder>>,
}

impl OrderService {
    /// Create a service charging `delivery_fee` and advancing orders every
    /// `tick`.
    #[must_use]
    pub fn new(delivery_fee: Price, tick: Duration) -> Self {
        Self {
            inner: Arc::new(OrderServiceInner {
                delivery_fee,
                tick,
                orders: RwLock::new(HashMap::new()),
            }),
        }
    }

    #[must_use]
    pub fn delivery_fee(&self) -> Price {
        self.inner.delivery_fee
    }

    /// Place an order for everything in `cart` and start tracking it.
    ///
    /// The cart is cleared on success.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` if the cart has no lines.
    #[instrument(skip(self, cart))]
    pub fn place_order(&self, cart: &CartManager) -> Result<PlacedOrder, OrderError> {
        let state = cart.take_cart().ok_or(OrderError::EmptyCart)?;
        let subtotal = state.total();
        let delivery_fee = self.inner.delivery_fee;
        let order = PlacedOrder {
            id: OrderId::new_v4(),
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
            item_count: state.item_count(),
            placed_at: Utc::now(),
            progress: OrderProgress::new(),
        };

        self.write_orders().insert(order.id, order.clone());
        info!(order_id = %order.id, total = %order.total, "Order placed");

        self.spawn_tracker(order.id);
        Ok(order)
    }

    /// Look up an order and its current progress.
    #[must_use]
    pub fn get(&self, id: OrderId) -> Option<PlacedOrder> {
        self.read_orders().get(&id).cloned()
    }

    /// Advance `id` by one stage. Returns `false` once delivered or unknown.
    fn advance(&self, id: OrderId) -> bool {
        let mut orders = self.write_orders();
        let Some(order) = orders.get_mut(&id) else {
            return false;
        };
        let advanced = order.progress.advance();
        if advanced {
            debug!(order_id = %id, stage = %order.progress.current(), "Order advanced");
        }
        advanced && !order.progress.is_delivered()
    }

    fn spawn_tracker(&self, id: OrderId) {
        let service = self.clone();
        let tick = self.inner.tick;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if !service.advance(id) {
                    break;
                }
            }
            info!(order_id = %id, "Order delivered");
        });
    }

    fn read_orders(&self) -> std::sync::RwLockReadGuard<'_, HashMap<OrderId, PlacedOrder>> {
        self.inner.orders.read().unwrap_or_else(|poisoned| {
            warn!("Order table lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_orders(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<OrderId, PlacedOrder>> {
        self.inner.orders.write().unwrap_or_else(|poisoned| {
            warn!("Order table lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use quickbite_core::{Catalog, FoodItemId, OrderStage};

    use super::*;
    use crate::store::MemoryStore;

    const TICK: Duration = Duration::from_secs(3);

    fn cart_with_pizza() -> CartManager {
        let cart = CartManager::new(Arc::new(MemoryStore::new()));
        let catalog = Catalog::builtin();
        cart.add_to_cart(catalog.item(FoodItemId::new(1)).unwrap(), 2);
        cart
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let cart = CartManager::new(Arc::new(MemoryStore::new()));
        let service = OrderService::new(Price::from_cents(299), TICK);
        assert_eq!(service.place_order(&cart).unwrap_err(), OrderError::EmptyCart);
    }

    #[tokio::test]
    async fn test_place_order_totals_and_clears_cart() {
        let cart = cart_with_pizza();
        let service = OrderService::new(Price::from_cents(299), TICK);

        let order = service.place_order(&cart).unwrap();
        assert_eq!(order.subtotal, Price::from_cents(3798));
        assert_eq!(order.total, Price::from_cents(4097));
        assert_eq!(order.item_count, 2);
        assert!(cart.cart().is_empty());

        let stored = service.get(order.id).unwrap();
        assert_eq!(stored.progress.current(), OrderStage::Confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tracking_advances_each_tick_and_stops() {
        let cart = cart_with_pizza();
        let service = OrderService::new(Price::from_cents(299), TICK);
        let id = service.place_order(&cart).unwrap().id;

        let stage_after = |secs| {
            let service = service.clone();
            async move {
                tokio::time::sleep(Duration::from_secs(secs)).await;
                service.get(id).unwrap().progress.current()
            }
        };

        assert_eq!(stage_after(1).await, OrderStage::Confirmed);
        assert_eq!(stage_after(3).await, OrderStage::Preparing);
        assert_eq!(stage_after(3).await, OrderStage::OnTheWay);
        assert_eq!(stage_after(3).await, OrderStage::Delivered);
        assert_eq!(stage_after(30).await, OrderStage::Delivered);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_adds_racing_checkout_are_never_lost() {
        const UNITS: u64 = 500;
        let cart = CartManager::new(Arc::new(MemoryStore::new()));
        let service = OrderService::new(Price::ZERO, Duration::from_secs(3600));
        let pizza = Catalog::builtin().item(FoodItemId::new(1)).cloned().unwrap();

        let adder = {
            let cart = cart.clone();
            tokio::spawn(async move {
                for _ in 0..UNITS {
                    cart.add_to_cart(&pizza, 1);
                    tokio::task::yield_now().await;
                }
            })
        };

        let mut ordered = 0;
        while !adder.is_finished() {
            if let Ok(order) = service.place_order(&cart) {
                ordered += order.item_count;
            }
            tokio::task::yield_now().await;
        }
        adder.await.unwrap();

        assert_eq!(ordered + cart.cart_item_count(), UNITS);
    }

    #[tokio::test]
    async fn test_unknown_order() {
        let service = OrderService::new(Price::ZERO, TICK);
        assert!(service.get(OrderId::new_v4()).is_none());
    }
}
