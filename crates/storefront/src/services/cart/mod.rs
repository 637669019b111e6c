//! Cart state manager.
//!
//! [`CartManager`] is the single authoritative holder of the customer's
//! [`CartState`]. It is constructed once at startup and handed to whoever
//! needs it; clones share the same state.
//!
//! Every mutation:
//! 1. updates the in-memory state,
//! 2. notifies subscribers (see [`CartManager::subscribe`]),
//! 3. queues the touched slice for persistence without waiting for it.
//!
//! Persistence is best-effort local caching. Read and write failures are
//! logged and never reach callers; a failed load leaves the empty defaults.

mod writer;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use quickbite_core::{CartLine, CartState, FavoriteSet, FoodItem, FoodItemId, Price, Slice};
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::store::KvStore;

use writer::SliceWriter;

/// Shared handle to the cart and favorites.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct CartManager {
    inner: Arc<CartManagerInner>,
}

struct CartManagerInner {
    state: watch::Sender<CartState>,
    store: Arc<dyn KvStore>,
    cart_writer: SliceWriter,
    favorites_writer: SliceWriter,
    load_started: AtomicBool,
}

impl CartManager {
    /// Create a manager with an empty cart, persisting to `store`.
    ///
    /// Persisted state is not read until [`CartManager::load_persisted`] or
    /// [`CartManager::spawn_load`] is called.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime (the slice writers are
    /// spawned as tasks).
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        let (state, _) = watch::channel(CartState::new());
        Self {
            inner: Arc::new(CartManagerInner {
                state,
                cart_writer: SliceWriter::spawn(Slice::Cart, Arc::clone(&store)),
                favorites_writer: SliceWriter::spawn(Slice::Favorites, Arc::clone(&store)),
                store,
                load_started: AtomicBool::new(false),
            }),
        }
    }

    // =========================================================================
    // Startup Load
    // =========================================================================

    /// Load both slices from the store, replacing the in-memory defaults.
    ///
    /// Runs at most once; later calls return immediately. A slice that is
    /// absent, unreadable or fails to deserialize keeps its default.
    #[instrument(skip(self))]
    pub async fn load_persisted(&self) {
        if self.inner.load_started.swap(true, Ordering::AcqRel) {
            debug!("Persisted cart state already loaded");
            return;
        }

        let store = self.inner.store.as_ref();
        let (cart, favorites) = tokio::join!(
            read_slice::<Vec<CartLine>>(store, Slice::Cart),
            read_slice::<Vec<FoodItemId>>(store, Slice::Favorites),
        );

        // Loaded slices are queued for writing like any mutation, so a write
        // issued before the load finished cannot outlive it in the store.
        let changed = self.inner.state.send_if_modified(|state| {
            let mut restored = Vec::with_capacity(2);
            if let Some(lines) = cart {
                restored.push(state.replace_cart(lines));
            }
            if let Some(ids) = favorites {
                restored.push(state.replace_favorites(ids));
            }
            for &slice in &restored {
                self.persist(state, slice);
            }
            !restored.is_empty()
        });

        let state = self.inner.state.borrow();
        info!(
            restored = changed,
            lines = state.lines().len(),
            favorites = state.favorites().len(),
            "Cart state loaded"
        );
    }

    /// Load persisted state in a background task.
    ///
    /// Until it finishes, readers see the empty defaults.
    pub fn spawn_load(&self) -> JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move { manager.load_persisted().await })
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` of `item` to the cart (zero counts as one).
    ///
    /// Merges into an existing line for the same item, keeping that line's
    /// original display fields.
    pub fn add_to_cart(&self, item: &FoodItem, quantity: u32) {
        debug!(item_id = %item.id, quantity, "Add to cart");
        self.apply(|state| state.add(item, quantity));
    }

    /// Remove the line for `item_id`, if present.
    pub fn remove_from_cart(&self, item_id: FoodItemId) {
        debug!(%item_id, "Remove from cart");
        self.apply(|state| state.remove(item_id));
    }

    /// Set the quantity for `item_id`; zero or below removes the line.
    pub fn update_quantity(&self, item_id: FoodItemId, quantity: i64) {
        debug!(%item_id, quantity, "Update cart quantity");
        self.apply(|state| state.update_quantity(item_id, quantity));
    }

    /// Empty the cart. Favorites are untouched.
    pub fn clear_cart(&self) {
        debug!("Clear cart");
        self.apply(CartState::clear);
    }

    /// Flip favorite membership of `item_id`.
    pub fn toggle_favorite(&self, item_id: FoodItemId) {
        debug!(%item_id, "Toggle favorite");
        self.apply(|state| state.toggle_favorite(item_id));
    }

    /// Empty the cart and return everything that was in it.
    ///
    /// Returns `None` without touching anything if the cart is already
    /// empty. Reading and clearing happen under one lock, so no concurrent
    /// mutation can land in between.
    #[must_use]
    pub fn take_cart(&self) -> Option<CartState> {
        let mut taken = None;
        self.inner.state.send_if_modified(|state| {
            if state.is_empty() {
                return false;
            }
            taken = Some(state.clone());
            let slice = state.clear();
            self.persist(state, slice);
            true
        });
        if taken.is_some() {
            debug!("Cart taken for checkout");
        }
        taken
    }

    /// Run `mutation`, notify subscribers and queue the touched slice.
    ///
    /// The slice is serialized and published while the state lock is held so
    /// queued writes are ordered the same way as the mutations.
    fn apply(&self, mutation: impl FnOnce(&mut CartState) -> Slice) {
        self.inner.state.send_modify(|state| {
            let slice = mutation(state);
            self.persist(state, slice);
        });
    }

    /// Serialize `slice` of `state` and hand it to that slice's writer.
    fn persist(&self, state: &CartState, slice: Slice) {
        let encoded = match slice {
            Slice::Cart => serde_json::to_vec(state.lines()),
            Slice::Favorites => serde_json::to_vec(state.favorites()),
        };
        match encoded {
            Ok(bytes) => self.writer(slice).publish(bytes),
            Err(e) => error!(key = slice.storage_key(), error = %e, "Failed to serialize slice"),
        }
    }

    fn writer(&self, slice: Slice) -> &SliceWriter {
        match slice {
            Slice::Cart => &self.inner.cart_writer,
            Slice::Favorites => &self.inner.favorites_writer,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Sum of `price * quantity` over the cart.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.inner.state.borrow().total()
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.inner.state.borrow().item_count()
    }

    #[must_use]
    pub fn is_favorite(&self, item_id: FoodItemId) -> bool {
        self.inner.state.borrow().is_favorite(item_id)
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn cart(&self) -> Vec<CartLine> {
        self.inner.state.borrow().lines().to_vec()
    }

    #[must_use]
    pub fn favorites(&self) -> FavoriteSet {
        self.inner.state.borrow().favorites().clone()
    }

    /// A copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.inner.state.borrow().clone()
    }

    /// Receive the state after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.inner.state.subscribe()
    }

    /// Wait until every write queued so far has been attempted.
    pub async fn flush(&self) {
        tokio::join!(
            self.inner.cart_writer.flush(),
            self.inner.favorites_writer.flush()
        );
    }
}

/// Read and decode one slice, logging and swallowing any failure.
async fn read_slice<T: DeserializeOwned>(store: &dyn KvStore, slice: Slice) -> Option<T> {
    let key = slice.storage_key();
    match store.get(key).await {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Discarding unreadable persisted state");
                None
            }
        },
        Ok(None) => {
            debug!(key, "No persisted state");
            None
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read persisted state");
            None
        }
    }
}
