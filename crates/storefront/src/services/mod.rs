//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `cart` - Cart and favorites state manager with background persistence
//! - `orders` - Order placement and simulated delivery tracking

pub mod cart;
pub mod orders;

pub use cart::CartManager;
pub use orders::{OrderError, OrderService, PlacedOrder};
