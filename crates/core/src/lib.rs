//! QuickBite Core - Shared types and state logic.
//!
//! This crate provides the domain model used by the storefront:
//! - the static food catalog
//! - the cart and favorites state with its reducer-style operations
//! - the simulated order progress state machine
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no async
//! runtime, no HTTP. Persistence and timers live in `quickbite-storefront`.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and order stages
//! - [`catalog`] - Read-only categories, food items and restaurants
//! - [`cart`] - Cart lines, favorites and [`CartState`]
//! - [`tracking`] - Order progress through [`OrderStage`]s

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod tracking;
pub mod types;

pub use cart::{CartLine, CartState, FavoriteSet, Slice};
pub use catalog::{Catalog, CatalogFilter, Category, FoodItem, Restaurant};
pub use tracking::{OrderProgress, StageStatus};
pub use types::*;
