//! Simulated order progress.
//!
//! A linear state machine over [`OrderStage::ALL`]: it starts at
//! [`OrderStage::Confirmed`], moves one stage per tick and stops at
//! [`OrderStage::Delivered`]. The timer that drives it lives in the
//! storefront.

use serde::Serialize;

use crate::types::OrderStage;

/// Estimated delivery text shown until the order arrives.
pub const ESTIMATED_DELIVERY: &str = "20-25 mins";

/// Estimated delivery text once the order has arrived.
pub const DELIVERED_TEXT: &str = "Delivered!";

/// One row of the stage list shown to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageStatus {
    pub stage: OrderStage,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    /// Whether this stage has been reached.
    pub completed: bool,
}

/// Progress of one order through the stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderProgress {
    current: OrderStage,
}

impl OrderProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn current(&self) -> OrderStage {
        self.current
    }

    /// Move to the next stage.
    ///
    /// Returns `false` without changing anything once delivered.
    pub fn advance(&mut self) -> bool {
        match self.current.next() {
            Some(next) => {
                self.current = next;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.current == OrderStage::Delivered
    }

    /// Progress from `0.0` (just confirmed) to `1.0` (delivered).
    #[must_use]
    pub fn fraction(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)] // at most four stages
        let last = (OrderStage::ALL.len() - 1) as f64;
        #[allow(clippy::cast_precision_loss)]
        let current = self.current.index() as f64;
        current / last
    }

    /// Every stage with its `completed` flag.
    #[must_use]
    pub fn stages(&self) -> Vec<StageStatus> {
        OrderStage::ALL
            .iter()
            .map(|&stage| StageStatus {
                stage,
                title: stage.title(),
                description: stage.description(),
                icon: stage.icon(),
                color: stage.color(),
                completed: stage.index() <= self.current.index(),
            })
            .collect()
    }

    #[must_use]
    pub fn estimated_delivery(&self) -> &'static str {
        if self.is_delivered() {
            DELIVERED_TEXT
        } else {
            ESTIMATED_DELIVERY
        }
    }
}
