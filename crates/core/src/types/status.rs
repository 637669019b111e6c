//! Order stage enum.

use serde::{Deserialize, Serialize};

/// Stage of a placed order, in delivery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStage {
    #[default]
    Confirmed,
    Preparing,
    OnTheWay,
    Delivered,
}

impl OrderStage {
    /// All stages, first to last.
    pub const ALL: [Self; 4] = [
        Self::Confirmed,
        Self::Preparing,
        Self::OnTheWay,
        Self::Delivered,
    ];

    /// Human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Confirmed => "Order Confirmed",
            Self::Preparing => "Preparing",
            Self::OnTheWay => "On the way",
            Self::Delivered => "Delivered",
        }
    }

    /// One-line description shown under the title.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Confirmed => "Your order has been confirmed",
            Self::Preparing => "Restaurant is preparing your food",
            Self::OnTheWay => "Driver is coming to deliver your order",
            Self::Delivered => "Order delivered successfully",
        }
    }

    /// Icon name for clients.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Confirmed => "checkmark-circle",
            Self::Preparing => "restaurant",
            Self::OnTheWay => "car",
            Self::Delivered => "home",
        }
    }

    /// Accent color as a hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Confirmed => "#4ECDC4",
            Self::Preparing => "#FFD93D",
            Self::OnTheWay => "#FF6B35",
            Self::Delivered => "#4CAF50",
        }
    }

    /// Position of this stage in [`OrderStage::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The stage after this one, or `None` at the final stage.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Confirmed => Some(Self::Preparing),
            Self::Preparing => Some(Self::OnTheWay),
            Self::OnTheWay => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }
}

impl std::fmt::Display for OrderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all() {
        for (i, stage) in OrderStage::ALL.iter().enumerate() {
            assert_eq!(stage.index(), i);
        }
    }

    #[test]
    fn test_next_walks_all_stages() {
        let mut stage = OrderStage::Confirmed;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            seen.push(next);
            stage = next;
        }
        assert_eq!(seen, OrderStage::ALL);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&OrderStage::OnTheWay).unwrap();
        assert_eq!(json, "\"on_the_way\"");
    }
}
