//! A dish on a stall's menu, together with its live preparation queue.
//!
//! # Actor Framework
//! Managed by a [`ResourceActor`](actor_framework::ResourceActor); see
//! [`crate::menu_actor`] for the queue actions. `queue_depth` is only ever changed through
//! those actions, never through [`MenuItemUpdate`].
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

record_id!(
    /// Type-safe identifier for menu items.
    MenuItemId,
    "menu_item"
);

record_id!(
    /// Type-safe identifier for stalls.
    StallId,
    "stall"
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub stall_id: StallId,
    pub name: String,
    pub price: Decimal,
    pub base_prep_minutes: u32,
    pub complexity_multiplier: f64,
    /// Units of this item ordered but not yet ready.
    pub queue_depth: u32,
}

impl MenuItem {
    /// The inputs the preparation-time estimate is computed from.
    pub fn profile(&self) -> MenuItemProfile {
        MenuItemProfile {
            base_prep_minutes: self.base_prep_minutes,
            complexity_multiplier: self.complexity_multiplier,
            queue_depth: self.queue_depth,
        }
    }
}

/// Snapshot of the attributes that drive the preparation-time estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MenuItemProfile {
    pub base_prep_minutes: u32,
    pub complexity_multiplier: f64,
    pub queue_depth: u32,
}

/// Payload for adding a dish to a stall's menu.
#[derive(Debug, Clone)]
pub struct MenuItemCreate {
    pub stall_id: StallId,
    pub name: String,
    pub price: Decimal,
    pub base_prep_minutes: u32,
    pub complexity_multiplier: f64,
}

/// Changes a stall owner may make to an existing dish.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub base_prep_minutes: Option<u32>,
    pub complexity_multiplier: Option<f64>,
}

/// Negative or NaN multipliers collapse to zero.
pub(crate) fn clamp_multiplier(multiplier: f64) -> f64 {
    if multiplier.is_nan() {
        0.0
    } else {
        multiplier.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_multiplier() {
        assert_eq!(clamp_multiplier(1.2), 1.2);
        assert_eq!(clamp_multiplier(-0.5), 0.0);
        assert_eq!(clamp_multiplier(f64::NAN), 0.0);
        assert_eq!(clamp_multiplier(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(MenuItemId(4).to_string(), "menu_item_4");
        assert_eq!(StallId(2).to_string(), "stall_2");
    }
}
