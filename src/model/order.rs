//! A customer order spanning one or more stalls.
//!
//! # Actor Framework
//! Managed by a [`ResourceActor`](actor_framework::ResourceActor). Allocation of the food
//! trackers happens in the order's `on_create` hook (see [`crate::order_actor`]), so an order
//! only becomes visible once all of its trackers exist.
use crate::model::{MenuItemId, StallId, TrackerId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

record_id!(
    /// Type-safe identifier for orders.
    OrderId,
    "order"
);

record_id!(
    /// Type-safe identifier for customers.
    UserId,
    "user"
);

record_id!(
    /// Position of a line within its order, starting at 1.
    LineItemId,
    "line"
);

/// Order-level status, derived from the statuses of the order's trackers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Accepted,
    Preparing,
    #[serde(rename = "Partially Ready")]
    PartiallyReady,
    #[serde(rename = "Ready for Pickup")]
    ReadyForPickup,
    Completed,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::PartiallyReady => "Partially Ready",
            OrderStatus::ReadyForPickup => "Ready for Pickup",
            OrderStatus::Completed => "Completed",
        };
        f.write_str(label)
    }
}

/// One requested dish and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(menu_item_id: MenuItemId, quantity: u32) -> Self {
        Self {
            menu_item_id,
            quantity,
        }
    }
}

/// A priced line of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub menu_item_id: MenuItemId,
    pub stall_id: StallId,
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Short number shown on the pickup screen.
    pub order_number: String,
    pub user_id: UserId,
    /// Requested lines; consumed by allocation, which replaces them with `line_items`.
    #[serde(skip)]
    pub requested: Vec<OrderLine>,
    pub line_items: Vec<LineItem>,
    /// Fixed once the order is created.
    pub tracker_ids: Vec<TrackerId>,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub service_fee: Decimal,
    pub total_amount: Decimal,
    /// Latest `estimated_ready_at` across the trackers at creation; never recomputed.
    pub estimated_completion_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for placing an order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// A freshly accepted order before allocation has priced it or created its trackers.
    pub fn new(id: OrderId, user_id: UserId, lines: Vec<OrderLine>) -> Self {
        Self {
            order_number: format!("{:04}", id.0 % 10_000),
            id,
            user_id,
            requested: lines,
            line_items: Vec::new(),
            tracker_ids: Vec::new(),
            status: OrderStatus::Accepted,
            subtotal: Decimal::ZERO,
            service_fee: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            estimated_completion_at: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: None,
        }
    }

    /// Sets the charges; the total is always derived.
    pub fn set_charges(&mut self, subtotal: Decimal, service_fee: Decimal) {
        self.subtotal = subtotal;
        self.service_fee = service_fee;
        self.total_amount = subtotal + service_fee;
    }
}
