use crate::model::OrderStatus;

/// Custom actions for orders.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Re-derives the order status from its trackers' current statuses.
    Recompute,
}

/// Outcome of [`OrderAction::Recompute`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusChange {
    pub status: OrderStatus,
    /// False when the status was already up to date and nothing was written.
    pub changed: bool,
}
