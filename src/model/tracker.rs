//! One physical unit of an ordered dish and where it is in the kitchen.
//!
//! Trackers are created in a single batch when their order is placed and afterwards change
//! only through [`TrackerAction::Transition`](crate::tracker_actor::TrackerAction).
use crate::model::{LineItemId, MenuItemId, OrderId, StallId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

record_id!(
    /// Type-safe identifier for food trackers.
    TrackerId,
    "tracker"
);

/// Lifecycle of a single unit: `Queued → Preparing → Ready → Collected`.
///
/// The variant order is the lifecycle order, so `Ord` compares progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrackerStatus {
    Queued,
    Preparing,
    Ready,
    Collected,
}

impl TrackerStatus {
    pub const ALL: [TrackerStatus; 4] = [
        TrackerStatus::Queued,
        TrackerStatus::Preparing,
        TrackerStatus::Ready,
        TrackerStatus::Collected,
    ];

    /// Still waiting on the kitchen.
    pub fn is_active(self) -> bool {
        matches!(self, TrackerStatus::Queued | TrackerStatus::Preparing)
    }
}

impl Display for TrackerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TrackerStatus::Queued => "Queued",
            TrackerStatus::Preparing => "Preparing",
            TrackerStatus::Ready => "Ready",
            TrackerStatus::Collected => "Collected",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for TrackerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackerStatus::ALL
            .into_iter()
            .find(|status| status.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tracker status: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodTracker {
    pub id: TrackerId,
    pub order_id: OrderId,
    pub line_item_id: LineItemId,
    pub menu_item_id: MenuItemId,
    pub stall_id: StallId,
    pub item_name: String,
    /// 1-based position among the identical units of its line item.
    pub unit_index: u32,
    pub status: TrackerStatus,
    /// Queue depth of the menu item when the order was placed, plus `unit_index`.
    pub queue_position: u32,
    pub estimated_ready_at: DateTime<Utc>,
    pub actual_ready_at: Option<DateTime<Utc>>,
    pub prep_started_at: Option<DateTime<Utc>>,
    /// Fixed at allocation.
    pub prep_duration_minutes: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Everything the allocator has decided about a unit before it is stored.
#[derive(Debug, Clone)]
pub struct TrackerCreate {
    pub order_id: OrderId,
    pub line_item_id: LineItemId,
    pub menu_item_id: MenuItemId,
    pub stall_id: StallId,
    pub item_name: String,
    pub unit_index: u32,
    pub queue_position: u32,
    pub prep_duration_minutes: u32,
    pub estimated_ready_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl FoodTracker {
    pub fn new(id: TrackerId, params: TrackerCreate) -> Self {
        Self {
            id,
            order_id: params.order_id,
            line_item_id: params.line_item_id,
            menu_item_id: params.menu_item_id,
            stall_id: params.stall_id,
            item_name: params.item_name,
            unit_index: params.unit_index,
            status: TrackerStatus::Queued,
            queue_position: params.queue_position,
            estimated_ready_at: params.estimated_ready_at,
            actual_ready_at: None,
            prep_started_at: None,
            prep_duration_minutes: params.prep_duration_minutes,
            created_at: params.created_at,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_order_follows_lifecycle() {
        assert!(TrackerStatus::Queued < TrackerStatus::Preparing);
        assert!(TrackerStatus::Preparing < TrackerStatus::Ready);
        assert!(TrackerStatus::Ready < TrackerStatus::Collected);
    }

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!("ready".parse::<TrackerStatus>(), Ok(TrackerStatus::Ready));
        assert_eq!(" Collected ".parse::<TrackerStatus>(), Ok(TrackerStatus::Collected));
        assert!("Delivered".parse::<TrackerStatus>().is_err());
    }
}
