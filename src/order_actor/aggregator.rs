//! Derives an order's status from the statuses of its trackers.

use crate::model::{OrderStatus, TrackerStatus};

/// How many of an order's trackers sit in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub queued: usize,
    pub preparing: usize,
    pub ready: usize,
    pub collected: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.queued + self.preparing + self.ready + self.collected
    }
}

impl FromIterator<TrackerStatus> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = TrackerStatus>>(statuses: I) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            match status {
                TrackerStatus::Queued => counts.queued += 1,
                TrackerStatus::Preparing => counts.preparing += 1,
                TrackerStatus::Ready => counts.ready += 1,
                TrackerStatus::Collected => counts.collected += 1,
            }
        }
        counts
    }
}

/// The order status for a set of tracker counts, or `None` for an order without trackers.
///
/// Checked top to bottom, first match wins:
///
/// | condition | status |
/// |---|---|
/// | all collected | `Completed` |
/// | all ready or collected, some ready | `ReadyForPickup` |
/// | all ready or collected, none ready | `Completed` |
/// | some ready or collected | `PartiallyReady` |
/// | some preparing | `Preparing` |
/// | otherwise | `Accepted` |
///
/// The third row cannot match once the first has been checked; it stays so the ladder reads
/// the same as the pickup rules.
pub fn aggregate(counts: &StatusCounts) -> Option<OrderStatus> {
    let total = counts.total();
    if total == 0 {
        return None;
    }
    let done = counts.ready + counts.collected;

    let status = if counts.collected == total {
        OrderStatus::Completed
    } else if done == total && counts.ready > 0 {
        OrderStatus::ReadyForPickup
    } else if done == total {
        OrderStatus::Completed
    } else if done > 0 {
        OrderStatus::PartiallyReady
    } else if counts.preparing > 0 {
        OrderStatus::Preparing
    } else {
        OrderStatus::Accepted
    };
    Some(status)
}
