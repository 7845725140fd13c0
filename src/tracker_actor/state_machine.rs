//! Legal tracker transitions.
//!
//! The lifecycle is strictly linear. Anything not listed in [`TRANSITIONS`], including a
//! same-state request, is rejected.

use crate::model::TrackerStatus;

pub const TRANSITIONS: [(TrackerStatus, TrackerStatus); 3] = [
    (TrackerStatus::Queued, TrackerStatus::Preparing),
    (TrackerStatus::Preparing, TrackerStatus::Ready),
    (TrackerStatus::Ready, TrackerStatus::Collected),
];

pub fn is_legal(from: TrackerStatus, to: TrackerStatus) -> bool {
    TRANSITIONS.contains(&(from, to))
}

/// The only status a tracker in `from` may move to next.
pub fn next(from: TrackerStatus) -> Option<TrackerStatus> {
    TRANSITIONS
        .iter()
        .find(|(source, _)| *source == from)
        .map(|(_, target)| *target)
}
