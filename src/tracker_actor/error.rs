//! Error types for the tracker actor.

use crate::model::{TrackerId, TrackerStatus};
use thiserror::Error;

/// Errors that can occur during tracker operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackerError {
    /// The requested tracker was not found.
    #[error("Tracker not found: {0}")]
    NotFound(String),

    /// The requested status change is not in the transition table.
    #[error("Invalid transition for {tracker}: {from} -> {to}")]
    InvalidTransition {
        tracker: TrackerId,
        from: TrackerStatus,
        to: TrackerStatus,
    },

    /// The tracker actor, or a store it depends on, could not be reached.
    #[error("Tracker store unavailable: {0}")]
    StoreUnavailable(String),
}
