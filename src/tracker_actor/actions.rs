use crate::model::TrackerStatus;

/// Custom actions for food trackers.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerAction {
    /// Moves the tracker to the given status. Answers with the updated tracker.
    Transition(TrackerStatus),
}
