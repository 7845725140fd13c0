//! # Progression Driver
//!
//! A background task that moves trackers forward as time passes:
//!
//! - `Queued` → `Preparing` once `created_at + 2 * queue_position` minutes have elapsed.
//! - `Preparing` → `Ready` once `prep_started_at + prep_duration_minutes` have elapsed.
//!
//! Each sweep moves a tracker at most one step and goes through the same
//! [`TrackingService::transition_tracker`] as operator calls, so a tracker an operator has
//! already moved is skipped rather than moved twice. A sweep with nothing due changes
//! nothing.
//!
//! Before looking for due trackers, a sweep retries the order recomputes that failed after
//! their transition had already been committed, so a transient store failure never leaves
//! an order's status behind its trackers for longer than one interval.
//!
//! The loop stops when its [`CancellationToken`] is cancelled. Cancellation is only checked
//! between sweeps, so a sweep that has started always finishes.

use crate::clock::Clock;
use crate::model::{FoodTracker, TrackerStatus};
use crate::prep_time::QUEUE_PENALTY_MINUTES;
use crate::tracking::{TrackingError, TrackingService};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What one sweep did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Trackers moved to `Preparing`.
    pub started: usize,
    /// Trackers moved to `Ready`.
    pub readied: usize,
    /// Trackers whose transition failed; they are retried on the next sweep.
    pub failed: usize,
    /// Orders whose earlier failed recompute succeeded in this sweep.
    pub refreshed: usize,
}

impl SweepReport {
    pub fn transitions(&self) -> usize {
        self.started + self.readied
    }
}

/// The transition a tracker is due for at `now`, if any.
pub fn due_transition(tracker: &FoodTracker, now: DateTime<Utc>) -> Option<TrackerStatus> {
    match tracker.status {
        TrackerStatus::Queued => {
            let wait = i64::from(tracker.queue_position) * i64::from(QUEUE_PENALTY_MINUTES);
            (now >= tracker.created_at + Duration::minutes(wait)).then_some(TrackerStatus::Preparing)
        }
        TrackerStatus::Preparing => {
            let started = tracker.prep_started_at?;
            let prep = Duration::minutes(i64::from(tracker.prep_duration_minutes));
            (now >= started + prep).then_some(TrackerStatus::Ready)
        }
        TrackerStatus::Ready | TrackerStatus::Collected => None,
    }
}

pub struct ProgressionDriver {
    service: TrackingService,
    clock: Arc<dyn Clock>,
    interval: std::time::Duration,
    shutdown: CancellationToken,
}

impl ProgressionDriver {
    pub fn new(
        service: TrackingService,
        clock: Arc<dyn Clock>,
        interval: std::time::Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            service,
            clock,
            interval,
            shutdown,
        }
    }

    /// Runs one pass over the active trackers.
    ///
    /// Fails only when the active trackers cannot be read at all; per-tracker failures are
    /// logged and counted in the report.
    pub async fn sweep(&self) -> Result<SweepReport, TrackingError> {
        let now = self.clock.now();
        let mut report = SweepReport {
            refreshed: self.service.refresh_stale_orders().await,
            ..SweepReport::default()
        };
        let active = self.service.active_trackers().await?;

        for tracker in &active {
            let Some(target) = due_transition(tracker, now) else {
                continue;
            };
            match self.service.transition_tracker(tracker.id, target).await {
                Ok(_) if target == TrackerStatus::Preparing => report.started += 1,
                Ok(_) => report.readied += 1,
                Err(e) if e.is_invalid_transition() => {
                    debug!(tracker_id = %tracker.id, error = %e, "Tracker already moved, skipping");
                }
                Err(e) => {
                    warn!(tracker_id = %tracker.id, order_id = %tracker.order_id, to = %target, error = %e, "Transition failed");
                    report.failed += 1;
                }
            }
        }

        debug!(
            active = active.len(),
            started = report.started,
            readied = report.readied,
            failed = report.failed,
            refreshed = report.refreshed,
            "Sweep finished"
        );
        Ok(report)
    }

    /// Sweeps every `interval` until cancelled.
    pub async fn run(self) {
        info!(interval_secs = self.interval.as_secs(), "Progression driver started");
        // A zero period would make `interval` panic
        let period = self.interval.max(std::time::Duration::from_millis(1));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(e) = self.sweep().await {
                        warn!(error = %e, "Sweep skipped, retrying next interval");
                    }
                }
            }
        }

        info!("Progression driver stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItemId, MenuItemId, OrderId, StallId, TrackerCreate, TrackerId};
    use chrono::TimeZone;

    fn tracker(queue_position: u32, prep_duration_minutes: u32) -> FoodTracker {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        FoodTracker::new(
            TrackerId(1),
            TrackerCreate {
                order_id: OrderId(1),
                line_item_id: LineItemId(1),
                menu_item_id: MenuItemId(1),
                stall_id: StallId(1),
                item_name: "Roti Canai".into(),
                unit_index: 1,
                queue_position,
                prep_duration_minutes,
                estimated_ready_at: created_at,
                created_at,
            },
        )
    }

    #[test]
    fn test_queued_tracker_starts_after_its_queue_wait() {
        let tracker = tracker(3, 5);
        let created = tracker.created_at;
        assert_eq!(due_transition(&tracker, created + Duration::minutes(5)), None);
        assert_eq!(
            due_transition(&tracker, created + Duration::minutes(6)),
            Some(TrackerStatus::Preparing)
        );
    }

    #[test]
    fn test_preparing_tracker_is_ready_after_prep_time() {
        let mut tracker = tracker(1, 5);
        let started = tracker.created_at + Duration::minutes(2);
        tracker.status = TrackerStatus::Preparing;
        tracker.prep_started_at = Some(started);

        assert_eq!(due_transition(&tracker, started + Duration::minutes(4)), None);
        assert_eq!(
            due_transition(&tracker, started + Duration::minutes(5)),
            Some(TrackerStatus::Ready)
        );
    }

    #[test]
    fn test_preparing_without_start_time_is_never_due() {
        let mut tracker = tracker(1, 5);
        tracker.status = TrackerStatus::Preparing;
        assert_eq!(due_transition(&tracker, tracker.created_at + Duration::days(1)), None);
    }

    #[test]
    fn test_finished_trackers_are_never_due() {
        let mut tracker = tracker(1, 5);
        let later = tracker.created_at + Duration::days(1);
        tracker.status = TrackerStatus::Ready;
        assert_eq!(due_transition(&tracker, later), None);
        tracker.status = TrackerStatus::Collected;
        assert_eq!(due_transition(&tracker, later), None);
    }
}
