//! # Tracking Service
//!
//! The operations the outer layers call: place an order, move a tracker, read an order's
//! progress. [`TrackingService`] sequences the actors; it holds no state of its own.
//!
//! Every successful tracker transition is followed by a recompute of the owning order before
//! the call returns, so an order's status never lags behind its trackers once a caller has
//! seen the transition succeed. When that recompute fails the order is remembered as stale
//! and [`TrackingService::refresh_stale_orders`] retries it; the progression driver calls it
//! at the start of every sweep.

use crate::clients::{MenuClient, OrderClient, TrackerClient};
use crate::menu_actor::MenuError;
use crate::model::{
    FoodTracker, MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, Order, OrderCreate,
    OrderId, StallId, TrackerId, TrackerStatus, UserId,
};
use crate::order_actor::OrderError;
use crate::prep_time;
use crate::tracker_actor::TrackerError;
use actor_framework::ActorClient;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Any failure surfaced by the tracking engine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackingError {
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Order(#[from] OrderError),
}

impl TrackingError {
    /// A referenced menu item, order or tracker does not exist. Retrying will not help.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TrackingError::Menu(MenuError::NotFound(_))
                | TrackingError::Tracker(TrackerError::NotFound(_))
                | TrackingError::Order(OrderError::NotFound(_))
        )
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, TrackingError::Tracker(TrackerError::InvalidTransition { .. }))
    }

    /// A transient store failure; the operation may succeed if retried.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(
            self,
            TrackingError::Menu(MenuError::StoreUnavailable(_))
                | TrackingError::Tracker(TrackerError::StoreUnavailable(_))
                | TrackingError::Order(OrderError::StoreUnavailable(_))
        )
    }
}

/// An order together with its trackers, grouped by status.
#[derive(Debug, Clone, Serialize)]
pub struct OrderTracking {
    pub order: Order,
    pub trackers: BTreeMap<TrackerStatus, Vec<FoodTracker>>,
}

impl OrderTracking {
    fn new(order: Order, trackers: Vec<FoodTracker>) -> Self {
        let mut grouped: BTreeMap<TrackerStatus, Vec<FoodTracker>> = BTreeMap::new();
        for tracker in trackers {
            grouped.entry(tracker.status).or_default().push(tracker);
        }
        Self {
            order,
            trackers: grouped,
        }
    }

    /// Trackers in `status`, in creation order.
    pub fn in_status(&self, status: TrackerStatus) -> &[FoodTracker] {
        self.trackers.get(&status).map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct TrackingService {
    menu: MenuClient,
    trackers: TrackerClient,
    orders: OrderClient,
    default_prep_minutes: u32,
    /// Orders whose trackers moved but whose status could not be recomputed. Shared by clones.
    stale_orders: Arc<Mutex<BTreeSet<OrderId>>>,
}

impl TrackingService {
    pub fn new(
        menu: MenuClient,
        trackers: TrackerClient,
        orders: OrderClient,
        default_prep_minutes: u32,
    ) -> Self {
        Self {
            menu,
            trackers,
            orders,
            default_prep_minutes,
            stale_orders: Arc::default(),
        }
    }

    fn stale(&self) -> MutexGuard<'_, BTreeSet<OrderId>> {
        self.stale_orders.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Places an order, allocating one tracker per unit. Nothing is stored on failure.
    #[instrument(skip(self, params), fields(user_id = %params.user_id))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<Order, TrackingError> {
        let order_id = self.orders.place_order(params).await?;
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;
        info!(%order_id, order_number = %order.order_number, total = %order.total_amount, "Order placed");
        Ok(order)
    }

    /// Moves a tracker and then re-derives its order's status.
    #[instrument(skip(self))]
    pub async fn transition_tracker(
        &self,
        tracker_id: TrackerId,
        target: TrackerStatus,
    ) -> Result<FoodTracker, TrackingError> {
        let tracker = self.trackers.transition(tracker_id, target).await?;
        if let Err(e) = self.orders.recompute(tracker.order_id).await {
            warn!(%tracker_id, order_id = %tracker.order_id, error = %e, "Order status not refreshed, will retry");
            self.stale().insert(tracker.order_id);
            return Err(e.into());
        }
        Ok(tracker)
    }

    /// Orders still waiting for a status recompute.
    pub fn stale_orders(&self) -> Vec<OrderId> {
        self.stale().iter().copied().collect()
    }

    /// Retries the recomputes that failed after their transition was committed.
    ///
    /// Returns how many orders were brought up to date. Orders that still fail stay queued;
    /// orders that no longer exist are dropped.
    pub async fn refresh_stale_orders(&self) -> usize {
        let pending = std::mem::take(&mut *self.stale());
        let mut refreshed = 0;
        for order_id in pending {
            match self.orders.recompute(order_id).await {
                Ok(change) => {
                    info!(%order_id, status = %change.status, "Stale order status refreshed");
                    refreshed += 1;
                }
                Err(OrderError::NotFound(_)) => {
                    warn!(%order_id, "Stale order no longer exists, dropping");
                }
                Err(e) => {
                    warn!(%order_id, error = %e, "Order status still not refreshed");
                    self.stale().insert(order_id);
                }
            }
        }
        refreshed
    }

    /// Operator transition scoped to one stall's trackers.
    #[instrument(skip(self))]
    pub async fn transition_tracker_for_stall(
        &self,
        stall_id: StallId,
        tracker_id: TrackerId,
        target: TrackerStatus,
    ) -> Result<FoodTracker, TrackingError> {
        match self.trackers.get(tracker_id).await? {
            Some(tracker) if tracker.stall_id == stall_id => {
                self.transition_tracker(tracker_id, target).await
            }
            _ => Err(TrackerError::NotFound(tracker_id.to_string()).into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_order_tracking(&self, order_id: OrderId) -> Result<OrderTracking, TrackingError> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;
        let trackers = self.trackers.for_order(order_id).await?;
        Ok(OrderTracking::new(order, trackers))
    }

    /// A customer's orders, newest first.
    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, TrackingError> {
        let mut orders = self.orders.for_user(user_id).await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    /// A stall's work queue, soonest estimate first.
    #[instrument(skip(self))]
    pub async fn stall_trackers(
        &self,
        stall_id: StallId,
        status: Option<TrackerStatus>,
    ) -> Result<Vec<FoodTracker>, TrackingError> {
        let mut trackers = self.trackers.for_stall(stall_id, status).await?;
        trackers.sort_by(|a, b| {
            a.estimated_ready_at
                .cmp(&b.estimated_ready_at)
                .then(a.id.cmp(&b.id))
        });
        Ok(trackers)
    }

    /// Trackers the progression driver may have to move.
    pub async fn active_trackers(&self) -> Result<Vec<FoodTracker>, TrackingError> {
        Ok(self.trackers.active().await?)
    }

    /// What a new unit of the item would take right now. Unknown items get the default.
    #[instrument(skip(self))]
    pub async fn quote_prep_time(&self, menu_item_id: MenuItemId) -> Result<u32, TrackingError> {
        let profile = match self.menu.profile(menu_item_id).await {
            Ok(profile) => Some(profile),
            Err(MenuError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        };
        Ok(prep_time::estimate_or_default(profile.as_ref(), self.default_prep_minutes))
    }

    pub async fn create_menu_item(&self, params: MenuItemCreate) -> Result<MenuItemId, TrackingError> {
        Ok(self.menu.create_menu_item(params).await?)
    }

    pub async fn update_menu_item(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, TrackingError> {
        Ok(self.menu.update_menu_item(id, update).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_taxonomy() {
        let missing: TrackingError = OrderError::NotFound("order_1".into()).into();
        assert!(missing.is_not_found());
        assert!(!missing.is_store_unavailable());

        let invalid: TrackingError = TrackerError::InvalidTransition {
            tracker: TrackerId(1),
            from: TrackerStatus::Queued,
            to: TrackerStatus::Collected,
        }
        .into();
        assert!(invalid.is_invalid_transition());
        assert_eq!(invalid.to_string(), "Invalid transition for tracker_1: Queued -> Collected");

        let down: TrackingError = MenuError::StoreUnavailable("Actor closed".into()).into();
        assert!(down.is_store_unavailable());
    }
}
