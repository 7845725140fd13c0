//! ActorEntity implementation for [`FoodTracker`].
//!
//! A transition runs entirely inside the tracker actor: the legality check, the queue release
//! on the menu actor, the timestamps and the event. The framework commits the tracker only
//! when the action returns `Ok`, so a concurrent duplicate request (driver and operator both
//! asking for `Ready`) finds the tracker already moved and fails with `InvalidTransition`
//! instead of releasing the queue slot or announcing the item twice.

use super::actions::TrackerAction;
use super::error::TrackerError;
use super::state_machine;
use super::TrackerContext;
use crate::clients::MenuClient;
use crate::events::TrackingEvent;
use crate::menu_actor::MenuError;
use crate::model::{FoodTracker, TrackerCreate, TrackerId, TrackerStatus};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::convert::Infallible;
use tracing::{info, warn};

impl FoodTracker {
    async fn release_queue_slot(&self, menu: &MenuClient) -> Result<(), TrackerError> {
        match menu.adjust_queue_depth(self.menu_item_id, -1).await {
            Ok(_) => Ok(()),
            Err(MenuError::NotFound(_)) => {
                warn!(tracker_id = %self.id, menu_item_id = %self.menu_item_id, "Menu item gone, no queue slot to release");
                Ok(())
            }
            Err(e) => Err(TrackerError::StoreUnavailable(e.to_string())),
        }
    }

    fn event_for(&self, status: TrackerStatus) -> Option<TrackingEvent> {
        match status {
            TrackerStatus::Ready => Some(TrackingEvent::ItemReady {
                order_id: self.order_id,
                tracker_id: self.id,
                item_name: self.item_name.clone(),
            }),
            TrackerStatus::Collected => Some(TrackingEvent::ItemCollected {
                order_id: self.order_id,
                tracker_id: self.id,
                item_name: self.item_name.clone(),
            }),
            TrackerStatus::Queued | TrackerStatus::Preparing => None,
        }
    }
}

#[async_trait]
impl ActorEntity for FoodTracker {
    type Id = TrackerId;
    type Create = TrackerCreate;
    type Update = Infallible;
    type Action = TrackerAction;
    type ActionResult = FoodTracker;
    type Context = TrackerContext;
    type Error = TrackerError;

    fn from_create_params(id: TrackerId, params: TrackerCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id, params))
    }

    /// Trackers only change through transitions.
    async fn on_update(&mut self, update: Infallible, _ctx: &TrackerContext) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: TrackerAction,
        ctx: &TrackerContext,
    ) -> Result<FoodTracker, Self::Error> {
        let TrackerAction::Transition(target) = action;
        let from = self.status;
        if !state_machine::is_legal(from, target) {
            return Err(TrackerError::InvalidTransition {
                tracker: self.id,
                from,
                to: target,
            });
        }

        let now = ctx.clock.now();
        match target {
            TrackerStatus::Preparing => self.prep_started_at = Some(now),
            TrackerStatus::Ready => {
                self.release_queue_slot(&ctx.menu).await?;
                self.actual_ready_at = Some(now);
            }
            TrackerStatus::Queued | TrackerStatus::Collected => {}
        }
        self.status = target;
        self.updated_at = Some(now);

        info!(tracker_id = %self.id, order_id = %self.order_id, %from, to = %target, "Tracker transitioned");
        if let Some(event) = self.event_for(target) {
            ctx.sink.emit(event);
        }
        Ok(self.clone())
    }
}
