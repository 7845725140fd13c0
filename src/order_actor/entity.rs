//! ActorEntity implementation for [`Order`].
//!
//! `on_create` allocates the trackers and announces the order; `Recompute` re-derives the
//! status. Both run in the order actor, so recomputations for one order never interleave.

use super::actions::{OrderAction, StatusChange};
use super::aggregator::{self, StatusCounts};
use super::allocator;
use super::error::OrderError;
use super::OrderContext;
use crate::events::TrackingEvent;
use crate::model::{Order, OrderCreate, OrderId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::convert::Infallible;
use tracing::{debug, info};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = Infallible;
    type Action = OrderAction;
    type ActionResult = StatusChange;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        allocator::validate_lines(&params.lines)?;
        Ok(Self::new(id, params.user_id, params.lines))
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        allocator::allocate(self, ctx).await?;
        ctx.sink.emit(TrackingEvent::OrderConfirmed {
            order_id: self.id,
            order_number: self.order_number.clone(),
            user_id: self.user_id,
            estimated_completion_at: self.estimated_completion_at,
        });
        Ok(())
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &OrderContext) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<StatusChange, Self::Error> {
        match action {
            OrderAction::Recompute => {
                let trackers = ctx.trackers.for_order(self.id).await?;
                let counts: StatusCounts = trackers.iter().map(|tracker| tracker.status).collect();

                match aggregator::aggregate(&counts) {
                    Some(status) if status != self.status => {
                        info!(order_id = %self.id, from = %self.status, to = %status, "Order status changed");
                        self.status = status;
                        self.updated_at = Some(ctx.clock.now());
                        Ok(StatusChange {
                            status,
                            changed: true,
                        })
                    }
                    _ => {
                        debug!(order_id = %self.id, status = %self.status, ?counts, "Order status unchanged");
                        Ok(StatusChange {
                            status: self.status,
                            changed: false,
                        })
                    }
                }
            }
        }
    }
}
