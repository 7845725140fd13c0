//! # Tracker Actor
//!
//! Owns every [`FoodTracker`]. Trackers are created in batches by order allocation and then
//! only move through [`TrackerAction::Transition`], checked against the table in
//! [`state_machine`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`FoodTracker`]
//! - [`state_machine`] - the transition table
//! - [`actions`] - [`TrackerAction`]
//! - [`error`] - [`TrackerError`]
//!
//! ## Dependencies
//!
//! The actor's context ([`TrackerContext`]) holds a menu client, used to release a queue slot
//! when a unit becomes ready, plus the event sink and the clock. The order status is *not*
//! recomputed from here: the order actor reads trackers, so calling it from a tracker hook
//! could wait on a request that waits on this actor.

pub mod actions;
pub mod entity;
pub mod error;
pub mod state_machine;

pub use actions::*;
pub use error::*;

use crate::clients::MenuClient;
use crate::clock::Clock;
use crate::events::NotificationSink;
use crate::model::FoodTracker;
use actor_framework::{ResourceActor, ResourceClient};
use std::sync::Arc;

/// Dependencies injected into the tracker actor.
#[derive(Clone)]
pub struct TrackerContext {
    pub menu: MenuClient,
    pub sink: Arc<dyn NotificationSink>,
    pub clock: Arc<dyn Clock>,
}

/// Creates a new tracker actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<FoodTracker>, ResourceClient<FoodTracker>) {
    ResourceActor::new(buffer_size)
}
