//! # Order Actor
//!
//! Owns every [`Order`] and coordinates the other actors when an order is placed.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`allocator`] - tracker allocation, run from `on_create`
//! - [`aggregator`] - the order-status ladder
//! - [`actions`] - [`OrderAction`] and [`StatusChange`]
//! - [`error`] - [`OrderError`]
//!
//! ## Dependencies
//!
//! [`OrderContext`] carries the menu and tracker clients plus the sink, clock and service fee.
//! Placing an order reserves menu queues and creates trackers from inside `on_create`, so the
//! order only becomes visible once all of its trackers exist:
//!
//! ```rust,ignore
//! let order_id = order_client.place_order(OrderCreate { user_id, lines }).await?;
//! let order = order_client.get(order_id).await?.expect("stored");
//! assert_eq!(order.tracker_ids.len(), total_units);
//! ```

pub mod actions;
pub mod aggregator;
pub mod allocator;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{MenuClient, TrackerClient};
use crate::clock::Clock;
use crate::events::NotificationSink;
use crate::model::Order;
use actor_framework::{ResourceActor, ResourceClient};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Dependencies injected into the order actor.
#[derive(Clone)]
pub struct OrderContext {
    pub menu: MenuClient,
    pub trackers: TrackerClient,
    pub sink: Arc<dyn NotificationSink>,
    pub clock: Arc<dyn Clock>,
    pub service_fee: Decimal,
}

/// Creates a new order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
