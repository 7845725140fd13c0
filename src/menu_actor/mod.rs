//! # Menu Actor
//!
//! Owns every [`MenuItem`] and, with it, each item's live `queue_depth`.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`MenuItem`]
//! - [`actions`] - [`MenuItemAction`]: profile reads and the queue counter
//! - [`error`] - [`MenuError`]
//!
//! ## Queue Counter
//!
//! Callers never read-modify-write `queue_depth`. Allocation reserves slots with
//! [`MenuItemAction::ReserveQueue`], which returns the depth *before* the reservation, and
//! readiness releases them with [`MenuItemAction::AdjustQueueDepth`]. Both run inside the
//! actor, so concurrent orders for the same dish see consistent snapshots.
//!
//! ```rust
//! use stall_tracker::clients::MenuClient;
//! use stall_tracker::menu_actor;
//! use stall_tracker::model::{MenuItemCreate, StallId};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = menu_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!     let menu = MenuClient::new(client);
//!
//!     let id = menu
//!         .create_menu_item(MenuItemCreate {
//!             stall_id: StallId(1),
//!             name: "Char Kway Teow".into(),
//!             price: Decimal::new(650, 2),
//!             base_prep_minutes: 8,
//!             complexity_multiplier: 1.0,
//!         })
//!         .await?;
//!
//!     let before = menu.reserve_queue(id, 2).await?;
//!     assert_eq!(before.queue_depth, 0);
//!     assert_eq!(menu.profile(id).await?.queue_depth, 2);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::MenuItem;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new menu actor and its client. The actor takes no context.
pub fn new(buffer_size: usize) -> (ResourceActor<MenuItem>, ResourceClient<MenuItem>) {
    ResourceActor::new(buffer_size)
}
