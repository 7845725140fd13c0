//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each client implements [`ActorClient`](actor_framework::ActorClient) for `get` / `list`
//! and adds the domain calls of its actor, with framework errors mapped to the actor's own
//! error type.

pub mod menu_client;
pub mod order_client;
pub mod tracker_client;

pub use menu_client::*;
pub use order_client::*;
pub use tracker_client::*;
