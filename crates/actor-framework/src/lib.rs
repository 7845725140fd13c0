//! # Actor Framework
//!
//! Resource actors: one Tokio task owns every record of an entity type and serves
//! create / get / query / update / action requests strictly one after another. That gives
//! each record an atomic read-modify-write without locks, which is the only guarantee the
//! tracking engine needs from its record store.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the record type and its hooks.
//! 2. **Runtime** ([`ResourceActor`]): the message loop that owns the records.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed async calls.
//!
//! ## Context Injection
//!
//! Dependencies are passed to `run(context)`, not to `new()`. Actors are all constructed
//! first and wired afterwards, so an order actor can hold a tracker client without the
//! tracker actor having to exist yet.
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//! use std::convert::Infallible;
//!
//! #[derive(Clone, Debug)]
//! struct Counter { id: u32, value: u32 }
//! #[derive(Debug)] struct CounterCreate;
//! #[derive(Debug)] enum CounterAction { Add(u32) }
//! #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
//!
//! #[async_trait]
//! impl ActorEntity for Counter {
//!     type Id = u32; type Create = CounterCreate; type Update = Infallible;
//!     type Action = CounterAction; type ActionResult = u32; type Context = ();
//!     type Error = CounterError;
//!
//!     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, value: 0 })
//!     }
//!     async fn on_update(&mut self, update: Infallible, _: &()) -> Result<(), Self::Error> {
//!         match update {}
//!     }
//!     async fn handle_action(&mut self, action: CounterAction, _: &()) -> Result<u32, Self::Error> {
//!         let CounterAction::Add(n) = action;
//!         self.value += n;
//!         Ok(self.value)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Counter>::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(CounterCreate).await.unwrap();
//!     assert_eq!(client.perform_action(id, CounterAction::Add(2)).await.unwrap(), 2);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task; different actors run in parallel.
//! - Requests to one actor are processed sequentially.
//! - A hook may call *other* actors, but never the one running it.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a script so one real actor can be tested
//! against mocked neighbours.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
