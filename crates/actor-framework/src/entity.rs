//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a record type (menu item, food tracker, order, …)
//! implements to be owned by a [`ResourceActor`](crate::ResourceActor). It names the id,
//! the creation and update payloads, the custom actions, the injected context and the error
//! type, and provides the lifecycle hooks the actor calls while it holds exclusive access to
//! the record.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`] runs before the record becomes visible. Returning an error
//!   means nothing is stored.
//! - [`ActorEntity::on_update`] has no default; entities that are never updated can use
//!   [`std::convert::Infallible`] as their `Update` type and match on the empty value.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they can call other actors. The `Context` is handed to `run()` rather
/// than `new()`, so actors can be wired together after they are constructed.
///
/// Hooks must never call back into the actor that is running them: the actor is busy
/// awaiting the hook, so such a call can never be answered.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier. Ids are handed out sequentially, so they must be buildable from
    /// a `u32`; `Ord` keeps query results in creation order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new record.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing record.
    type Update: Send + Sync + Debug;

    /// Record-specific operations (e.g. `ReserveQueue`, `Transition`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` if none are needed.
    type Context: Send + Sync;

    /// The error type for this record.
    ///
    /// One enum per actor rather than one per message: callers match on a single type, at the
    /// cost of every action sharing the same set of variants.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the record from its id and payload. Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the record is built and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    // --- Action Handler (Async) ---

    /// Handles a record-specific action. The record is only changed if this returns `Ok`
    /// and the implementation mutated `self`.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
