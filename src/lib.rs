//! # Stall Tracker
//!
//! Per-item preparation tracking for food orders that span several kitchen stalls.
//!
//! Every ordered unit gets its own [`FoodTracker`](model::FoodTracker) with a queue position
//! and an estimated ready time. Trackers move `Queued → Preparing → Ready → Collected`, either
//! because time has passed (the [`driver`]) or because a stall operator said so, and the
//! order's status is re-derived from its trackers after every move.
//!
//! ## Core Components
//!
//! - **[model]**: plain records ([`MenuItem`](model::MenuItem),
//!   [`FoodTracker`](model::FoodTracker), [`Order`](model::Order)).
//! - **[menu_actor]**, **[tracker_actor]**, **[order_actor]**: one resource actor per record
//!   type, built on [`actor_framework`]. The actors serialize all changes to their records.
//! - **[clients]**: typed wrappers around each actor's `ResourceClient`.
//! - **[prep_time]**: the preparation-time estimate.
//! - **[tracking]**: [`TrackingService`](tracking::TrackingService), the operations callers use.
//! - **[driver]**: the periodic sweep that advances trackers.
//! - **[lifecycle]**: [`TrackingSystem`](lifecycle::TrackingSystem) spawns and stops the actors.
//! - **[events]**, **[clock]**, **[config]**: notification sinks, the time source, settings.
//!
//! ## Flow
//!
//! ```text
//! place_order ─► Order::on_create ─► reserve menu queues ─► create trackers (one batch)
//!                                                              │
//! operator / driver ─► Transition ─► release queue on Ready ─► Recompute order status
//!                                        │
//!                                        └─► NotificationSink
//! ```
//!
//! ## Testing
//!
//! Integration tests run the real actors with a [`ManualClock`](clock::ManualClock) so elapsed
//! time is simulated, and use [`actor_framework::mock`] to script an actor's neighbours.

pub mod clients;
pub mod clock;
pub mod config;
pub mod driver;
pub mod events;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod prep_time;
pub mod tracker_actor;
pub mod tracking;
