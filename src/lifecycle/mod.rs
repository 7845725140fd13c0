//! Wiring and shutdown of the actors that make up the tracking engine.

pub mod tracking_system;

pub use tracking_system::TrackingSystem;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("{actor} actor task failed: {source}")]
    ActorTask {
        actor: &'static str,
        source: tokio::task::JoinError,
    },
}
