//! Error types for the order actor.

use crate::menu_actor::MenuError;
use crate::tracker_actor::TrackerError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order, or a menu item it references, was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    Validation(String),

    /// The order actor, or a store it depends on, could not be reached.
    #[error("Order store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<MenuError> for OrderError {
    fn from(e: MenuError) -> Self {
        match e {
            MenuError::NotFound(id) => OrderError::NotFound(id),
            MenuError::Validation(msg) => OrderError::Validation(msg),
            MenuError::StoreUnavailable(msg) => OrderError::StoreUnavailable(msg),
        }
    }
}

impl From<TrackerError> for OrderError {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::StoreUnavailable(other.to_string()),
        }
    }
}
