//! Error types for the menu actor.

use thiserror::Error;

/// Errors that can occur during menu operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    /// The requested menu item was not found.
    #[error("Menu item not found: {0}")]
    NotFound(String),

    /// The menu item data provided is invalid.
    #[error("Menu item validation error: {0}")]
    Validation(String),

    /// The menu actor could not be reached.
    #[error("Menu store unavailable: {0}")]
    StoreUnavailable(String),
}
