//! # Framework Errors
//!
//! Common errors produced by the runtime itself. Errors raised by an entity's hooks travel
//! inside [`FrameworkError::EntityError`] and can be recovered with
//! [`FrameworkError::downcast_entity`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the typed entity error, or hands the framework error back unchanged.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }

    /// True when the actor task is gone and the request never reached a record.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, FrameworkError::ActorClosed | FrameworkError::ActorDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("queue is empty")]
    struct QueueEmpty;

    #[derive(Debug, thiserror::Error)]
    #[error("other")]
    struct Other;

    #[test]
    fn test_downcast_recovers_entity_error() {
        let err = FrameworkError::EntityError(Box::new(QueueEmpty));
        assert_eq!(err.downcast_entity::<QueueEmpty>().unwrap(), QueueEmpty);
    }

    #[test]
    fn test_downcast_keeps_foreign_errors() {
        let err = FrameworkError::EntityError(Box::new(Other));
        let back = err.downcast_entity::<QueueEmpty>().unwrap_err();
        assert!(matches!(back, FrameworkError::EntityError(_)));

        let closed = FrameworkError::ActorClosed.downcast_entity::<QueueEmpty>();
        assert!(matches!(closed, Err(FrameworkError::ActorClosed)));
    }

    #[test]
    fn test_unavailable_classification() {
        assert!(FrameworkError::ActorClosed.is_unavailable());
        assert!(FrameworkError::ActorDropped.is_unavailable());
        assert!(!FrameworkError::NotFound("x".into()).is_unavailable());
    }
}
