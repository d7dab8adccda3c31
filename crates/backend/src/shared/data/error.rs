use thiserror::Error;

/// Failures surfaced by the data layer
#[derive(Debug, Error)]
pub enum DataError {
    /// No live record matches the requested identity
    #[error("record not found")]
    NotFound,

    /// Caller-supplied state is self-contradictory (e.g. duplicate natural
    /// keys in one desired child set, or a taken unique name)
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backing store rejected a write
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Any other store failure, passed through opaquely
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
