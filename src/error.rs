//! Error types for a3s-facade

use thiserror::Error;

/// Errors that can occur while turning a payload into a facade
///
/// Field resolution never fails; missing data resolves to `None` or an
/// empty default. Only dispatch on the event type can go wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FacadeError {
    /// Payload has neither a `type` nor an `action`
    #[error("message must contain a .type")]
    MissingType,

    /// Payload type is not one of the known event types
    #[error("unknown type: {0}")]
    UnknownType(String),
}

/// Result type alias for facade operations
pub type Result<T> = std::result::Result<T, FacadeError>;
