use std::fmt;

/// Unified error type for the wayfind crate.
#[derive(Debug, Clone)]
pub enum EngineError {
    /// Invalid input provided by the caller.
    InvalidInput(String),
    /// Configuration could not be loaded or saved.
    Config(String),
    /// A state invariant was violated.
    InvariantViolation(String),
    /// Internal error.
    Internal(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            EngineError::Config(msg) => write!(f, "config error: {msg}"),
            EngineError::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
            EngineError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Result type alias using [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;
