//! Error types for MatchForge

use thiserror::Error;

/// Main error type for MatchForge operations
#[derive(Debug, Error)]
pub enum MatchForgeError {
    /// Structural defect in the roster, detected before any solve attempt.
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    /// Defect in the assembled constraint model.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// An extracted schedule failed re-validation against the posted rules.
    #[error("Schedule consistency violation: {0}")]
    ConsistencyViolation(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for MatchForge operations
pub type Result<T> = std::result::Result<T, MatchForgeError>;
