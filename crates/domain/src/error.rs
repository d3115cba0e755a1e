//! Domain error types

use thiserror::Error;

use crate::state::RunState;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A configuration value could not be parsed or is out of range.
    #[error("invalid configuration value for {key}: {value}")]
    InvalidConfig {
        /// The configuration key.
        key: String,
        /// The rejected value.
        value: String,
    },

    /// The run lifecycle was asked to make an illegal move.
    #[error("invalid run state transition: {from} -> {to}")]
    InvalidTransition {
        /// State the runner was in.
        from: RunState,
        /// State that was requested.
        to: RunState,
    },

    /// An encoded snippet is not valid base64url or not valid UTF-8.
    #[error("invalid encoded snippet: {0}")]
    InvalidEncoding(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
