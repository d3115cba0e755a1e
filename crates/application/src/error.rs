//! Application error types

use std::path::PathBuf;

use replcheck_domain::DomainError;
use thiserror::Error;

use crate::ports::{FileSystemError, LaunchError};

/// Reasons the emulator could not be brought up.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The run lifecycle rejected the requested step.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The emulator process could not be spawned.
    #[error("launch error: {0}")]
    Launch(#[from] LaunchError),

    /// The default template could not be written.
    #[error("failed to write template {path}: {source}")]
    Template {
        /// Template location.
        path: PathBuf,
        /// Underlying file system error.
        #[source]
        source: FileSystemError,
    },

    /// The health endpoint never answered 200 during the poll window.
    #[error("emulator not ready after {attempts} attempts")]
    StartupTimeout {
        /// Attempts made.
        attempts: u32,
    },
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
