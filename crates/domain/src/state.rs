//! Run lifecycle state machine.

use std::fmt;

use crate::error::{DomainError, DomainResult};

/// Lifecycle of one harness run.
///
/// ```text
/// NotStarted -> EmulatorUp -> Testing -> Stopped
///      \______________________________/
/// ```
///
/// `Stopped` is reachable from every state so teardown can always run,
/// including after a failed start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunState {
    /// Nothing has been launched.
    #[default]
    NotStarted,
    /// The emulator answered its health endpoint.
    EmulatorUp,
    /// Health and exec cases are running.
    Testing,
    /// Teardown has completed.
    Stopped,
}

impl RunState {
    /// Whether moving from `self` to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::NotStarted, Self::EmulatorUp)
                | (Self::EmulatorUp, Self::Testing)
                | (_, Self::Stopped)
        )
    }

    /// Returns the next state, or an error if the move is illegal.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] for any move not shown in
    /// the diagram above.
    pub const fn transition(self, next: Self) -> DomainResult<Self> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Returns the state name as used in log output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::EmulatorUp => "emulator_up",
            Self::Testing => "testing",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
