//! Readiness polling use case.

use std::time::Duration;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::HttpProbe;

/// Poll schedule for the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    /// Maximum number of attempts.
    pub attempts: u32,
    /// Pause after an attempt that did not see a 200.
    pub interval: Duration,
    /// Timeout of each attempt.
    pub timeout: Duration,
}

/// Polls the health endpoint until it answers 200.
pub struct WaitForReady<'a, P> {
    probe: &'a P,
}

impl<'a, P: HttpProbe> WaitForReady<'a, P> {
    /// Creates a new `WaitForReady` use case.
    #[must_use]
    pub const fn new(probe: &'a P) -> Self {
        Self { probe }
    }

    /// Returns the 1-based attempt that saw the first 200.
    ///
    /// Connection errors and non-200 answers both count as "not ready yet".
    ///
    /// # Errors
    /// Returns [`ApplicationError::StartupTimeout`] once every attempt is spent.
    pub async fn execute(&self, url: &str, schedule: PollSchedule) -> ApplicationResult<u32> {
        for attempt in 1..=schedule.attempts {
            match self.probe.get(url, schedule.timeout).await {
                Ok(response) if response.is_ok() => {
                    tracing::debug!(attempt, "health endpoint ready");
                    return Ok(attempt);
                }
                Ok(response) => {
                    tracing::debug!(attempt, status = response.status, "health endpoint not ready");
                }
                Err(error) => {
                    tracing::debug!(attempt, %error, "health endpoint unreachable");
                }
            }

            if attempt < schedule.attempts {
                tokio::time::sleep(schedule.interval).await;
            }
        }

        Err(ApplicationError::StartupTimeout {
            attempts: schedule.attempts,
        })
    }
}
