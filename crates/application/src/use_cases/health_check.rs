//! Health check use case.

use std::time::Duration;

use crate::ports::{HttpProbe, ProbeError, ProbeResponse};

/// Output of a single health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckOutput {
    /// Whether the endpoint answered 200.
    pub passed: bool,
    /// The raw response or the transport error.
    pub response: Result<ProbeResponse, ProbeError>,
}

/// Issues one GET against the health endpoint.
pub struct HealthCheck<'a, P> {
    probe: &'a P,
}

impl<'a, P: HttpProbe> HealthCheck<'a, P> {
    /// Creates a new `HealthCheck` use case.
    #[must_use]
    pub const fn new(probe: &'a P) -> Self {
        Self { probe }
    }

    /// Executes the use case. Never fails: errors are reported in the output.
    pub async fn execute(&self, url: &str, timeout: Duration) -> HealthCheckOutput {
        let response = self.probe.get(url, timeout).await;
        let passed = response.as_ref().is_ok_and(ProbeResponse::is_ok);
        HealthCheckOutput { passed, response }
    }
}
