//! HTTP probe port

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while probing an endpoint.
///
/// Only transport problems land here; a non-200 answer is a successful
/// probe with an unexpected status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The request did not finish within its timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// Nothing is listening on the target port.
    #[error("connection refused: {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Any other client error.
    #[error("{0}")]
    Other(String),
}

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body decoded as UTF-8 (lossy).
    pub body: String,
}

impl ProbeResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is exactly 200.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Port for issuing GET requests against the emulator.
///
/// This trait abstracts the HTTP client implementation so the harness can
/// be driven by a scripted probe in tests.
pub trait HttpProbe: Send + Sync {
    /// Sends a GET to `url`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the response
    /// cannot be read before the timeout.
    fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<ProbeResponse, ProbeError>> + Send;
}
