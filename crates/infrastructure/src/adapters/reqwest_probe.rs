//! HTTP probe implementation using reqwest.
//!
//! This adapter implements the `HttpProbe` port using the reqwest library.
//! Every request carries its own timeout; the client itself has none.

use std::time::Duration;

use reqwest::{Client, Url};
use replcheck_application::{HttpProbe, ProbeError, ProbeResponse};

/// HTTP probe implementation using reqwest.
pub struct ReqwestHttpProbe {
    client: Client,
}

impl ReqwestHttpProbe {
    /// Creates a new probe with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - User-Agent: "replcheck/{version}"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, ProbeError> {
        let client = Client::builder()
            .user_agent(concat!("replcheck/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ProbeError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new probe with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Maps reqwest errors to `ProbeError`.
    fn map_error(error: &reqwest::Error, timeout: Duration) -> ProbeError {
        if error.is_timeout() {
            return ProbeError::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            };
        }

        if error.is_connect() {
            let message = error.to_string();
            let chain = error_chain(error);
            if chain.to_lowercase().contains("refused") {
                return ProbeError::ConnectionRefused {
                    host: error
                        .url()
                        .and_then(Url::host_str)
                        .unwrap_or("unknown")
                        .to_string(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return ProbeError::ConnectionFailed(message);
        }

        if error.is_body() || error.is_decode() {
            return ProbeError::Body(error.to_string());
        }

        ProbeError::Other(error.to_string())
    }
}

/// Joins an error with its sources; reqwest keeps the OS reason in the chain.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text
}

impl HttpProbe for ReqwestHttpProbe {
    async fn get(&self, url: &str, timeout: Duration) -> Result<ProbeResponse, ProbeError> {
        let parsed_url =
            Url::parse(url).map_err(|e| ProbeError::InvalidUrl(format!("{e}: {url}")))?;

        let response = self
            .client
            .get(parsed_url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, timeout))?;

        tracing::trace!(url, status, bytes = body.len(), "probe response");
        Ok(ProbeResponse::new(status, String::from_utf8_lossy(&body)))
    }
}
