//! Harness configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{DomainError, DomainResult};
use crate::template::HEALTH_ROUTE;

/// Environment variable that overrides [`RunnerConfig::port`].
pub const PORT_ENV_VAR: &str = "REPLCHECK_PORT";

/// Settings for one harness run.
///
/// Defaults match the behaviour of `sam local start-api` on a developer
/// machine: port 3000, bound to all interfaces, reached via localhost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Port the emulator listens on.
    pub port: u16,
    /// Address passed to the emulator's `--host`.
    pub bind_host: String,
    /// Host the harness connects to.
    pub client_host: String,
    /// Emulator executable.
    pub program: String,
    /// SAM template, written with defaults if missing.
    pub template_path: PathBuf,
    /// Readiness poll attempts before giving up.
    pub poll_attempts: u32,
    /// Delay between readiness attempts.
    pub poll_interval: Duration,
    /// Per-attempt timeout while polling.
    pub poll_timeout: Duration,
    /// Timeout of the standalone health check.
    pub health_timeout: Duration,
    /// Timeout of each exec case.
    pub exec_timeout: Duration,
    /// How long to wait after SIGTERM before killing the emulator.
    pub shutdown_grace: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_host: "0.0.0.0".to_string(),
            client_host: "localhost".to_string(),
            program: "sam".to_string(),
            template_path: PathBuf::from("template.yaml"),
            poll_attempts: 30,
            poll_interval: Duration::from_secs(1),
            poll_timeout: Duration::from_secs(2),
            health_timeout: Duration::from_secs(10),
            exec_timeout: Duration::from_secs(15),
            shutdown_grace: Duration::from_secs(5),
        }
    }
}

impl RunnerConfig {
    /// Builds a config from defaults plus overrides found through `lookup`.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidConfig`] if an override cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(PORT_ENV_VAR) {
            config.port = parse_port(&raw)?;
        }
        Ok(config)
    }

    /// Base URL requests are sent to, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.client_host, self.port)
    }

    /// Full URL of the health endpoint.
    #[must_use]
    pub fn health_url(&self) -> String {
        format!("{}{HEALTH_ROUTE}", self.base_url())
    }

    /// Arguments passed to [`Self::program`].
    #[must_use]
    pub fn emulator_args(&self) -> Vec<String> {
        vec![
            "local".to_string(),
            "start-api".to_string(),
            "--port".to_string(),
            self.port.to_string(),
            "--host".to_string(),
            self.bind_host.clone(),
        ]
    }
}

fn parse_port(raw: &str) -> DomainResult<u16> {
    let invalid = || DomainError::InvalidConfig {
        key: PORT_ENV_VAR.to_string(),
        value: raw.to_string(),
    };
    match raw.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(port) => Ok(port),
    }
}
