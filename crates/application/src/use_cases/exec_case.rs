//! Exec case use case.
//!
//! Sends one encoded snippet to the exec endpoint and classifies the answer.

use std::time::Duration;

use replcheck_domain::{ExecCase, TestResult};
use serde_json::Value;

use crate::ports::{HttpProbe, ProbeError, ProbeResponse};

/// Output of running one exec case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecCaseOutput {
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    /// Classified result.
    pub result: TestResult,
}

/// Runs a single exec case against the emulator.
pub struct RunExecCase<'a, P> {
    probe: &'a P,
}

impl<'a, P: HttpProbe> RunExecCase<'a, P> {
    /// Creates a new `RunExecCase` use case.
    #[must_use]
    pub const fn new(probe: &'a P) -> Self {
        Self { probe }
    }

    /// Executes the use case. Never fails: errors become `ERROR` results.
    pub async fn execute(
        &self,
        base_url: &str,
        case: &ExecCase,
        timeout: Duration,
    ) -> ExecCaseOutput {
        let url = format!("{base_url}{}", case.path());
        let response = self.probe.get(&url, timeout).await;
        let status = response.as_ref().ok().map(|r| r.status);
        ExecCaseOutput {
            status,
            result: classify(case.name, response),
        }
    }
}

/// Turns a probe result into a test result.
///
/// - 200 with a JSON object body: `PASS`, output taken from its `body` field
/// - any other status: `FAIL` with `HTTP {status}`
/// - transport error or unparseable body: `ERROR` with the message
#[must_use]
pub fn classify(name: &str, response: Result<ProbeResponse, ProbeError>) -> TestResult {
    match response {
        Ok(response) if response.is_ok() => match extract_body(&response.body) {
            Ok(output) => TestResult::pass(name, output),
            Err(message) => TestResult::error(name, message),
        },
        Ok(response) => TestResult::fail_status(name, response.status),
        Err(error) => TestResult::error(name, error.to_string()),
    }
}

fn extract_body(raw: &str) -> Result<Option<String>, String> {
    let json: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let Value::Object(fields) = json else {
        return Err("response body is not a JSON object".to_string());
    };

    Ok(match fields.get("body") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(other) => Some(other.to_string()),
    })
}
