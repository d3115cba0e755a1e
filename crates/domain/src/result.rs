//! Test results and the aggregated report.

use std::fmt;

use serde::Serialize;

/// Classification of a single exec case.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestStatus {
    /// HTTP 200 with a parseable JSON body.
    Pass,
    /// The endpoint answered with a non-200 status.
    Fail,
    /// The request could not be completed or the body was not JSON.
    Error,
}

impl TestStatus {
    /// Returns the label printed in the summary.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload attached to a result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaseOutcome {
    /// Captured output, absent when the response carried no `body` field.
    Output(Option<String>),
    /// Why the case did not pass.
    Error(String),
}

/// Result of running one exec case. Immutable once built.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TestResult {
    test: String,
    status: TestStatus,
    #[serde(flatten)]
    outcome: CaseOutcome,
}

impl TestResult {
    /// A passing case with its captured output.
    #[must_use]
    pub fn pass(test: impl Into<String>, output: Option<String>) -> Self {
        Self {
            test: test.into(),
            status: TestStatus::Pass,
            outcome: CaseOutcome::Output(output),
        }
    }

    /// A case that got a non-200 answer.
    #[must_use]
    pub fn fail_status(test: impl Into<String>, status: u16) -> Self {
        Self {
            test: test.into(),
            status: TestStatus::Fail,
            outcome: CaseOutcome::Error(format!("HTTP {status}")),
        }
    }

    /// A case that could not be completed.
    #[must_use]
    pub fn error(test: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            status: TestStatus::Error,
            outcome: CaseOutcome::Error(message.into()),
        }
    }

    /// Name of the case.
    #[must_use]
    pub fn test(&self) -> &str {
        &self.test
    }

    /// Status of the case.
    #[must_use]
    pub const fn status(&self) -> TestStatus {
        self.status
    }

    /// Whether the case passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Pass
    }

    /// Captured output of a passing case.
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match &self.outcome {
            CaseOutcome::Output(output) => output.as_deref(),
            CaseOutcome::Error(_) => None,
        }
    }

    /// Error message of a failed or errored case.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            CaseOutcome::Output(_) => None,
            CaseOutcome::Error(message) => Some(message),
        }
    }
}

/// Aggregated outcome of a full run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TestReport {
    /// Whether the standalone health check passed.
    pub health_passed: bool,
    /// Exec results in case order.
    pub exec_results: Vec<TestResult>,
}

impl TestReport {
    /// Creates a new report.
    #[must_use]
    pub const fn new(health_passed: bool, exec_results: Vec<TestResult>) -> Self {
        Self {
            health_passed,
            exec_results,
        }
    }

    /// Number of passing exec cases.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.exec_results.iter().filter(|r| r.passed()).count()
    }

    /// Number of exec cases run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.exec_results.len()
    }

    /// True when the health check and every exec case passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.health_passed && self.exec_results.iter().all(TestResult::passed)
    }
}
