//! Harness orchestration.
//!
//! [`TestRunner`] owns the emulator process for the duration of a run and
//! drives the use cases in order: start, health, exec cases, summary, stop.
//! Console output goes to the writer the runner was built with; structured
//! diagnostics go to `tracing`.

use std::fmt;
use std::io::Write;

use replcheck_domain::{ExecCase, RunState, RunnerConfig, TestReport, TestResult, default_cases};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{EmulatorLauncher, EmulatorProcess, FileSystem, HttpProbe, LaunchSpec};
use crate::use_cases::{
    EnsureTemplate, HealthCheck, PollSchedule, RunExecCase, WaitForReady, print_summary,
};

/// Final outcome of [`TestRunner::run_all`].
#[derive(Debug)]
pub enum RunOutcome {
    /// The emulator never became ready; no case was run.
    StartupFailed(ApplicationError),
    /// Tests ran to completion.
    Completed(TestReport),
}

impl RunOutcome {
    /// True when the emulator came up and every check passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::StartupFailed(_) => false,
            Self::Completed(report) => report.is_success(),
        }
    }

    /// Process exit code: 0 on success, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.is_success())
    }

    /// The report, if tests ran.
    #[must_use]
    pub const fn report(&self) -> Option<&TestReport> {
        match self {
            Self::StartupFailed(_) => None,
            Self::Completed(report) => Some(report),
        }
    }
}

/// Runs the fixed battery against a locally launched emulator.
pub struct TestRunner<P, L: EmulatorLauncher, F, W> {
    config: RunnerConfig,
    probe: P,
    launcher: L,
    fs: F,
    out: W,
    cases: Vec<ExecCase>,
    process: Option<L::Process>,
    state: RunState,
}

impl<P, L, F, W> TestRunner<P, L, F, W>
where
    P: HttpProbe,
    L: EmulatorLauncher,
    F: FileSystem,
    W: Write,
{
    /// Creates a runner with the default exec cases.
    pub fn new(config: RunnerConfig, probe: P, launcher: L, fs: F, out: W) -> Self {
        Self {
            config,
            probe,
            launcher,
            fs,
            out,
            cases: default_cases().to_vec(),
            process: None,
            state: RunState::NotStarted,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Whether an emulator process is currently owned.
    #[must_use]
    pub const fn has_process(&self) -> bool {
        self.process.is_some()
    }

    /// Consumes the runner and returns its output writer.
    ///
    /// Any owned emulator is dropped, which kills it.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Launches the emulator and waits for its health endpoint.
    ///
    /// Returns `false` on any failure; the error is printed and logged. A
    /// process that was spawned but never became ready stays owned so that
    /// [`Self::stop_emulator`] releases it.
    pub async fn start_emulator(&mut self) -> bool {
        self.launch_and_wait().await.is_ok()
    }

    async fn launch_and_wait(&mut self) -> ApplicationResult<()> {
        self.say(format_args!("Starting SAM local API server..."));
        let result = self.try_start().await;
        if let Err(error) = &result {
            tracing::error!(%error, "emulator startup failed");
            if let ApplicationError::StartupTimeout { attempts } = error {
                self.say(format_args!(
                    "Failed to start SAM local within {attempts} attempts"
                ));
            } else {
                self.say(format_args!("Error starting SAM local: {error}"));
            }
        }
        result
    }

    async fn try_start(&mut self) -> ApplicationResult<()> {
        self.state.transition(RunState::EmulatorUp)?;

        let template = self.config.template_path.clone();
        if EnsureTemplate::new(&self.fs).execute(&template).await? {
            self.say(format_args!(
                "No {} found, created basic template",
                template.display()
            ));
        }

        let spec = LaunchSpec::new(self.config.program.clone(), self.config.emulator_args());
        let process = self.launcher.launch(&spec)?;
        tracing::info!(
            program = %spec.program,
            args = ?spec.args,
            pid = ?process.id(),
            "emulator spawned"
        );
        self.process = Some(process);

        self.say(format_args!("Waiting for SAM local to start..."));
        let schedule = PollSchedule {
            attempts: self.config.poll_attempts,
            interval: self.config.poll_interval,
            timeout: self.config.poll_timeout,
        };
        let url = self.config.health_url();
        let attempt = WaitForReady::new(&self.probe).execute(&url, schedule).await?;

        self.state = self.state.transition(RunState::EmulatorUp)?;
        let port = self.config.port;
        tracing::info!(port, attempt, "emulator ready");
        self.say(format_args!("SAM local started on port {port}"));
        Ok(())
    }

    /// Issues one health check. Returns whether it answered 200.
    pub async fn run_health_check(&mut self) -> bool {
        self.say(format_args!("\nTesting health endpoint..."));
        let url = self.config.health_url();
        let output = HealthCheck::new(&self.probe)
            .execute(&url, self.config.health_timeout)
            .await;

        match &output.response {
            Ok(response) => {
                self.say(format_args!("Status: {}", response.status));
                self.say(format_args!("Response: {}", response.body));
                if output.passed {
                    self.say(format_args!("Health check passed"));
                } else {
                    self.say(format_args!("Health check failed"));
                }
            }
            Err(error) => {
                self.say(format_args!("Health check error: {error}"));
            }
        }
        tracing::info!(passed = output.passed, "health check finished");
        output.passed
    }

    /// Runs every exec case in order, one round-trip at a time.
    pub async fn run_exec_cases(&mut self) -> Vec<TestResult> {
        self.say(format_args!("\nTesting exec endpoint..."));
        let base_url = self.config.base_url();
        let cases = self.cases.clone();
        let mut results = Vec::with_capacity(cases.len());

        for case in &cases {
            self.say(format_args!("\nRunning test: {}", case.name));
            let output = RunExecCase::new(&self.probe)
                .execute(&base_url, case, self.config.exec_timeout)
                .await;

            if let Some(status) = output.status {
                self.say(format_args!("Status: {status}"));
            }
            let result = output.result;
            match (result.passed(), output.status) {
                (true, _) => {
                    self.say(format_args!(
                        "Output: {}",
                        result.output().unwrap_or("No output")
                    ));
                    self.say(format_args!("Test passed"));
                }
                (false, Some(status)) if status != 200 => {
                    self.say(format_args!("Test failed with status {status}"));
                }
                (false, _) => {
                    self.say(format_args!(
                        "Test error: {}",
                        result.error_message().unwrap_or_default()
                    ));
                }
            }
            tracing::info!(case = case.name, status = %result.status(), "exec case finished");
            results.push(result);
        }

        results
    }

    /// Prints the summary table for a finished run.
    pub fn print_summary(&mut self, report: &TestReport) {
        if let Err(error) = print_summary(&mut self.out, report) {
            tracing::warn!(%error, "failed to write summary");
        }
    }

    /// Terminates the owned emulator, if any. Safe to call repeatedly.
    ///
    /// Without an owned process this is a no-op and the state is unchanged.
    pub async fn stop_emulator(&mut self) {
        let Some(mut process) = self.process.take() else {
            return;
        };
        self.say(format_args!("\nStopping SAM local server..."));
        let termination = process.terminate(self.config.shutdown_grace).await;
        tracing::info!(?termination, "emulator stopped");
        self.say(format_args!("SAM local stopped"));
        self.mark_stopped();
    }

    /// Full run: start, test, summarize, stop.
    ///
    /// Teardown runs on every return path once startup has been attempted.
    pub async fn run_all(&mut self) -> RunOutcome {
        self.say(format_args!("Starting Bash REPL API Tests"));
        self.say(format_args!("{}", "=".repeat(50)));

        let result = match self.launch_and_wait().await {
            Ok(()) => self.run_tests().await,
            Err(error) => Err(error),
        };

        self.stop_emulator().await;
        self.mark_stopped();
        match result {
            Ok(report) => RunOutcome::Completed(report),
            Err(error) => RunOutcome::StartupFailed(error),
        }
    }

    async fn run_tests(&mut self) -> ApplicationResult<TestReport> {
        self.state = self.state.transition(RunState::Testing)?;
        let health_passed = self.run_health_check().await;
        let exec_results = self.run_exec_cases().await;
        let report = TestReport::new(health_passed, exec_results);
        self.print_summary(&report);
        Ok(report)
    }

    fn mark_stopped(&mut self) {
        match self.state.transition(RunState::Stopped) {
            Ok(next) => self.state = next,
            Err(error) => tracing::warn!(%error, "unexpected state change"),
        }
    }

    fn say(&mut self, args: fmt::Arguments<'_>) {
        if let Err(error) = writeln!(self.out, "{args}") {
            tracing::warn!(%error, "failed to write console output");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use replcheck_domain::{DEFAULT_TEMPLATE, DomainError, TestStatus, encode_snippet};

    use crate::ports::{ProbeError, ProbeResponse};
    use crate::testing::{FakeLauncher, MemoryFileSystem, ScriptedProbe};

    const BASE: &str = "http://localhost:3000";

    fn fast_config() -> RunnerConfig {
        RunnerConfig {
            poll_attempts: 3,
            poll_interval: Duration::from_millis(1),
            ..RunnerConfig::default()
        }
    }

    fn health() -> String {
        format!("{BASE}/api/health")
    }

    fn exec(code: &str) -> String {
        format!("{BASE}/api/exec/{}", encode_snippet(code))
    }

    fn runner(
        probe: ScriptedProbe,
        launcher: FakeLauncher,
        fs: MemoryFileSystem,
    ) -> TestRunner<ScriptedProbe, FakeLauncher, MemoryFileSystem, Vec<u8>> {
        TestRunner::new(fast_config(), probe, launcher, fs, Vec::new())
    }

    fn healthy_probe() -> ScriptedProbe {
        let probe = ScriptedProbe::new();
        probe.set_default(&health(), Ok(ProbeResponse::new(200, "ok")));
        for case in default_cases() {
            probe.set_default(&exec(case.code), Ok(ProbeResponse::new(200, r#"{"body": "x"}"#)));
        }
        probe
    }

    #[tokio::test]
    async fn test_run_all_success() {
        let probe = healthy_probe();
        probe.set_default(
            &exec("echo $((2 + 2))"),
            Ok(ProbeResponse::new(200, r#"{"body": "4"}"#)),
        );
        let launcher = FakeLauncher::new();
        let mut runner = runner(probe, launcher.clone(), MemoryFileSystem::new());

        let outcome = runner.run_all().await;

        assert!(outcome.is_success());
        assert_eq!(outcome.exit_code(), 0);
        let report = outcome.report().expect("Should have a report");
        assert_eq!(report.passed(), 4);
        let math = &report.exec_results[3];
        assert_eq!(math.test(), "Math calculation");
        assert_eq!(math.output(), Some("4"));

        assert_eq!(launcher.launches(), 1);
        assert_eq!(launcher.terminations(), 1);
        assert_eq!(runner.state(), RunState::Stopped);
        assert!(!runner.has_process());
    }

    #[tokio::test]
    async fn test_launch_arguments() {
        let launcher = FakeLauncher::new();
        let mut runner = runner(healthy_probe(), launcher.clone(), MemoryFileSystem::new());
        runner.run_all().await;

        assert_eq!(
            launcher.last_spec(),
            Some(LaunchSpec::new(
                "sam",
                vec![
                    "local".into(),
                    "start-api".into(),
                    "--port".into(),
                    "3000".into(),
                    "--host".into(),
                    "0.0.0.0".into(),
                ]
            ))
        );
    }

    #[tokio::test]
    async fn test_startup_timeout_skips_cases() {
        let probe = ScriptedProbe::new();
        let launcher = FakeLauncher::new();
        let mut runner = runner(probe.clone(), launcher.clone(), MemoryFileSystem::new());

        let outcome = runner.run_all().await;

        assert!(matches!(
            outcome,
            RunOutcome::StartupFailed(ApplicationError::StartupTimeout { attempts: 3 })
        ));
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(probe.calls(&health()), 3);
        for case in default_cases() {
            assert_eq!(probe.calls(&exec(case.code)), 0);
        }
        // The unready child is still released.
        assert_eq!(launcher.terminations(), 1);
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let launcher = FakeLauncher::failing();
        let probe = ScriptedProbe::new();
        let mut runner = runner(probe.clone(), launcher.clone(), MemoryFileSystem::new());

        assert!(!runner.start_emulator().await);
        assert_eq!(probe.total_calls(), 0);
        assert!(!runner.has_process());

        let text = String::from_utf8(runner.into_output()).unwrap();
        assert!(text.contains("Error starting SAM local: launch error: failed to spawn sam"));
    }

    #[tokio::test]
    async fn test_one_failing_case() {
        let probe = healthy_probe();
        probe.set_default(&exec("date"), Ok(ProbeResponse::new(500, "boom")));
        let mut runner = runner(probe, FakeLauncher::new(), MemoryFileSystem::new());

        let outcome = runner.run_all().await;

        assert!(!outcome.is_success());
        let report = outcome.report().expect("Should have a report");
        assert_eq!(report.passed(), 3);
        assert_eq!(report.exec_results[1].status(), TestStatus::Fail);
        assert_eq!(report.exec_results[1].error_message(), Some("HTTP 500"));

        let text = String::from_utf8(runner.into_output()).unwrap();
        assert!(text.contains("Overall: 3/4 exec tests passed"));
        assert!(text.contains("Test failed with status 500"));
    }

    #[tokio::test]
    async fn test_exec_error_is_reported() {
        let probe = healthy_probe();
        probe.set_default(
            &exec("echo $USER && pwd"),
            Err(ProbeError::Timeout { timeout_ms: 15000 }),
        );
        let mut runner = runner(probe, FakeLauncher::new(), MemoryFileSystem::new());

        let outcome = runner.run_all().await;
        let report = outcome.report().expect("Should have a report");
        assert_eq!(report.exec_results[2].status(), TestStatus::Error);

        let text = String::from_utf8(runner.into_output()).unwrap();
        assert!(text.contains("Test error: request timed out after 15000ms"));
        assert!(text.contains("  Environment check: ERROR"));
    }

    #[tokio::test]
    async fn test_cases_run_in_order() {
        let probe = healthy_probe();
        let mut runner = runner(probe.clone(), FakeLauncher::new(), MemoryFileSystem::new());
        let results = runner.run_exec_cases().await;

        let names: Vec<_> = results.iter().map(TestResult::test).collect();
        assert_eq!(
            names,
            vec!["Simple echo", "Date command", "Environment check", "Math calculation"]
        );
        let expected: Vec<_> = default_cases().iter().map(|c| exec(c.code)).collect();
        assert_eq!(probe.call_log(), expected);
    }

    #[tokio::test]
    async fn test_health_check_failure_fails_run() {
        let probe = healthy_probe();
        // Ready during polling, then unhealthy for the standalone check.
        probe.push(&health(), Ok(ProbeResponse::new(200, "ok")));
        probe.set_default(&health(), Ok(ProbeResponse::new(503, "draining")));
        let mut runner = runner(probe, FakeLauncher::new(), MemoryFileSystem::new());

        let outcome = runner.run_all().await;

        let report = outcome.report().expect("Should have a report");
        assert!(!report.health_passed);
        assert_eq!(report.passed(), 4);
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let launcher = FakeLauncher::new();
        let mut runner = runner(healthy_probe(), launcher.clone(), MemoryFileSystem::new());

        runner.stop_emulator().await;
        runner.stop_emulator().await;
        assert_eq!(launcher.terminations(), 0);
        assert_eq!(runner.state(), RunState::NotStarted);

        assert!(runner.start_emulator().await);
        assert_eq!(runner.state(), RunState::EmulatorUp);
        runner.stop_emulator().await;
        runner.stop_emulator().await;
        assert_eq!(launcher.terminations(), 1);
        assert_eq!(runner.state(), RunState::Stopped);
    }

    #[tokio::test]
    async fn test_stop_before_start_prints_nothing() {
        let mut runner = runner(healthy_probe(), FakeLauncher::new(), MemoryFileSystem::new());
        runner.stop_emulator().await;

        assert!(runner.into_output().is_empty());
    }

    #[tokio::test]
    async fn test_testing_requires_running_emulator() {
        let probe = healthy_probe();
        let mut runner = runner(probe.clone(), FakeLauncher::new(), MemoryFileSystem::new());

        let result = runner.run_tests().await;

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::InvalidTransition {
                from: RunState::NotStarted,
                to: RunState::Testing,
            }))
        ));
        assert_eq!(probe.total_calls(), 0);
        assert_eq!(runner.state(), RunState::NotStarted);
    }

    #[tokio::test]
    async fn test_failed_start_still_ends_stopped() {
        let mut runner = runner(
            ScriptedProbe::new(),
            FakeLauncher::failing(),
            MemoryFileSystem::new(),
        );

        let outcome = runner.run_all().await;

        assert!(matches!(outcome, RunOutcome::StartupFailed(ApplicationError::Launch(_))));
        assert_eq!(runner.state(), RunState::Stopped);
    }

    #[tokio::test]
    async fn test_run_all_twice_is_rejected() {
        let launcher = FakeLauncher::new();
        let mut runner = runner(healthy_probe(), launcher.clone(), MemoryFileSystem::new());

        assert!(runner.run_all().await.is_success());
        let second = runner.run_all().await;

        assert!(matches!(
            second,
            RunOutcome::StartupFailed(ApplicationError::Domain(_))
        ));
        assert_eq!(launcher.launches(), 1);
    }

    #[tokio::test]
    async fn test_writes_missing_template() {
        let fs = MemoryFileSystem::new();
        let mut runner = runner(healthy_probe(), FakeLauncher::new(), fs.clone());
        runner.run_all().await;

        assert_eq!(
            fs.contents(Path::new("template.yaml")).as_deref(),
            Some(DEFAULT_TEMPLATE)
        );
        let text = String::from_utf8(runner.into_output()).unwrap();
        assert!(text.contains("No template.yaml found, created basic template"));
    }

    #[tokio::test]
    async fn test_template_write_failure_skips_launch() {
        let launcher = FakeLauncher::new();
        let mut runner = runner(healthy_probe(), launcher.clone(), MemoryFileSystem::read_only());

        let outcome = runner.run_all().await;

        assert!(!outcome.is_success());
        assert_eq!(launcher.launches(), 0);
    }
}
