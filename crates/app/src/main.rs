//! Replcheck - Main Entry Point
//!
//! Starts `sam local start-api`, runs the bash REPL checks against it and
//! exits with 0 only if every check passed.

use std::io::{self, Write};
use std::process::ExitCode;

use replcheck_application::{RunOutcome, TestRunner};
use replcheck_domain::RunnerConfig;
use replcheck_infrastructure::{ReqwestHttpProbe, SamLauncher, TokioFileSystem};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status after Ctrl-C.
const INTERRUPTED: i32 = 130;

/// How the process ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    /// The run finished with this status.
    Finished(u8),
    /// Ctrl-C arrived first; the emulator is left as it is.
    Interrupted,
}

impl Exit {
    fn code(self) -> i32 {
        match self {
            Self::Finished(code) => i32::from(code),
            Self::Interrupted => INTERRUPTED,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing; console output owns stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match RunnerConfig::from_lookup(|key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let probe = match ReqwestHttpProbe::new() {
        Ok(probe) => probe,
        Err(error) => {
            tracing::error!(%error, "failed to create HTTP client");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        port = config.port,
        "starting replcheck v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut runner = TestRunner::new(
        config,
        probe,
        SamLauncher::new(),
        TokioFileSystem::new(),
        io::stdout(),
    );

    match supervise(runner.run_all(), interrupted(), &mut io::stdout()).await {
        Exit::Finished(code) => ExitCode::from(code),
        // Skips destructors, so the emulator keeps running.
        exit @ Exit::Interrupted => std::process::exit(exit.code()),
    }
}

/// Races the run against Ctrl-C.
async fn supervise<R, I, W>(run: R, interrupt: I, out: &mut W) -> Exit
where
    R: Future<Output = RunOutcome>,
    I: Future<Output = ()>,
    W: Write,
{
    tokio::select! {
        outcome = run => {
            log_outcome(&outcome);
            Exit::Finished(outcome.exit_code())
        }
        () = interrupt => {
            let written = writeln!(out, "\n\nInterrupted by user").and_then(|()| out.flush());
            if let Err(error) = written {
                tracing::warn!(%error, "failed to write console output");
            }
            Exit::Interrupted
        }
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

fn log_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::StartupFailed(error) => {
            tracing::error!(%error, "run aborted before testing");
        }
        RunOutcome::Completed(report) => match serde_json::to_string(report) {
            Ok(json) => {
                tracing::debug!(report = %json, success = report.is_success(), "run finished");
            }
            Err(error) => tracing::warn!(%error, "failed to serialize report"),
        },
    }
}
