//! Replcheck Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the emulator, HTTP and disk)
//! - Use case orchestration and the [`TestRunner`]
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod runner;
pub mod use_cases;

#[cfg(test)]
mod testing;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    EmulatorLauncher, EmulatorProcess, FileSystem, FileSystemError, HttpProbe, LaunchError,
    LaunchSpec, ProbeError, ProbeResponse, Termination,
};
pub use runner::{RunOutcome, TestRunner};
pub use use_cases::{
    EnsureTemplate, ExecCaseOutput, HealthCheck, HealthCheckOutput, PollSchedule, RunExecCase,
    WaitForReady, classify, print_summary,
};
