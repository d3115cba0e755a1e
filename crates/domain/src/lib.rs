//! Replcheck Domain - Core harness types
//!
//! This crate defines the domain model for the bash REPL emulator harness.
//! All types here are pure Rust with no I/O dependencies.

pub mod case;
pub mod config;
pub mod error;
pub mod result;
pub mod state;
pub mod template;

pub use case::{ExecCase, decode_snippet, default_cases, encode_snippet};
pub use config::{PORT_ENV_VAR, RunnerConfig};
pub use error::{DomainError, DomainResult};
pub use result::{CaseOutcome, TestReport, TestResult, TestStatus};
pub use state::RunState;
pub use template::{DEFAULT_TEMPLATE, EXEC_ROUTE, HEALTH_ROUTE};
