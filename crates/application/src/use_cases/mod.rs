//! Use cases
//!
//! Each step of a harness run, independent of how results are reported.

mod ensure_template;
mod exec_case;
mod health_check;
mod summary;
mod wait_for_ready;

pub use ensure_template::EnsureTemplate;
pub use exec_case::{ExecCaseOutput, RunExecCase, classify};
pub use health_check::{HealthCheck, HealthCheckOutput};
pub use summary::print_summary;
pub use wait_for_ready::{PollSchedule, WaitForReady};
