//! Emulator process port

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while launching the emulator.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The executable could not be started.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Program that was being started.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
}

/// Command line used to start the emulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    /// Executable name or path.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
}

impl LaunchSpec {
    /// Creates a new launch spec.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

/// How a running emulator went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Exited within the grace period after the polite signal.
    Graceful,
    /// Had to be killed after the grace period.
    Killed,
    /// Was already gone when termination started.
    AlreadyExited,
}

/// Starts emulator processes.
pub trait EmulatorLauncher: Send + Sync {
    /// Handle to a running emulator.
    type Process: EmulatorProcess;

    /// Spawns the emulator described by `spec`.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn launch(&self, spec: &LaunchSpec) -> Result<Self::Process, LaunchError>;
}

/// A running emulator owned by the harness.
///
/// Implementations must also bring the process down when dropped without
/// an explicit [`EmulatorProcess::terminate`].
pub trait EmulatorProcess: Send {
    /// OS process id, if still known.
    fn id(&self) -> Option<u32>;

    /// Asks the process to stop, waits up to `grace`, then kills it.
    fn terminate(&mut self, grace: Duration) -> impl Future<Output = Termination> + Send;
}
