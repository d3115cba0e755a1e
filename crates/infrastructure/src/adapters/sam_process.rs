//! Emulator process adapter using `tokio::process`.
//!
//! The child is spawned with piped output, drained into `tracing` under the
//! `emulator` target, and with kill-on-drop so that dropping the handle
//! stops the emulator.

use std::process::Stdio;
use std::time::Duration;

use replcheck_application::{
    EmulatorLauncher, EmulatorProcess, LaunchError, LaunchSpec, Termination,
};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};

/// Launches `sam local start-api` or whichever program the [`LaunchSpec`] names.
#[derive(Debug, Clone, Copy, Default)]
pub struct SamLauncher;

impl SamLauncher {
    /// Creates a new launcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EmulatorLauncher for SamLauncher {
    type Process = SamProcess;

    /// Must be called from within a tokio runtime.
    fn launch(&self, spec: &LaunchSpec) -> Result<SamProcess, LaunchError> {
        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: spec.program.clone(),
                source,
            })?;

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_lines(stdout, "stdout"));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_lines(stderr, "stderr"));
        }

        Ok(SamProcess { child })
    }
}

async fn forward_lines<R>(reader: R, stream: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => tracing::debug!(target: "emulator", stream, "{line}"),
            Ok(None) => break,
            Err(error) => {
                tracing::debug!(target: "emulator", stream, %error, "output closed");
                break;
            }
        }
    }
}

/// A running emulator child process.
#[derive(Debug)]
pub struct SamProcess {
    child: Child,
}

impl SamProcess {
    #[cfg(unix)]
    fn request_stop(&self) -> bool {
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        let Some(pid) = self.child.id().and_then(|id| i32::try_from(id).ok()) else {
            return false;
        };
        match kill(Pid::from_raw(pid), Signal::SIGTERM) {
            Ok(()) => true,
            Err(errno) => {
                tracing::warn!(pid, %errno, "failed to send SIGTERM");
                false
            }
        }
    }

    #[cfg(not(unix))]
    fn request_stop(&self) -> bool {
        false
    }
}

impl EmulatorProcess for SamProcess {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    async fn terminate(&mut self, grace: Duration) -> Termination {
        match self.child.try_wait() {
            Ok(Some(status)) => {
                tracing::debug!(%status, "emulator had already exited");
                return Termination::AlreadyExited;
            }
            Ok(None) => {}
            Err(error) => tracing::warn!(%error, "failed to poll emulator status"),
        }

        if self.request_stop() {
            match tokio::time::timeout(grace, self.child.wait()).await {
                Ok(Ok(status)) => {
                    tracing::debug!(%status, "emulator exited after SIGTERM");
                    return Termination::Graceful;
                }
                Ok(Err(error)) => tracing::warn!(%error, "failed to wait for emulator"),
                Err(_) => tracing::warn!(
                    grace_ms = u64::try_from(grace.as_millis()).unwrap_or(u64::MAX),
                    "emulator ignored SIGTERM, killing"
                ),
            }
        }

        if let Err(error) = self.child.kill().await {
            tracing::warn!(%error, "failed to kill emulator");
        }
        Termination::Killed
    }
}
