//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the harness core and the outside
//! world: the HTTP endpoint under test, the emulator process and the disk.

mod emulator;
mod file_system;
mod http_probe;

pub use emulator::{EmulatorLauncher, EmulatorProcess, LaunchError, LaunchSpec, Termination};
pub use file_system::{FileSystem, FileSystemError};
pub use http_probe::{HttpProbe, ProbeError, ProbeResponse};
