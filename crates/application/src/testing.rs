//! In-memory port implementations shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::ports::{
    EmulatorLauncher, EmulatorProcess, FileSystem, FileSystemError, HttpProbe, LaunchError,
    LaunchSpec, ProbeError, ProbeResponse, Termination,
};

type Reply = Result<ProbeResponse, ProbeError>;

#[derive(Default)]
struct ProbeScript {
    queued: HashMap<String, VecDeque<Reply>>,
    defaults: HashMap<String, Reply>,
    log: Vec<String>,
}

/// Probe answering from per-URL queues, then per-URL defaults, then
/// "connection refused".
#[derive(Clone, Default)]
pub struct ScriptedProbe {
    script: Arc<Mutex<ProbeScript>>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, url: &str, reply: Reply) {
        let mut script = self.script.lock().expect("Lock poisoned");
        script.queued.entry(url.to_string()).or_default().push_back(reply);
    }

    pub fn set_default(&self, url: &str, reply: Reply) {
        let mut script = self.script.lock().expect("Lock poisoned");
        script.defaults.insert(url.to_string(), reply);
    }

    pub fn calls(&self, url: &str) -> usize {
        let script = self.script.lock().expect("Lock poisoned");
        script.log.iter().filter(|u| *u == url).count()
    }

    pub fn total_calls(&self) -> usize {
        self.script.lock().expect("Lock poisoned").log.len()
    }

    /// Non-health URLs in request order.
    pub fn call_log(&self) -> Vec<String> {
        let script = self.script.lock().expect("Lock poisoned");
        script
            .log
            .iter()
            .filter(|u| !u.ends_with("/api/health"))
            .cloned()
            .collect()
    }
}

impl HttpProbe for ScriptedProbe {
    async fn get(&self, url: &str, _timeout: Duration) -> Reply {
        let mut script = self.script.lock().expect("Lock poisoned");
        script.log.push(url.to_string());
        if let Some(reply) = script.queued.get_mut(url).and_then(VecDeque::pop_front) {
            return reply;
        }
        script
            .defaults
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(ProbeError::ConnectionRefused {
                    host: "localhost".to_string(),
                    port: 3000,
                })
            })
    }
}

/// Launcher that records launches and hands out [`FakeProcess`]es.
#[derive(Clone, Default)]
pub struct FakeLauncher {
    fail: bool,
    launches: Arc<AtomicUsize>,
    terminations: Arc<AtomicUsize>,
    last_spec: Arc<Mutex<Option<LaunchSpec>>>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn terminations(&self) -> usize {
        self.terminations.load(Ordering::SeqCst)
    }

    pub fn last_spec(&self) -> Option<LaunchSpec> {
        self.last_spec.lock().expect("Lock poisoned").clone()
    }
}

impl EmulatorLauncher for FakeLauncher {
    type Process = FakeProcess;

    fn launch(&self, spec: &LaunchSpec) -> Result<FakeProcess, LaunchError> {
        if self.fail {
            return Err(LaunchError::Spawn {
                program: spec.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }
        self.launches.fetch_add(1, Ordering::SeqCst);
        *self.last_spec.lock().expect("Lock poisoned") = Some(spec.clone());
        Ok(FakeProcess {
            terminations: Arc::clone(&self.terminations),
        })
    }
}

pub struct FakeProcess {
    terminations: Arc<AtomicUsize>,
}

impl EmulatorProcess for FakeProcess {
    fn id(&self) -> Option<u32> {
        Some(4242)
    }

    async fn terminate(&mut self, _grace: Duration) -> Termination {
        self.terminations.fetch_add(1, Ordering::SeqCst);
        Termination::Graceful
    }
}

/// File system backed by a map; `read_only` rejects every write.
#[derive(Clone, Default)]
pub struct MemoryFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    read_only: bool,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, path: &Path, contents: &str) {
        let mut files = self.files.lock().expect("Lock poisoned");
        files.insert(path.to_path_buf(), contents.to_string());
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().expect("Lock poisoned").get(path).cloned()
    }
}

impl FileSystem for MemoryFileSystem {
    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        if self.read_only {
            return Err(FileSystemError::PermissionDenied(path.to_path_buf()));
        }
        let mut files = self.files.lock().expect("Lock poisoned");
        files.insert(
            path.to_path_buf(),
            String::from_utf8_lossy(contents).into_owned(),
        );
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.files.lock().expect("Lock poisoned").contains_key(path)
    }
}
