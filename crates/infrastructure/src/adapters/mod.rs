//! Infrastructure adapters

mod reqwest_probe;
mod sam_process;

pub use reqwest_probe::ReqwestHttpProbe;
pub use sam_process::{SamLauncher, SamProcess};
