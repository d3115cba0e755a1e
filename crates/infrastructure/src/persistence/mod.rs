//! File persistence adapters

mod file_system;

pub use file_system::TokioFileSystem;
