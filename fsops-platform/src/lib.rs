//! Platform backends for fsops
//!
//! Exactly one native backend is compiled in, picked by the target OS.

#[cfg(unix)]
pub mod posix;

pub mod windows;

use fsops_core::{Filesystem, FsConfig};

#[cfg(unix)]
pub use posix::PosixBackend;

#[cfg(windows)]
pub use windows::WindowsBackend;

/// Backend for the build target
#[cfg(unix)]
pub type NativeBackend = posix::PosixBackend;

/// Backend for the build target
#[cfg(windows)]
pub type NativeBackend = windows::WindowsBackend;

pub fn native(config: &FsConfig) -> NativeBackend {
    NativeBackend::with_config(config)
}

/// Facade over the native backend
pub fn filesystem(config: FsConfig) -> Filesystem<NativeBackend> {
    let backend = native(&config);
    Filesystem::with_config(backend, config)
}
