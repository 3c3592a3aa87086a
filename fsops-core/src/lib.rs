//! fsops core
//!
//! The backend contract, canonical types and platform-neutral logic for the
//! cross-platform filesystem layer.

pub mod backend;
pub mod config;
pub mod enumerate;
pub mod error;
pub mod filesystem;
pub mod info;
pub mod operations;
pub mod path;
pub mod time;

pub use backend::FsBackend;
pub use config::FsConfig;
pub use enumerate::{EnumerationResult, ReadDir};
pub use error::{FsError, FsResult};
pub use filesystem::Filesystem;
pub use info::{PathInfo, PathType};
pub use operations::{CreateOptions, GlobOptions};
pub use path::{FsPath, Separator};
