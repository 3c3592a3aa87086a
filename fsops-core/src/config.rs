//! Runtime configuration

use crate::error::{FsError, FsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings shared by the backends and the facade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsConfig {
    /// Permission bits for new directories on POSIX.
    pub dir_mode: u32,
    /// Make every glob case-insensitive regardless of per-call options.
    pub glob_case_insensitive: bool,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            dir_mode: 0o770,
            glob_case_insensitive: false,
        }
    }
}

impl FsConfig {
    pub fn from_toml_str(text: &str) -> FsResult<Self> {
        toml::from_str(text).map_err(|e| FsError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> FsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FsError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// `config.toml` in the per-user config directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "fsops", "fsops")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Load `explicit` if given, else the default file if it exists, else
    /// defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> FsResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "loading config");
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }
}
