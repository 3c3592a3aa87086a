//! POSIX backend

use fsops_core::{
    enumerate::{is_dot_entry, ReadDir},
    time::system_time_to_epoch,
    FsBackend, FsConfig, FsError, FsResult, PathInfo, PathType, Separator,
};
use std::fs::{self, DirBuilder};
use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;
use tracing::debug;

/// Rejects paths the kernel would truncate at an interior NUL.
fn native_path(full_path: &str) -> FsResult<&Path> {
    if full_path.contains('\0') {
        return Err(FsError::encoding(full_path.replace('\0', "\\0")));
    }
    Ok(Path::new(full_path))
}

/// `ENOENT` on the leaf while its parent directory exists.
fn is_missing_leaf(err: &io::Error, path: &Path) -> bool {
    if err.raw_os_error() != Some(libc::ENOENT) {
        return false;
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::metadata(parent).map(|m| m.is_dir()).unwrap_or(false)
        }
        // relative single component: the parent is the working directory
        _ => true,
    }
}

/// Backend for Linux, the BSDs, macOS and other Unix-likes
#[derive(Debug, Clone)]
pub struct PosixBackend {
    dir_mode: u32,
}

impl Default for PosixBackend {
    fn default() -> Self {
        Self::with_config(&FsConfig::default())
    }
}

impl PosixBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &FsConfig) -> Self {
        Self { dir_mode: config.dir_mode }
    }
}

impl FsBackend for PosixBackend {
    fn id(&self) -> &str {
        "posix"
    }

    fn separator(&self) -> Separator {
        Separator::Slash
    }

    fn read_dir(&self, full_path: &str) -> FsResult<ReadDir<'_>> {
        let dir = if full_path.is_empty() { Path::new("/") } else { native_path(full_path)? };
        let entries = fs::read_dir(dir).map_err(|e| FsError::os("opendir", full_path, e))?;
        let dir_name = full_path.to_string();

        Ok(Box::new(entries.filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(FsError::os("readdir", dir_name.as_str(), e))),
            };
            match entry.file_name().into_string() {
                Ok(name) if is_dot_entry(&name) => None,
                Ok(name) => Some(Ok(name)),
                Err(raw) => Some(Err(FsError::encoding(raw.to_string_lossy()))),
            }
        })))
    }

    fn remove(&self, full_path: &str) -> FsResult<()> {
        if full_path.is_empty() {
            return Err(FsError::InvalidPath("cannot remove the filesystem root".into()));
        }
        let path = native_path(full_path)?;
        let meta = match fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if is_missing_leaf(&e, path) => {
                debug!(path = full_path, "already gone");
                return Ok(());
            }
            Err(e) => return Err(FsError::os("lstat", full_path, e)),
        };

        let rc = if meta.is_dir() { fs::remove_dir(path) } else { fs::remove_file(path) };
        match rc {
            Ok(()) => Ok(()),
            // lost a race with another remover
            Err(e) if is_missing_leaf(&e, path) => Ok(()),
            Err(e) => Err(FsError::os("remove", full_path, e)),
        }
    }

    fn rename(&self, old_full_path: &str, new_full_path: &str) -> FsResult<()> {
        let old_path = native_path(old_full_path)?;
        let new_path = native_path(new_full_path)?;
        fs::rename(old_path, new_path).map_err(|e| FsError::os("rename", old_full_path, e))
    }

    fn create_dir(&self, full_path: &str) -> FsResult<()> {
        let path = native_path(full_path)?;
        DirBuilder::new()
            .mode(self.dir_mode)
            .create(path)
            .map_err(|e| FsError::os("mkdir", full_path, e))
    }

    fn stat(&self, full_path: &str) -> FsResult<PathInfo> {
        let path = native_path(full_path)?;
        let meta = fs::metadata(path).map_err(|e| FsError::os("stat", full_path, e))?;

        let path_type = if meta.is_dir() {
            PathType::Directory
        } else if meta.is_file() {
            PathType::File
        } else {
            PathType::Other
        };

        Ok(PathInfo::new(path_type, meta.len()).with_times(
            system_time_to_epoch(meta.created()),
            system_time_to_epoch(meta.modified()),
            system_time_to_epoch(meta.accessed()),
        ))
    }
}
