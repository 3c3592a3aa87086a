//! Backend driver trait
//!
//! One implementation exists per OS family. Paths handed to a backend are
//! already normalized and rendered with [`FsBackend::separator`].

use crate::{
    enumerate::{self, EnumerationResult, ReadDir},
    error::FsResult,
    info::PathInfo,
    path::Separator,
};

/// Primitive filesystem operations every platform must provide
pub trait FsBackend: Send + Sync {
    fn id(&self) -> &str;

    /// Separator the backend expects in native paths.
    fn separator(&self) -> Separator;

    /// Stream the names in `full_path`, minus `.` and `..`.
    ///
    /// An empty `full_path` is the abstract root: drive letters on Windows,
    /// the children of `/` on POSIX. Wildcards in `full_path` are never
    /// interpreted.
    fn read_dir(&self, full_path: &str) -> FsResult<ReadDir<'_>>;

    /// Delete a file or an empty directory. A missing leaf is success; a
    /// missing ancestor is an error.
    fn remove(&self, full_path: &str) -> FsResult<()>;

    /// Move `old_full_path` to `new_full_path`, atomically replacing any
    /// existing destination.
    fn rename(&self, old_full_path: &str, new_full_path: &str) -> FsResult<()>;

    /// Create exactly one directory level.
    fn create_dir(&self, full_path: &str) -> FsResult<()>;

    fn stat(&self, full_path: &str) -> FsResult<PathInfo>;

    /// Feed each entry of `full_path` to `callback` along with `dirname`.
    fn enumerate(
        &self,
        full_path: &str,
        dirname: &str,
        callback: &mut dyn FnMut(&str, &str) -> EnumerationResult,
    ) -> FsResult<()> {
        let entries = self.read_dir(full_path)?;
        enumerate::drive(entries, dirname, callback)
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockBackend;
    use super::*;

    #[test]
    fn test_enumerate_default_skips_dots() {
        let backend = MockBackend::new();
        backend.add_dir("/data").add_file("/data/a").add_file("/data/b");

        let mut seen = Vec::new();
        backend
            .enumerate("/data", "data", &mut |dir, name| {
                seen.push(format!("{dir}:{name}"));
                EnumerationResult::Continue
            })
            .unwrap();
        assert_eq!(seen, vec!["data:a", "data:b"]);
    }

    #[test]
    fn test_enumerate_open_failure() {
        let backend = MockBackend::new();
        let rc = backend.enumerate("/nope", "nope", &mut |_, _| EnumerationResult::Continue);
        assert!(rc.unwrap_err().is_not_found());
    }

    #[test]
    fn test_backend_is_object_safe() {
        let backend: Box<dyn FsBackend> = Box::new(MockBackend::new());
        assert_eq!(backend.id(), "mock");
        assert!(backend.stat("/").unwrap().is_directory());
    }
}
