//! Path-normalizing facade over a backend
//!
//! Adds what the primitive drivers leave to their callers: separator
//! normalization, recursive directory creation, existence checks and
//! recursive glob matching.

use crate::{
    backend::FsBackend,
    config::FsConfig,
    enumerate::{is_dot_entry, EnumerationResult, ReadDir},
    error::{FsError, FsResult},
    info::PathInfo,
    operations::{CreateOptions, GlobOptions},
    path::FsPath,
};
use glob::{MatchOptions, Pattern};
use std::io;
use tracing::debug;

pub struct Filesystem<B> {
    backend: B,
    config: FsConfig,
}

impl<B: FsBackend> Filesystem<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, FsConfig::default())
    }

    pub fn with_config(backend: B, config: FsConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &FsConfig {
        &self.config
    }

    fn parse(&self, path: &str) -> FsPath {
        FsPath::parse_for(path, self.backend.separator())
    }

    fn native(&self, path: &FsPath) -> String {
        path.to_native(self.backend.separator())
    }

    /// Call `callback(dirname, name)` for each entry in `path`; `dirname`
    /// is `path` exactly as given.
    pub fn enumerate_directory(
        &self,
        path: &str,
        callback: &mut dyn FnMut(&str, &str) -> EnumerationResult,
    ) -> FsResult<()> {
        let full = self.native(&self.parse(path));
        debug!(backend = self.backend.id(), path = %full, "enumerate");
        self.backend.enumerate(&full, path, callback)
    }

    pub fn read_dir(&self, path: &str) -> FsResult<ReadDir<'_>> {
        let full = self.native(&self.parse(path));
        let entries = self.backend.read_dir(&full)?;
        Ok(Box::new(entries.filter(|e| !matches!(e, Ok(name) if is_dot_entry(name)))))
    }

    pub fn stat(&self, path: &str) -> FsResult<PathInfo> {
        self.backend.stat(&self.native(&self.parse(path)))
    }

    /// Like [`stat`](Self::stat), but a missing path is `Ok(None)`.
    pub fn path_info(&self, path: &str) -> FsResult<Option<PathInfo>> {
        self.path_info_of(&self.parse(path))
    }

    fn path_info_of(&self, path: &FsPath) -> FsResult<Option<PathInfo>> {
        match self.backend.stat(&self.native(path)) {
            Ok(info) => Ok(Some(info)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn exists(&self, path: &str) -> FsResult<bool> {
        Ok(self.path_info(path)?.is_some())
    }

    pub fn remove_path(&self, path: &str) -> FsResult<()> {
        let full = self.native(&self.parse(path));
        debug!(backend = self.backend.id(), path = %full, "remove");
        self.backend.remove(&full)
    }

    pub fn rename_path(&self, old_path: &str, new_path: &str) -> FsResult<()> {
        let old_full = self.native(&self.parse(old_path));
        let new_full = self.native(&self.parse(new_path));
        debug!(backend = self.backend.id(), from = %old_full, to = %new_full, "rename");
        self.backend.rename(&old_full, &new_full)
    }

    /// Create `path`, and with `options.parents` every missing ancestor.
    ///
    /// An existing directory at `path` is success when creating parents.
    pub fn create_directory(&self, path: &str, options: &CreateOptions) -> FsResult<()> {
        let target = self.parse(path);
        if !options.parents {
            return self.backend.create_dir(&self.native(&target));
        }

        let mut missing = Vec::new();
        let mut current = target;
        while !current.is_root() {
            match self.path_info_of(&current)? {
                Some(info) if info.is_directory() => break,
                Some(_) => {
                    return Err(FsError::os(
                        "create_directory",
                        self.native(&current),
                        io::Error::from(io::ErrorKind::AlreadyExists),
                    ))
                }
                None => {}
            }
            let parent = current.parent().unwrap_or_default();
            missing.push(current);
            current = parent;
        }

        for dir in missing.iter().rev() {
            let full = self.native(dir);
            debug!(backend = self.backend.id(), path = %full, "create_dir");
            if let Err(e) = self.backend.create_dir(&full) {
                // someone else may have created it in the meantime
                match self.path_info_of(dir)? {
                    Some(info) if info.is_directory() => {}
                    _ => return Err(e),
                }
            }
        }
        Ok(())
    }

    /// Recursively list `path`, returning `/`-separated paths relative to it
    /// that match `pattern` (everything when `None`).
    ///
    /// `*` and `?` never match across a `/`.
    pub fn glob_directory(
        &self,
        path: &str,
        pattern: Option<&str>,
        options: &GlobOptions,
    ) -> FsResult<Vec<String>> {
        let pattern = pattern
            .map(|p| Pattern::new(p).map_err(|e| FsError::Pattern(format!("{p}: {}", e.msg))))
            .transpose()?;
        let match_options = MatchOptions {
            case_sensitive: !(options.case_insensitive || self.config.glob_case_insensitive),
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        let mut matches = Vec::new();
        let walker = GlobWalk {
            fs: self,
            pattern: pattern.as_ref(),
            options: match_options,
        };
        walker.walk(&self.parse(path), "", &mut matches)?;
        debug!(path, found = matches.len(), "glob");
        Ok(matches)
    }
}

struct GlobWalk<'a, B> {
    fs: &'a Filesystem<B>,
    pattern: Option<&'a Pattern>,
    options: MatchOptions,
}

impl<B: FsBackend> GlobWalk<'_, B> {
    fn walk(&self, dir: &FsPath, relative: &str, matches: &mut Vec<String>) -> FsResult<()> {
        let full = self.fs.native(dir);
        let mut nested_error = None;

        let rc = self.fs.backend.enumerate(&full, relative, &mut |parent, name| {
            let rel = if parent.is_empty() {
                name.to_string()
            } else {
                format!("{parent}/{name}")
            };
            if self.pattern.map_or(true, |p| p.matches_with(&rel, self.options)) {
                matches.push(rel.clone());
            }

            let child = dir.child(name);
            let recurse = match self.fs.path_info_of(&child) {
                Ok(info) => info.is_some_and(|i| i.is_directory()),
                Err(e) => {
                    debug!(path = %rel, error = %e, "glob: not descending");
                    false
                }
            };
            if recurse {
                if let Err(e) = self.walk(&child, &rel, matches) {
                    // an unreadable subtree is skipped, anything else aborts
                    if e.raw_os_error().is_none() {
                        nested_error = Some(e);
                        return EnumerationResult::Failure;
                    }
                    debug!(path = %rel, error = %e, "glob: subtree skipped");
                }
            }
            EnumerationResult::Continue
        });

        match (rc, nested_error) {
            (Err(FsError::CallbackFailed), Some(e)) => Err(e),
            (rc, _) => rc,
        }
    }
}
