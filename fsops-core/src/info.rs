//! Path metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a path refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathType {
    File,
    Directory,
    /// Devices, offline storage, sockets, FIFOs and the like.
    Other,
}

/// Canonical stat result shared by every backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathInfo {
    pub path_type: PathType,
    /// Byte count; always 0 for directories.
    pub size: u64,
    /// Seconds since the Unix epoch, 0 when untracked.
    pub create_time: i64,
    pub modify_time: i64,
    pub access_time: i64,
}

impl PathInfo {
    pub fn directory() -> Self {
        Self {
            path_type: PathType::Directory,
            size: 0,
            create_time: 0,
            modify_time: 0,
            access_time: 0,
        }
    }

    pub fn new(path_type: PathType, size: u64) -> Self {
        let size = if path_type == PathType::Directory { 0 } else { size };
        Self { path_type, size, ..Self::directory() }
    }

    pub fn with_times(mut self, create_time: i64, modify_time: i64, access_time: i64) -> Self {
        self.create_time = create_time;
        self.modify_time = modify_time;
        self.access_time = access_time;
        self
    }

    pub fn is_file(&self) -> bool {
        self.path_type == PathType::File
    }

    pub fn is_directory(&self) -> bool {
        self.path_type == PathType::Directory
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.create_time)
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.modify_time)
    }

    pub fn accessed_at(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.access_time)
    }
}

fn to_datetime(secs: i64) -> Option<DateTime<Utc>> {
    if secs == 0 {
        None
    } else {
        DateTime::from_timestamp(secs, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_size_forced_to_zero() {
        let info = PathInfo::new(PathType::Directory, 4096);
        assert!(info.is_directory());
        assert_eq!(info.size, 0);
    }

    #[test]
    fn test_file_and_other_keep_size() {
        assert_eq!(PathInfo::new(PathType::File, 12).size, 12);
        assert_eq!(PathInfo::new(PathType::Other, 7).size, 7);
    }

    #[test]
    fn test_untracked_times_have_no_datetime() {
        let info = PathInfo::new(PathType::File, 1).with_times(0, 1_704_067_200, 0);
        assert!(info.created_at().is_none());
        assert!(info.accessed_at().is_none());
        assert_eq!(
            info.modified_at().map(|t| t.format("%Y-%m-%d").to_string()),
            Some("2024-01-01".to_string())
        );
    }
}
