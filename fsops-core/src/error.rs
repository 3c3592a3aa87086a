//! Error types for fsops

use std::io;
use thiserror::Error;

/// Result type alias
pub type FsResult<T> = Result<T, FsError>;

/// Legacy integer code for any failure.
pub const FAILURE_CODE: i32 = -1;

/// Main error type
#[derive(Error, Debug)]
pub enum FsError {
    /// A path or entry name could not be converted between UTF-8 and the
    /// native encoding. Raised before (or instead of) any OS call.
    #[error("Encoding conversion failed: {0}")]
    Encoding(String),

    /// A native call failed; `source` is the OS last-error state captured
    /// right after the call.
    #[error("{op} failed for '{path}': {source}")]
    Os {
        op: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    /// The enumeration callback asked to abort.
    #[error("Enumeration callback reported failure")]
    CallbackFailed,

    /// The path is well-formed but names something the operation refuses.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid glob pattern: {0}")]
    Pattern(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FsError {
    /// Wrap the calling thread's last OS error.
    pub fn last_os_error(op: &'static str, path: impl Into<String>) -> Self {
        Self::os(op, path, io::Error::last_os_error())
    }

    pub fn os(op: &'static str, path: impl Into<String>, source: io::Error) -> Self {
        FsError::Os { op, path: path.into(), source }
    }

    pub fn encoding(path: impl Into<String>) -> Self {
        FsError::Encoding(path.into())
    }

    /// Failures produced by this layer itself, with no OS error attached.
    pub fn is_layer_local(&self) -> bool {
        matches!(self, FsError::Encoding(_) | FsError::InvalidPath(_) | FsError::Pattern(_))
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            FsError::Os { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Raw OS error code, when the failure came from the OS.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            FsError::Os { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }

    /// Integer form of the error for callers still on the `0 / -1` convention.
    pub fn as_code(&self) -> i32 {
        FAILURE_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_layer_local() {
        assert!(FsError::encoding("bad\0path").is_layer_local());
        assert!(FsError::InvalidPath("..".into()).is_layer_local());

        let os = FsError::os("stat", "/x", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(!os.is_layer_local());
        assert!(!FsError::CallbackFailed.is_layer_local());
    }

    #[test]
    fn test_is_not_found() {
        let os = FsError::os("stat", "/missing", io::Error::from(io::ErrorKind::NotFound));
        assert!(os.is_not_found());
        assert!(!FsError::InvalidPath("".into()).is_not_found());
        assert!(!FsError::CallbackFailed.is_not_found());
    }

    #[test]
    fn test_raw_os_error() {
        let os = FsError::os("remove", "/x", io::Error::from_raw_os_error(2));
        assert_eq!(os.raw_os_error(), Some(2));
        assert_eq!(FsError::encoding("x").raw_os_error(), None);
    }

    #[test]
    fn test_error_display() {
        let err = FsError::os("rename", "/a", io::Error::from(io::ErrorKind::PermissionDenied));
        let text = format!("{}", err);
        assert!(text.starts_with("rename failed for '/a'"));

        let err = FsError::InvalidPath("cannot remove the filesystem root".into());
        assert_eq!(format!("{}", err), "Invalid path: cannot remove the filesystem root");
    }

    #[test]
    fn test_as_code() {
        assert_eq!(FsError::CallbackFailed.as_code(), -1);
        assert_eq!(FsError::encoding("x").as_code(), FAILURE_CODE);
    }
}
