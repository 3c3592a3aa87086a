//! Directory enumeration protocol
//!
//! Backends produce a lazy, finite, non-restartable stream of entry names.
//! [`drive`] feeds that stream to a caller callback one entry at a time and
//! stops pulling from the backend as soon as the callback stops returning
//! [`EnumerationResult::Continue`].

use crate::error::{FsError, FsResult};
use tracing::trace;

/// Lazy stream of entry names produced by a backend.
///
/// Dropping it releases the native search handle.
pub type ReadDir<'a> = Box<dyn Iterator<Item = FsResult<String>> + 'a>;

/// What the enumeration callback wants to happen next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationResult {
    /// Deliver the next entry.
    Continue,
    /// Stop now; the enumeration counts as successful.
    Success,
    /// Stop now; the enumeration fails with [`FsError::CallbackFailed`].
    Failure,
}

impl EnumerationResult {
    /// `1`, `0` or `-1`.
    pub fn as_code(self) -> i32 {
        match self {
            EnumerationResult::Continue => 1,
            EnumerationResult::Success => 0,
            EnumerationResult::Failure => -1,
        }
    }
}

/// `true` for the `.` and `..` pseudo-entries.
pub fn is_dot_entry(name: &str) -> bool {
    name == "." || name == ".."
}

/// Run `callback` over `entries` until they run out or the callback stops.
///
/// `dirname` is handed to the callback unchanged. An entry that fails to
/// convert ends the enumeration with that error; entries already delivered
/// stand.
pub fn drive<'a>(
    entries: ReadDir<'a>,
    dirname: &str,
    callback: &mut dyn FnMut(&str, &str) -> EnumerationResult,
) -> FsResult<()> {
    for entry in entries {
        let name = entry?;
        if is_dot_entry(&name) {
            continue;
        }
        trace!(dirname, name = %name, "entry");
        match callback(dirname, &name) {
            EnumerationResult::Continue => {}
            EnumerationResult::Success => return Ok(()),
            EnumerationResult::Failure => return Err(FsError::CallbackFailed),
        }
    }
    Ok(())
}
