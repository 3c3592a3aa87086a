//! Native timestamp conversion
//!
//! Every backend reports times as signed seconds since the Unix epoch. A value
//! of `0` means the filesystem does not track that timestamp.

use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

/// 100ns ticks between 1601-01-01 and 1970-01-01.
pub const FILETIME_UNIX_DELTA: u64 = 11_644_473_600 * FILETIME_TICKS_PER_SECOND;

/// FILETIME resolution is 100ns.
pub const FILETIME_TICKS_PER_SECOND: u64 = 1_000_000_000 / 100;

/// Join the two 32-bit halves of a FILETIME record.
pub fn filetime_from_parts(low: u32, high: u32) -> u64 {
    (u64::from(high) << 32) | u64::from(low)
}

/// Convert a raw FILETIME (100ns ticks since 1601) into Unix seconds.
pub fn filetime_to_epoch(raw: u64) -> i64 {
    if raw == 0 {
        return 0;
    }
    if raw >= FILETIME_UNIX_DELTA {
        ((raw - FILETIME_UNIX_DELTA) / FILETIME_TICKS_PER_SECOND) as i64
    } else {
        -(((FILETIME_UNIX_DELTA - raw) / FILETIME_TICKS_PER_SECOND) as i64)
    }
}

/// Convert a `std::fs::Metadata` timestamp into Unix seconds.
///
/// `Err` is what std returns when the platform or filesystem lacks the field.
pub fn system_time_to_epoch(time: io::Result<SystemTime>) -> i64 {
    let Ok(time) = time else {
        return 0;
    };
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    }
}
