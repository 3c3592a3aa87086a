//! Translation of Win32 attribute records into `PathInfo`
//!
//! Kept free of `windows-sys` types so the mapping is testable on any host.

use fsops_core::{
    time::{filetime_from_parts, filetime_to_epoch},
    PathInfo, PathType,
};

// winnt.h
pub const FILE_ATTRIBUTE_DIRECTORY: u32 = 0x0000_0010;
pub const FILE_ATTRIBUTE_DEVICE: u32 = 0x0000_0040;
pub const FILE_ATTRIBUTE_OFFLINE: u32 = 0x0000_1000;

/// Split FILETIME as stored in native records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawFileTime {
    pub low: u32,
    pub high: u32,
}

impl RawFileTime {
    pub fn to_epoch(self) -> i64 {
        filetime_to_epoch(filetime_from_parts(self.low, self.high))
    }
}

/// The fields of `WIN32_FILE_ATTRIBUTE_DATA` that stat needs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeData {
    pub attributes: u32,
    pub size_high: u32,
    pub size_low: u32,
    pub creation: RawFileTime,
    pub last_write: RawFileTime,
    pub last_access: RawFileTime,
}

pub fn classify(attributes: u32) -> PathType {
    if attributes & FILE_ATTRIBUTE_DIRECTORY != 0 {
        PathType::Directory
    } else if attributes & (FILE_ATTRIBUTE_OFFLINE | FILE_ATTRIBUTE_DEVICE) != 0 {
        PathType::Other
    } else {
        PathType::File
    }
}

pub fn to_path_info(data: &AttributeData) -> PathInfo {
    let size = (u64::from(data.size_high) << 32) | u64::from(data.size_low);
    PathInfo::new(classify(data.attributes), size).with_times(
        data.creation.to_epoch(),
        data.last_write.to_epoch(),
        data.last_access.to_epoch(),
    )
}

/// `"A:"` .. `"Z:"` for each bit set in a `GetLogicalDrives` mask.
pub fn drive_names(mask: u32) -> impl Iterator<Item = String> {
    (b'A'..=b'Z')
        .filter(move |letter| mask & (1 << (letter - b'A')) != 0)
        .map(|letter| format!("{}:", letter as char))
}
