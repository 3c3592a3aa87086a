//! Win32 backend

use super::attrs::{self, AttributeData, RawFileTime};
use super::wide::{wide_to_utf8, WideString};
use fsops_core::{
    enumerate::{is_dot_entry, ReadDir},
    FsBackend, FsConfig, FsError, FsResult, PathInfo, Separator,
};
use std::ffi::c_void;
use std::{io, mem, ptr};
use tracing::debug;
use windows_sys::Win32::Foundation::{
    ERROR_FILE_NOT_FOUND, ERROR_NO_MORE_FILES, FILETIME, HANDLE, INVALID_HANDLE_VALUE,
};
use windows_sys::Win32::Storage::FileSystem::{
    CreateDirectoryW, DeleteFileW, FindClose, FindExInfoStandard, FindExSearchNameMatch,
    FindFirstFileExW, FindNextFileW, GetFileAttributesExW, GetFileExInfoStandard,
    GetLogicalDrives, MoveFileExW, RemoveDirectoryW, FILE_ATTRIBUTE_DIRECTORY,
    MOVEFILE_REPLACE_EXISTING, WIN32_FILE_ATTRIBUTE_DATA, WIN32_FIND_DATAW,
};

/// Closes the search handle on drop.
struct FindHandle(HANDLE);

impl Drop for FindHandle {
    fn drop(&mut self) {
        unsafe {
            FindClose(self.0);
        }
    }
}

/// Streams `FindFirstFileExW` / `FindNextFileW` results.
///
/// `FindNextFileW` is only called when the consumer asks for another entry.
struct FindEntries {
    handle: FindHandle,
    data: WIN32_FIND_DATAW,
    /// `data` holds an entry that has not been yielded yet
    pending: bool,
    done: bool,
    dir: String,
}

impl Iterator for FindEntries {
    type Item = FsResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }
            if !self.pending {
                if unsafe { FindNextFileW(self.handle.0, &mut self.data) } == 0 {
                    self.done = true;
                    let err = io::Error::last_os_error();
                    if err.raw_os_error() == Some(ERROR_NO_MORE_FILES as i32) {
                        return None;
                    }
                    return Some(Err(FsError::os("FindNextFileW", self.dir.as_str(), err)));
                }
            }
            self.pending = false;

            match wide_to_utf8(&self.data.cFileName) {
                Ok(name) if is_dot_entry(&name) => continue,
                Ok(name) => return Some(Ok(name)),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

fn raw_time(ft: &FILETIME) -> RawFileTime {
    RawFileTime { low: ft.dwLowDateTime, high: ft.dwHighDateTime }
}

fn attribute_data(path: &WideString) -> io::Result<WIN32_FILE_ATTRIBUTE_DATA> {
    let mut data: WIN32_FILE_ATTRIBUTE_DATA = unsafe { mem::zeroed() };
    let ok = unsafe {
        GetFileAttributesExW(
            path.as_ptr(),
            GetFileExInfoStandard,
            &mut data as *mut WIN32_FILE_ATTRIBUTE_DATA as *mut c_void,
        )
    };
    if ok == 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(data)
    }
}

/// Backend for the Windows family, using the wide-character Win32 API
#[derive(Debug, Clone, Default)]
pub struct WindowsBackend;

impl WindowsBackend {
    pub fn new() -> Self {
        Self
    }

    /// Windows has no directory mode bits; the config is accepted for parity.
    pub fn with_config(_config: &FsConfig) -> Self {
        Self
    }

    fn logical_drives(&self) -> FsResult<ReadDir<'_>> {
        let mask = unsafe { GetLogicalDrives() };
        if mask == 0 {
            return Err(FsError::last_os_error("GetLogicalDrives", ""));
        }
        Ok(Box::new(attrs::drive_names(mask).map(Ok)))
    }
}

impl FsBackend for WindowsBackend {
    fn id(&self) -> &str {
        "windows"
    }

    fn separator(&self) -> Separator {
        Separator::Backslash
    }

    fn read_dir(&self, full_path: &str) -> FsResult<ReadDir<'_>> {
        if full_path.is_empty() {
            return self.logical_drives();
        }

        let pattern = WideString::search_pattern(full_path)?;
        let mut data: WIN32_FIND_DATAW = unsafe { mem::zeroed() };
        let handle = unsafe {
            FindFirstFileExW(
                pattern.as_ptr(),
                FindExInfoStandard,
                &mut data as *mut WIN32_FIND_DATAW as *mut c_void,
                FindExSearchNameMatch,
                ptr::null(),
                0,
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            return Err(FsError::last_os_error("FindFirstFileExW", full_path));
        }

        Ok(Box::new(FindEntries {
            handle: FindHandle(handle),
            data,
            pending: true,
            done: false,
            dir: full_path.to_string(),
        }))
    }

    fn remove(&self, full_path: &str) -> FsResult<()> {
        if full_path.is_empty() {
            return Err(FsError::InvalidPath("cannot remove the filesystem root".into()));
        }
        let wpath = WideString::from_utf8(full_path)?;
        let data = match attribute_data(&wpath) {
            Ok(data) => data,
            // ERROR_PATH_NOT_FOUND means an ancestor is missing, which stays an error
            Err(e) if e.raw_os_error() == Some(ERROR_FILE_NOT_FOUND as i32) => {
                debug!(path = full_path, "already gone");
                return Ok(());
            }
            Err(e) => return Err(FsError::os("GetFileAttributesExW", full_path, e)),
        };

        let ok = if data.dwFileAttributes & FILE_ATTRIBUTE_DIRECTORY != 0 {
            unsafe { RemoveDirectoryW(wpath.as_ptr()) }
        } else {
            unsafe { DeleteFileW(wpath.as_ptr()) }
        };
        if ok == 0 {
            return Err(FsError::last_os_error("remove", full_path));
        }
        Ok(())
    }

    fn rename(&self, old_full_path: &str, new_full_path: &str) -> FsResult<()> {
        let wold = WideString::from_utf8(old_full_path)?;
        let wnew = WideString::from_utf8(new_full_path)?;
        let ok = unsafe { MoveFileExW(wold.as_ptr(), wnew.as_ptr(), MOVEFILE_REPLACE_EXISTING) };
        if ok == 0 {
            return Err(FsError::last_os_error("MoveFileExW", old_full_path));
        }
        Ok(())
    }

    fn create_dir(&self, full_path: &str) -> FsResult<()> {
        let wpath = WideString::from_utf8(full_path)?;
        if unsafe { CreateDirectoryW(wpath.as_ptr(), ptr::null()) } == 0 {
            return Err(FsError::last_os_error("CreateDirectoryW", full_path));
        }
        Ok(())
    }

    fn stat(&self, full_path: &str) -> FsResult<PathInfo> {
        let wpath = WideString::from_utf8(full_path)?;
        let data = attribute_data(&wpath).map_err(|e| FsError::os("GetFileAttributesExW", full_path, e))?;
        Ok(attrs::to_path_info(&AttributeData {
            attributes: data.dwFileAttributes,
            size_high: data.nFileSizeHigh,
            size_low: data.nFileSizeLow,
            creation: raw_time(&data.ftCreationTime),
            last_write: raw_time(&data.ftLastWriteTime),
            last_access: raw_time(&data.ftLastAccessTime),
        }))
    }
}
