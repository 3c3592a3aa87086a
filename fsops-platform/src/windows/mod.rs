//! Windows-family backend
//!
//! The attribute mapping and string conversion compile everywhere; only the
//! driver itself needs the Win32 API.

pub mod attrs;
pub mod wide;

#[cfg(windows)]
mod driver;

#[cfg(windows)]
pub use driver::WindowsBackend;
