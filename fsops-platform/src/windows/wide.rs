//! UTF-16 path strings for the wide Win32 API

use fsops_core::{FsError, FsResult};

/// NUL-terminated UTF-16 copy of a path, freed when dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideString(Vec<u16>);

impl WideString {
    /// Fails on an interior NUL, which the OS would silently truncate at.
    pub fn from_utf8(text: &str) -> FsResult<Self> {
        if text.contains('\0') {
            return Err(FsError::encoding(text.replace('\0', "\\0")));
        }
        let mut units: Vec<u16> = text.encode_utf16().collect();
        units.push(0);
        Ok(Self(units))
    }

    /// Append `\*`, the "every entry" search pattern.
    ///
    /// The OS only honors wildcards in the final component, so appending
    /// our own component keeps any `*` or `?` in `dir` from acting as a
    /// filter.
    pub fn search_pattern(dir: &str) -> FsResult<Self> {
        Self::from_utf8(&format!("{dir}\\*"))
    }

    pub fn as_ptr(&self) -> *const u16 {
        self.0.as_ptr()
    }

    /// Units without the trailing NUL.
    #[cfg(test)]
    fn as_units(&self) -> &[u16] {
        &self.0[..self.0.len() - 1]
    }
}

/// Decode a (possibly NUL-terminated) UTF-16 buffer.
///
/// Unpaired surrogates are legal in NTFS names but have no UTF-8 form.
pub fn wide_to_utf8(buffer: &[u16]) -> FsResult<String> {
    let len = buffer.iter().position(|&u| u == 0).unwrap_or(buffer.len());
    let units = &buffer[..len];
    String::from_utf16(units).map_err(|_| FsError::encoding(String::from_utf16_lossy(units)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_utf8_terminates() {
        let wide = WideString::from_utf8("C:\\tmp").unwrap();
        assert_eq!(wide.as_units(), "C:\\tmp".encode_utf16().collect::<Vec<_>>().as_slice());
        assert_eq!(unsafe { *wide.as_ptr().add(6) }, 0);
    }

    #[test]
    fn test_interior_nul_rejected() {
        let err = WideString::from_utf8("bad\0name").unwrap_err();
        assert!(matches!(err, FsError::Encoding(_)));
        assert!(err.is_layer_local());
    }

    #[test]
    fn test_search_pattern_defeats_wildcards() {
        let pattern = WideString::search_pattern("C:\\dir*?").unwrap();
        let text = wide_to_utf8(pattern.as_units()).unwrap();
        assert_eq!(text, "C:\\dir*?\\*");
    }

    #[test]
    fn test_non_ascii_round_trip() {
        let wide = WideString::from_utf8("Überprüfung ✓ 日本").unwrap();
        let mut fixed = [0u16; 260];
        fixed[..wide.as_units().len()].copy_from_slice(wide.as_units());
        assert_eq!(wide_to_utf8(&fixed).unwrap(), "Überprüfung ✓ 日本");
    }

    #[test]
    fn test_unpaired_surrogate_fails() {
        let units = [0x0061, 0xD800, 0x0062, 0];
        let err = wide_to_utf8(&units).unwrap_err();
        assert!(matches!(err, FsError::Encoding(_)));
    }

    #[test]
    fn test_unterminated_buffer() {
        let units: Vec<u16> = "abc".encode_utf16().collect();
        assert_eq!(wide_to_utf8(&units).unwrap(), "abc");
    }
}
