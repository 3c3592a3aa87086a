//! Path normalization
//!
//! Callers may write paths with either `/` or `\`. `FsPath` splits them into
//! segments so each backend can render them with its own separator. Where
//! the backend separator is `/`, a `\` is an ordinary filename character.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Directory separator used when rendering a path for the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Separator {
    Slash,
    Backslash,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Separator::Slash => '/',
            Separator::Backslash => '\\',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Slash => "/",
            Separator::Backslash => "\\",
        }
    }

    /// `/` always splits; `\` only splits on backslash platforms.
    pub fn splits(self, c: char) -> bool {
        match self {
            Separator::Slash => c == '/',
            Separator::Backslash => c == '/' || c == '\\',
        }
    }
}

/// Normalized, separator-agnostic path
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FsPath {
    /// Drive prefix such as `C:`
    pub prefix: Option<String>,
    pub absolute: bool,
    pub segments: Vec<String>,
}

impl FsPath {
    /// Parse accepting both separators and a drive prefix.
    pub fn parse(path: impl AsRef<str>) -> Self {
        Self::parse_for(path, Separator::Backslash)
    }

    /// Parse with the splitting rules of a backend using `separator`.
    ///
    /// Drive prefixes are only recognized for `Separator::Backslash`.
    pub fn parse_for(path: impl AsRef<str>, separator: Separator) -> Self {
        let mut rest = path.as_ref();
        let mut prefix = None;

        let bytes = rest.as_bytes();
        if separator == Separator::Backslash
            && bytes.len() >= 2
            && bytes[0].is_ascii_alphabetic()
            && bytes[1] == b':'
        {
            prefix = Some(rest[..2].to_string());
            rest = &rest[2..];
        }

        let absolute = rest.starts_with(|c: char| separator.splits(c));
        let mut parsed = Self { prefix, absolute, segments: Vec::new() };
        parsed.push_segments(rest, separator);
        // "." and "a/.." mean the working directory, not the abstract root
        if parsed.is_empty() && !path.as_ref().is_empty() {
            parsed.segments.push(".".to_string());
        }
        parsed
    }

    /// The abstract root: no drive, no leading separator, no segments.
    pub fn root() -> Self {
        Self::default()
    }

    fn clear_current_dir(&mut self) {
        if self.segments.len() == 1 && self.segments[0] == "." {
            self.segments.clear();
        }
    }

    fn push_segments(&mut self, path: &str, separator: Separator) {
        for part in path.split(|c: char| separator.splits(c)).filter(|s| !s.is_empty()) {
            if part != "." {
                self.clear_current_dir();
            }
            match part {
                "." => {}
                ".." => {
                    let can_pop = self.segments.last().is_some_and(|s| s != "..");
                    if can_pop {
                        self.segments.pop();
                    } else if !self.absolute && self.prefix.is_none() {
                        self.segments.push(part.to_string());
                    }
                }
                _ => self.segments.push(part.to_string()),
            }
        }
    }

    /// Append a relative path written with either separator.
    pub fn join(&self, name: impl AsRef<str>) -> Self {
        let mut joined = self.clone();
        joined.push_segments(name.as_ref(), Separator::Backslash);
        joined
    }

    /// Append one directory entry name as a single segment, never split.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut child = self.clone();
        child.clear_current_dir();
        child.segments.push(name.into());
        child
    }

    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            let mut parent = self.clone();
            parent.segments.pop();
            Some(parent)
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    pub fn extension(&self) -> Option<&str> {
        self.name().and_then(|n| n.rsplit_once('.')).map(|(_, ext)| ext)
    }

    /// True for the abstract root (`""`).
    pub fn is_empty(&self) -> bool {
        self.prefix.is_none() && !self.absolute && self.segments.is_empty()
    }

    /// True when there is nothing above this path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Render with the given separator. The abstract root renders as `""`.
    pub fn to_native(&self, separator: Separator) -> String {
        let mut out = self.prefix.clone().unwrap_or_default();
        if self.absolute {
            out.push(separator.as_char());
        }
        out.push_str(&self.segments.join(separator.as_str()));
        out
    }
}

impl fmt::Display for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_native(Separator::Slash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let path = FsPath::parse("/home/user/docs");
        assert!(path.absolute);
        assert_eq!(path.segments, vec!["home", "user", "docs"]);
    }

    #[test]
    fn test_parse_handles_empty_segments() {
        let path = FsPath::parse("//home//user//");
        assert_eq!(path.segments, vec!["home", "user"]);
    }

    #[test]
    fn test_parse_mixed_separators() {
        let path = FsPath::parse("C:\\Users/me\\\\Documents");
        assert_eq!(path.prefix.as_deref(), Some("C:"));
        assert!(path.absolute);
        assert_eq!(path.segments, vec!["Users", "me", "Documents"]);
        assert_eq!(path.to_native(Separator::Backslash), "C:\\Users\\me\\Documents");
    }

    #[test]
    fn test_empty_is_abstract_root() {
        let path = FsPath::parse("");
        assert!(path.is_empty());
        assert!(path.is_root());
        assert_eq!(path.to_native(Separator::Backslash), "");
        assert_eq!(FsPath::root(), path);
    }

    #[test]
    fn test_posix_root() {
        let path = FsPath::parse("/");
        assert!(!path.is_empty());
        assert!(path.is_root());
        assert_eq!(path.to_native(Separator::Slash), "/");
    }

    #[test]
    fn test_drive_only() {
        let path = FsPath::parse("D:");
        assert_eq!(path.to_native(Separator::Backslash), "D:");
        assert_eq!(path.join("games").to_native(Separator::Backslash), "D:games");
        assert_eq!(FsPath::parse("D:\\").join("games").to_native(Separator::Backslash), "D:\\games");
    }

    #[test]
    fn test_join() {
        let path = FsPath::parse("/").join("home").join("user");
        assert_eq!(path.segments, vec!["home", "user"]);
    }

    #[test]
    fn test_join_with_dotdot() {
        let path = FsPath::parse("/home/user/docs");
        let new_path = path.join("../pictures");
        assert_eq!(new_path.segments, vec!["home", "user", "pictures"]);
    }

    #[test]
    fn test_dotdot_above_absolute_root_is_dropped() {
        let path = FsPath::parse("/../etc");
        assert_eq!(path.to_native(Separator::Slash), "/etc");
    }

    #[test]
    fn test_relative_dotdot_is_kept() {
        let path = FsPath::parse("../shared/./lib");
        assert_eq!(path.segments, vec!["..", "shared", "lib"]);
    }

    #[test]
    fn test_current_directory_is_not_root() {
        let here = FsPath::parse(".");
        assert!(!here.is_empty());
        assert_eq!(here.to_native(Separator::Slash), ".");
        assert_eq!(FsPath::parse("a/..").to_native(Separator::Slash), ".");
        assert_eq!(here.join("src").to_native(Separator::Slash), "src");
        assert_eq!(here.join("..").to_native(Separator::Slash), "..");
        assert_eq!(FsPath::parse("./a").segments, vec!["a"]);
    }

    #[test]
    fn test_slash_platforms_keep_backslash_in_names() {
        let path = FsPath::parse_for("/tmp/sub\\dir/inner.txt", Separator::Slash);
        assert_eq!(path.segments, vec!["tmp", "sub\\dir", "inner.txt"]);
        assert_eq!(path.to_native(Separator::Slash), "/tmp/sub\\dir/inner.txt");

        let drive = FsPath::parse_for("C:/x", Separator::Slash);
        assert!(drive.prefix.is_none());
        assert_eq!(drive.segments, vec!["C:", "x"]);
    }

    #[test]
    fn test_child_is_one_segment() {
        let dir = FsPath::parse_for("/tmp", Separator::Slash);
        let child = dir.child("sub\\dir");
        assert_eq!(child.segments, vec!["tmp", "sub\\dir"]);
        assert_eq!(child.parent(), Some(dir));
        assert_eq!(FsPath::parse(".").child("a").to_native(Separator::Slash), "a");
    }

    #[test]
    fn test_parent() {
        let path = FsPath::parse("/home/user/docs");
        let parent = path.parent().unwrap();
        assert_eq!(parent.segments, vec!["home", "user"]);
        assert!(FsPath::parse("/").parent().is_none());
    }

    #[test]
    fn test_name_and_extension() {
        let path = FsPath::parse("/home/user/archive.tar.gz");
        assert_eq!(path.name(), Some("archive.tar.gz"));
        assert_eq!(path.extension(), Some("gz"));
        assert!(FsPath::parse("/home/user/file").extension().is_none());
        assert!(FsPath::root().name().is_none());
    }

    #[test]
    fn test_display_uses_slash() {
        let path = FsPath::parse("C:\\temp\\x");
        assert_eq!(format!("{}", path), "C:/temp/x");
    }

    #[test]
    fn test_equality() {
        assert_eq!(FsPath::parse("/home/user"), FsPath::parse("\\home\\user\\"));
    }
}
