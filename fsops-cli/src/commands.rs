// SPDX-License-Identifier: AGPL-3.0-or-later
//! CLI command implementations

use chrono::{DateTime, Utc};
use console::style;
use fsops_core::{
    CreateOptions, EnumerationResult, Filesystem, FsBackend, FsPath, FsResult, GlobOptions,
    PathInfo, PathType,
};
use tabled::{Table, Tabled};

/// Format a timestamp for display
fn format_time(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format file size
fn format_size(info: &PathInfo, human: bool) -> String {
    match info.path_type {
        PathType::Directory => "-".to_string(),
        _ if human => bytesize::ByteSize(info.size).to_string(),
        _ => info.size.to_string(),
    }
}

/// Format entry kind
fn format_kind(kind: Option<PathType>) -> String {
    match kind {
        Some(PathType::Directory) => style("d").cyan().to_string(),
        Some(PathType::File) => "-".to_string(),
        Some(PathType::Other) => style("o").magenta().to_string(),
        None => "?".to_string(),
    }
}

#[derive(Tabled)]
struct LsEntry {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Modified")]
    modified: String,
    #[tabled(rename = "Name")]
    name: String,
}

/// Collect up to `limit` entry names, stopping the enumeration early.
fn collect_names<B: FsBackend>(
    fs: &Filesystem<B>,
    path: &str,
    all: bool,
    limit: Option<usize>,
) -> FsResult<Vec<String>> {
    let mut names = Vec::new();
    fs.enumerate_directory(path, &mut |_, name| {
        if all || !name.starts_with('.') {
            names.push(name.to_string());
        }
        if limit.is_some_and(|n| names.len() >= n) {
            EnumerationResult::Success
        } else {
            EnumerationResult::Continue
        }
    })?;
    names.sort();
    Ok(names)
}

/// List directory contents
pub fn ls<B: FsBackend>(
    fs: &Filesystem<B>,
    path: &str,
    long: bool,
    all: bool,
    human: bool,
    limit: Option<usize>,
) -> FsResult<()> {
    let names = collect_names(fs, path, all, limit)?;
    if names.is_empty() {
        println!("(empty directory)");
        return Ok(());
    }

    if !long {
        for name in names {
            println!("{name}");
        }
        return Ok(());
    }

    let dir = FsPath::parse_for(path, fs.backend().separator());
    let mut rows = Vec::with_capacity(names.len());
    for name in names {
        // entries can vanish between listing and stat
        let info = fs.path_info(&dir.child(name.as_str()).to_string())?;
        rows.push(LsEntry {
            kind: format_kind(info.map(|i| i.path_type)),
            size: info.map(|i| format_size(&i, human)).unwrap_or_else(|| "-".into()),
            modified: format_time(info.and_then(|i| i.modified_at())),
            name,
        });
    }
    println!("{}", Table::new(rows));
    Ok(())
}

/// Recursive glob
pub fn glob<B: FsBackend>(
    fs: &Filesystem<B>,
    path: &str,
    pattern: Option<&str>,
    ignore_case: bool,
) -> FsResult<()> {
    let options = GlobOptions { case_insensitive: ignore_case };
    let mut found = fs.glob_directory(path, pattern, &options)?;
    found.sort();
    for p in found {
        println!("{p}");
    }
    Ok(())
}

/// Move/rename
pub fn mv<B: FsBackend>(fs: &Filesystem<B>, source: &str, dest: &str) -> FsResult<()> {
    fs.rename_path(source, dest)?;
    println!("Moved {} -> {}", source, dest);
    Ok(())
}

/// Remove files or empty directories
pub fn rm<B: FsBackend>(fs: &Filesystem<B>, paths: &[String]) -> FsResult<()> {
    for path in paths {
        fs.remove_path(path)?;
        println!("Removed {}", path);
    }
    Ok(())
}

/// Create directories
pub fn mkdir<B: FsBackend>(fs: &Filesystem<B>, paths: &[String], parents: bool) -> FsResult<()> {
    let options = CreateOptions { parents };
    for path in paths {
        fs.create_directory(path, &options)?;
        println!("Created {}", path);
    }
    Ok(())
}

/// Show file/directory information
pub fn stat<B: FsBackend>(fs: &Filesystem<B>, path: &str) -> FsResult<()> {
    let info = fs.stat(path)?;

    println!("  Path: {}", FsPath::parse_for(path, fs.backend().separator()));
    println!("  Type: {:?}", info.path_type);
    if info.path_type != PathType::Directory {
        println!("  Size: {} ({})", info.size, bytesize::ByteSize(info.size));
    }
    println!("  Created:  {}", format_time(info.created_at()));
    println!("  Modified: {}", format_time(info.modified_at()));
    println!("  Accessed: {}", format_time(info.accessed_at()));
    Ok(())
}

/// List the filesystem roots
pub fn roots<B: FsBackend>(fs: &Filesystem<B>) -> FsResult<()> {
    println!("Roots ({} backend):", fs.backend().id());
    for name in collect_names(fs, "", true, None)? {
        println!("  {}", style(name).green());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(&PathInfo::directory(), false), "-");
        assert_eq!(format_size(&PathInfo::new(PathType::File, 42), false), "42");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(None), "-");
        let t = DateTime::from_timestamp(1_704_067_200, 0);
        assert_eq!(format_time(t), "2024-01-01 00:00");
    }

    #[test]
    fn test_collect_names_limit_and_hidden() {
        let dir = tempfile::tempdir().unwrap();
        for name in [".dot", "a", "b", "c"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let fs = fsops_platform::filesystem(fsops_core::FsConfig::default());
        let path = dir.path().to_str().unwrap();

        assert_eq!(collect_names(&fs, path, false, None).unwrap(), vec!["a", "b", "c"]);
        assert_eq!(collect_names(&fs, path, true, None).unwrap().len(), 4);
        assert_eq!(collect_names(&fs, path, true, Some(2)).unwrap().len(), 2);
    }
}
