//! Path normalization utilities
//!
//! All normalization here is lexical: no symlinks are resolved and the
//! filesystem is never touched (except for reading the current directory).

use std::io;
use std::path::{Component, Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Lexically clean a path: drop `.` segments, fold `..` into its parent and
/// collapse duplicate separators. `..` above the root stays at the root.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Turn a path into a clean absolute path, resolving relative ones against
/// the current directory.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(clean_path(path));
    }
    Ok(clean_path(&std::env::current_dir()?.join(path)))
}

/// Final path segment as the project name, if there is one
pub fn project_name(path: &Path) -> Option<&std::ffi::OsStr> {
    path.file_name().filter(|name| !name.is_empty())
}

/// Check (lexically) whether `path` is `root` or lies beneath it
pub fn is_within_root(path: &Path, root: &Path) -> bool {
    clean_path(path).starts_with(clean_path(root))
}

/// Path spelled by raw bytes. Unix paths are arbitrary bytes; elsewhere the
/// bytes must be UTF-8.
#[cfg(unix)]
pub fn path_from_bytes(bytes: &[u8]) -> Option<PathBuf> {
    use std::os::unix::ffi::OsStrExt;
    Some(PathBuf::from(std::ffi::OsStr::from_bytes(bytes)))
}

#[cfg(not(unix))]
pub fn path_from_bytes(bytes: &[u8]) -> Option<PathBuf> {
    std::str::from_utf8(bytes).ok().map(PathBuf::from)
}

/// Raw bytes of a path, the inverse of [`path_from_bytes`]
#[cfg(unix)]
pub fn path_to_bytes(path: &Path) -> Option<&[u8]> {
    use std::os::unix::ffi::OsStrExt;
    Some(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
pub fn path_to_bytes(path: &Path) -> Option<&[u8]> {
    path.to_str().map(str::as_bytes)
}
