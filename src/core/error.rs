//! Error types for the copy engine

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that stop a copy run.
///
/// Anything written before the error is left in place; there is no rollback.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("source path should not be a root path: {}", .0.display())]
    SourceIsRoot(PathBuf),

    #[error("target path should not be a root path: {}", .0.display())]
    TargetIsRoot(PathBuf),

    #[error("source path is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),

    #[error(
        "target {} is the source directory or lies inside it ({})",
        .target.display(),
        .source_root.display()
    )]
    TargetInsideSource {
        target: PathBuf,
        source_root: PathBuf,
    },

    #[error("project name is not valid UTF-8: {}", .0.display())]
    NonUtf8Name(PathBuf),

    #[error("file '{}' already exists. Remove it if you really mean it", .path.display())]
    DestinationExists { path: PathBuf },

    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),
}

impl CopyError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CopyError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Reasons a matched relative-path fragment could not be resolved.
///
/// Never surfaced past the resolver: callers get the line back unchanged.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("fragment bytes do not form a path on this platform")]
    UnrepresentableFragment,

    #[error("resolved path cannot be written back as bytes: {}", .0.display())]
    UnrepresentablePath(PathBuf),

    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] io::Error),
}

pub type CopyResult<T> = Result<T, CopyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_exists_message_names_path() {
        let err = CopyError::DestinationExists {
            path: PathBuf::from("/tmp/NewProj/NewProj.sln"),
        };
        assert!(err.to_string().contains("/tmp/NewProj/NewProj.sln"));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_io_helper_keeps_source() {
        let err = CopyError::io("/x", io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("/x"));
    }
}
