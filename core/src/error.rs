//! Error types for filesystem and application operations.
//!
//! # Design
//! The request executor has no error type: its failures are data inside
//! `HttpResponse`. Everything that touches the disk returns `FsError`, which
//! keeps the path and the operation so the host can show a useful message.
//! `AppError` adds the failures that only exist at the facade level.

use std::io;
use std::path::PathBuf;

pub type Result<T, E = FsError> = std::result::Result<T, E>;

/// Errors returned by file CRUD, tree building and request persistence.
#[derive(thiserror::Error, Debug)]
pub enum FsError {
    /// The underlying OS call failed.
    #[error("failed to {op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A saved request file exists but is not a valid document.
    #[error("failed to parse postier file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize request: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A rename would overwrite an existing entry.
    #[error("a file or folder already exists at {}", .0.display())]
    AlreadyExists(PathBuf),
}

impl FsError {
    pub(crate) fn io(
        op: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| FsError::Io { op, path, source }
    }

    /// The OS error kind, if this came from an I/O call.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            FsError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Errors returned by `App` methods.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Fs(#[from] FsError),

    /// The folder picker was dismissed without a selection.
    #[error("no folder selected")]
    NoFolderSelected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_message_names_operation_and_path() {
        let source = io::Error::from(io::ErrorKind::NotFound);
        let err = FsError::io("read file", "/tmp/x.postier")(source);
        let msg = err.to_string();
        assert!(msg.starts_with("failed to read file /tmp/x.postier:"), "{msg}");
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn app_error_is_transparent_over_fs_error() {
        let fs = FsError::AlreadyExists(PathBuf::from("/a/b"));
        let app: AppError = fs.into();
        assert_eq!(app.to_string(), "a file or folder already exists at /a/b");
        assert_eq!(AppError::NoFolderSelected.to_string(), "no folder selected");
    }
}
