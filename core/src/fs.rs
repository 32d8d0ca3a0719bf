//! File CRUD for the collection browser.
//!
//! Thin wrappers over `std::fs` that attach the operation and path to every
//! error. Nothing is buffered or locked; concurrent writers race and the last
//! one wins.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{FsError, Result};

/// Create a directory and any missing parents.
pub fn create_directory(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), "create directory");
    fs::create_dir_all(path).map_err(FsError::io("create directory", path))
}

/// Write a new file, creating parent directories first.
pub fn create_file(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_directory(parent)?;
    }
    debug!(path = %path.display(), bytes = content.len(), "create file");
    fs::write(path, content).map_err(FsError::io("create file", path))
}

pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(FsError::io("read file", path))
}

/// Overwrite a file. The parent directory must already exist.
pub fn update_file(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), bytes = content.len(), "update file");
    fs::write(path, content).map_err(FsError::io("update file", path))
}

pub fn delete_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), "delete file");
    fs::remove_file(path).map_err(FsError::io("delete file", path))
}

/// Remove a directory and everything below it.
pub fn delete_directory(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), "delete directory");
    fs::remove_dir_all(path).map_err(FsError::io("delete directory", path))
}

/// Move a file or directory. Refuses to replace an existing entry.
pub fn rename_path(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    let (from, to) = (from.as_ref(), to.as_ref());
    if to.symlink_metadata().is_ok() {
        return Err(FsError::AlreadyExists(to.to_path_buf()));
    }
    debug!(from = %from.display(), to = %to.display(), "rename");
    fs::rename(from, to).map_err(FsError::io("rename", from))
}
