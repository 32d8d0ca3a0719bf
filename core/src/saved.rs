//! `.postier` file persistence.
//!
//! Saved requests are pretty-printed JSON with a fixed extension. Saving
//! stamps the document; loading returns it exactly as stored.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};

use crate::config::REQUEST_FILE_EXTENSION;
use crate::error::{FsError, Result};
use crate::fs::{create_file, read_file};
use crate::tree::entry_for;
use crate::types::{FileSystemEntry, SavedRequest};

/// Save `request` to `path`, appending `.postier` when missing.
///
/// Sets `updated_at` to now and `created_at` to the same instant if it was
/// unset. Returns the path actually written.
pub fn save_request(path: impl AsRef<Path>, request: &mut SavedRequest) -> Result<PathBuf> {
    let now = Utc::now();
    request.updated_at = Some(now);
    if request.created_at.is_none() {
        request.created_at = Some(now);
    }

    let content = serde_json::to_string_pretty(request)?;
    let path = with_extension(path.as_ref());
    create_file(&path, &content)?;
    info!(path = %path.display(), name = %request.name, "saved request");
    Ok(path)
}

pub fn load_request(path: impl AsRef<Path>) -> Result<SavedRequest> {
    let path = path.as_ref();
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|source| FsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// All `.postier` files directly inside `dir`, sorted by file name.
pub fn list_request_files(dir: impl AsRef<Path>) -> Result<Vec<FileSystemEntry>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(FsError::io("read directory", dir))?;

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !is_request_file(&path) {
            continue;
        }
        match entry.metadata() {
            Ok(metadata) if !metadata.is_dir() => files.push(entry_for(&path, &metadata)),
            Ok(_) => {}
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable request file"),
        }
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

pub fn is_request_file(path: &Path) -> bool {
    path.to_string_lossy().ends_with(REQUEST_FILE_EXTENSION)
}

fn with_extension(path: &Path) -> PathBuf {
    if is_request_file(path) {
        return path.to_path_buf();
    }
    let mut raw = path.as_os_str().to_owned();
    raw.push(REQUEST_FILE_EXTENSION);
    PathBuf::from(raw)
}
