//! Collection tree builder.
//!
//! # Design
//! The root must be readable or the whole call fails. Below the root, a
//! child that cannot be stat-ed or listed is logged and left out so one bad
//! entry never hides the rest of the collection. Symbolic links below the
//! root are shown with their target's metadata but never descended into.

use std::cmp::Ordering;
use std::fs::{self, Metadata};
use std::path::Path;
use std::time::UNIX_EPOCH;

use tracing::warn;

use crate::error::{FsError, Result};
use crate::types::{DirectoryTree, FileSystemEntry};

/// Build the tree rooted at `root`.
pub fn directory_tree(root: impl AsRef<Path>) -> Result<DirectoryTree> {
    build(root.as_ref(), true)
}

fn build(path: &Path, is_root: bool) -> Result<DirectoryTree> {
    let metadata = fs::metadata(path).map_err(FsError::io("access path", path))?;
    let is_link = !is_root
        && path
            .symlink_metadata()
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);

    let mut tree = DirectoryTree {
        entry: entry_for(path, &metadata),
        children: Vec::new(),
    };
    if !metadata.is_dir() || is_link {
        return Ok(tree);
    }

    let entries = fs::read_dir(path).map_err(FsError::io("read directory", path))?;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %path.display(), error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        match build(&entry.path(), false) {
            Ok(child) => tree.children.push(child),
            Err(e) => warn!(error = %e, "skipping unreadable entry"),
        }
    }
    tree.children.sort_by(tree_order);
    Ok(tree)
}

/// Directories first, then by name.
fn tree_order(a: &DirectoryTree, b: &DirectoryTree) -> Ordering {
    b.entry
        .is_dir
        .cmp(&a.entry.is_dir)
        .then_with(|| a.entry.name.cmp(&b.entry.name))
}

pub(crate) fn entry_for(path: &Path, metadata: &Metadata) -> FileSystemEntry {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    FileSystemEntry {
        name,
        path: path.to_string_lossy().into_owned(),
        is_dir: metadata.is_dir(),
        size: metadata.len(),
        modified: unix_seconds(metadata),
    }
}

fn unix_seconds(metadata: &Metadata) -> i64 {
    let Ok(modified) = metadata.modified() else {
        return 0;
    };
    match modified.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}
