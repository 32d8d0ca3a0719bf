//! Host-facing facade.
//!
//! # Design
//! `App` bundles everything the desktop shell calls into one object. The
//! native folder dialog is not reachable from here directly: the host
//! injects it as a `DirectoryPicker`, so the rest of the core stays usable
//! (and testable) without a windowing system.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::client::RequestExecutor;
use crate::config::FOLDER_DIALOG_TITLE;
use crate::error::AppError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{DirectoryTree, FileSystemEntry, SavedRequest};
use crate::{fs, saved, tree};

/// Native folder selection, supplied by the host.
pub trait DirectoryPicker {
    /// Show a folder dialog. `None` means the user cancelled.
    fn select_directory(&self, title: &str) -> Option<PathBuf>;
}

impl<F> DirectoryPicker for F
where
    F: Fn(&str) -> Option<PathBuf>,
{
    fn select_directory(&self, title: &str) -> Option<PathBuf> {
        self(title)
    }
}

/// A picker that always cancels, for headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDialog;

impl DirectoryPicker for NoDialog {
    fn select_directory(&self, _title: &str) -> Option<PathBuf> {
        None
    }
}

pub struct App<P = NoDialog> {
    executor: RequestExecutor,
    picker: P,
}

impl App<NoDialog> {
    pub fn headless() -> Self {
        Self::new(RequestExecutor::default(), NoDialog)
    }
}

impl<P: DirectoryPicker> App<P> {
    pub fn new(executor: RequestExecutor, picker: P) -> Self {
        Self { executor, picker }
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    pub fn make_request(&self, req: &HttpRequest) -> HttpResponse {
        self.executor.execute(req)
    }

    pub fn directory_tree(&self, root: impl AsRef<Path>) -> Result<DirectoryTree, AppError> {
        Ok(tree::directory_tree(root)?)
    }

    pub fn create_directory(&self, path: impl AsRef<Path>) -> Result<(), AppError> {
        Ok(fs::create_directory(path)?)
    }

    pub fn create_file(&self, path: impl AsRef<Path>, content: &str) -> Result<(), AppError> {
        Ok(fs::create_file(path, content)?)
    }

    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String, AppError> {
        Ok(fs::read_file(path)?)
    }

    pub fn update_file(&self, path: impl AsRef<Path>, content: &str) -> Result<(), AppError> {
        Ok(fs::update_file(path, content)?)
    }

    pub fn delete_file(&self, path: impl AsRef<Path>) -> Result<(), AppError> {
        Ok(fs::delete_file(path)?)
    }

    pub fn delete_directory(&self, path: impl AsRef<Path>) -> Result<(), AppError> {
        Ok(fs::delete_directory(path)?)
    }

    pub fn rename_path(
        &self,
        from: impl AsRef<Path>,
        to: impl AsRef<Path>,
    ) -> Result<(), AppError> {
        Ok(fs::rename_path(from, to)?)
    }

    pub fn save_request(
        &self,
        path: impl AsRef<Path>,
        request: &mut SavedRequest,
    ) -> Result<PathBuf, AppError> {
        Ok(saved::save_request(path, request)?)
    }

    pub fn load_request(&self, path: impl AsRef<Path>) -> Result<SavedRequest, AppError> {
        Ok(saved::load_request(path)?)
    }

    pub fn list_request_files(
        &self,
        dir: impl AsRef<Path>,
    ) -> Result<Vec<FileSystemEntry>, AppError> {
        Ok(saved::list_request_files(dir)?)
    }

    /// Ask the host for a collection folder.
    pub fn open_folder_dialog(&self) -> Result<PathBuf, AppError> {
        match self.picker.select_directory(FOLDER_DIALOG_TITLE) {
            Some(path) if !path.as_os_str().is_empty() => {
                info!(path = %path.display(), "collection folder selected");
                Ok(path)
            }
            _ => Err(AppError::NoFolderSelected),
        }
    }
}
