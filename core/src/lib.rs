//! Backend core for the Postier desktop HTTP client.
//!
//! # Overview
//! Executes user-built HTTP requests and manages collections of saved
//! requests on disk. The host (a desktop shell) talks to `App`, which holds
//! a `RequestExecutor` and an injected `DirectoryPicker`.
//!
//! # Design
//! - `RequestExecutor::execute` is blocking and infallible: failures become
//!   `HttpResponse` values with status code 0.
//! - Descriptors are plain serde data with camelCase JSON, so the host can
//!   pass them across any boundary unchanged.
//! - Filesystem operations are free functions returning `FsError`; only the
//!   tree builder tolerates (and logs) unreadable children.
//! - Durations are milliseconds everywhere.

pub mod app;
pub mod client;
pub mod config;
pub mod cookie;
pub mod error;
pub mod fs;
pub mod http;
pub mod saved;
pub mod tree;
pub mod types;

pub use app::{App, DirectoryPicker, NoDialog};
pub use client::RequestExecutor;
pub use config::ExecutorConfig;
pub use error::{AppError, FsError};
pub use http::{HttpCookie, HttpRequest, HttpResponse};
pub use types::{DirectoryTree, FileSystemEntry, SavedRequest};
