//! C-ABI wrapper around `postier-core` for the desktop shell.
//!
//! # Overview
//! Exposes every `App` operation through `extern "C"` functions so the
//! webview host can execute requests and manage collections without linking
//! to Rust directly. Arguments and results are UTF-8 C strings; structured
//! values travel as JSON in the frontend's camelCase models.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - One function per `App` method, mirroring the core API 1:1.
//! - Results come back as an `Envelope` JSON string (`{"ok": ...}` or
//!   `{"error": "..."}`) that the caller frees with `postier_string_free`.
//! - The native folder dialog is passed in as a callback at construction,
//!   so the handle carries every host dependency explicitly.

pub mod types;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use postier_core::{App, HttpRequest, RequestExecutor, SavedRequest};
use serde::Serialize;
use tracing::error;
use tracing_subscriber::EnvFilter;

use types::*;

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Install a `tracing` subscriber that honors `RUST_LOG`. Calling it more
/// than once is harmless.
#[unsafe(no_mangle)]
pub extern "C" fn postier_init_logging() {
    let _ = catch_unwind(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .try_init();
    });
}

/// Create an app handle. `picker` may be null, in which case the folder
/// dialog always reports "no folder selected".
///
/// Returns null if an internal panic occurs.
/// The caller must free the returned pointer with `postier_app_free`.
#[unsafe(no_mangle)]
pub extern "C" fn postier_app_new(picker: Option<FfiPickerFn>) -> *mut FfiApp {
    catch_unwind(|| {
        let app = App::new(RequestExecutor::default(), HostPicker::new(picker));
        Box::into_raw(Box::new(FfiApp { inner: app }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free an app created by `postier_app_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn postier_app_free(app: *mut FfiApp) {
    if !app.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(app) });
        }));
    }
}

/// Run `f` against the app and wrap its outcome in an envelope.
fn call<T, F>(app: *const FfiApp, op: &str, f: F) -> *mut c_char
where
    T: Serialize,
    F: FnOnce(&FfiApp) -> Result<T, String>,
{
    catch_unwind(AssertUnwindSafe(|| {
        if app.is_null() {
            return Envelope::<T>::Error("null argument: app".to_string()).into_raw();
        }
        let app = unsafe { &*app };
        match f(app) {
            Ok(value) => Envelope::Ok(value).into_raw(),
            Err(message) => Envelope::<T>::Error(message).into_raw(),
        }
    }))
    .unwrap_or_else(|_| {
        error!(op, "panic in ffi call");
        Envelope::<()>::Error(format!("panic in {op}")).into_raw()
    })
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Execute a request described by `request_json` (an `HttpRequest`).
///
/// Answers `{"ok": HttpResponse}` for every request that parses, including
/// network failures (status code 0). Blocks for up to 30 seconds.
#[unsafe(no_mangle)]
pub extern "C" fn postier_make_request(
    app: *const FfiApp,
    request_json: *const c_char,
) -> *mut c_char {
    call(app, "postier_make_request", |app| {
        let raw = str_arg(request_json, "request_json")?;
        let req: HttpRequest =
            serde_json::from_str(raw).map_err(|e| format!("invalid request: {e}"))?;
        Ok(app.inner.make_request(&req))
    })
}

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

/// Build the collection tree rooted at `path`. Answers a `DirectoryTree`.
#[unsafe(no_mangle)]
pub extern "C" fn postier_get_directory_tree(
    app: *const FfiApp,
    path: *const c_char,
) -> *mut c_char {
    call(app, "postier_get_directory_tree", |app| {
        let path = str_arg(path, "path")?;
        app.inner.directory_tree(path).map_err(|e| e.to_string())
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn postier_create_directory(
    app: *const FfiApp,
    path: *const c_char,
) -> *mut c_char {
    call(app, "postier_create_directory", |app| {
        let path = str_arg(path, "path")?;
        app.inner.create_directory(path).map_err(|e| e.to_string())
    })
}

/// Write a new file, creating parent directories.
#[unsafe(no_mangle)]
pub extern "C" fn postier_create_file(
    app: *const FfiApp,
    path: *const c_char,
    content: *const c_char,
) -> *mut c_char {
    call(app, "postier_create_file", |app| {
        let path = str_arg(path, "path")?;
        let content = str_arg(content, "content")?;
        app.inner.create_file(path, content).map_err(|e| e.to_string())
    })
}

/// Answers the file's content as a JSON string.
#[unsafe(no_mangle)]
pub extern "C" fn postier_read_file(app: *const FfiApp, path: *const c_char) -> *mut c_char {
    call(app, "postier_read_file", |app| {
        let path = str_arg(path, "path")?;
        app.inner.read_file(path).map_err(|e| e.to_string())
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn postier_update_file(
    app: *const FfiApp,
    path: *const c_char,
    content: *const c_char,
) -> *mut c_char {
    call(app, "postier_update_file", |app| {
        let path = str_arg(path, "path")?;
        let content = str_arg(content, "content")?;
        app.inner.update_file(path, content).map_err(|e| e.to_string())
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn postier_delete_file(app: *const FfiApp, path: *const c_char) -> *mut c_char {
    call(app, "postier_delete_file", |app| {
        let path = str_arg(path, "path")?;
        app.inner.delete_file(path).map_err(|e| e.to_string())
    })
}

/// Remove a directory and everything below it.
#[unsafe(no_mangle)]
pub extern "C" fn postier_delete_directory(
    app: *const FfiApp,
    path: *const c_char,
) -> *mut c_char {
    call(app, "postier_delete_directory", |app| {
        let path = str_arg(path, "path")?;
        app.inner.delete_directory(path).map_err(|e| e.to_string())
    })
}

/// Move a file or directory; fails if `to` already exists.
#[unsafe(no_mangle)]
pub extern "C" fn postier_rename_path(
    app: *const FfiApp,
    from: *const c_char,
    to: *const c_char,
) -> *mut c_char {
    call(app, "postier_rename_path", |app| {
        let from = str_arg(from, "from")?;
        let to = str_arg(to, "to")?;
        app.inner.rename_path(from, to).map_err(|e| e.to_string())
    })
}

// ---------------------------------------------------------------------------
// Saved requests
// ---------------------------------------------------------------------------

/// Save a `SavedRequest` (as JSON) to `path`, adding `.postier` if missing.
///
/// Answers `{"ok": {"path": ..., "request": ...}}` with the timestamps the
/// save assigned.
#[unsafe(no_mangle)]
pub extern "C" fn postier_save_request(
    app: *const FfiApp,
    path: *const c_char,
    request_json: *const c_char,
) -> *mut c_char {
    call(app, "postier_save_request", |app| {
        let path = str_arg(path, "path")?;
        let raw = str_arg(request_json, "request_json")?;
        let mut request: SavedRequest =
            serde_json::from_str(raw).map_err(|e| format!("invalid saved request: {e}"))?;
        let written = app
            .inner
            .save_request(path, &mut request)
            .map_err(|e| e.to_string())?;
        Ok(SavedFile {
            path: written.to_string_lossy().into_owned(),
            request,
        })
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn postier_load_request(app: *const FfiApp, path: *const c_char) -> *mut c_char {
    call(app, "postier_load_request", |app| {
        let path = str_arg(path, "path")?;
        app.inner.load_request(path).map_err(|e| e.to_string())
    })
}

/// List `.postier` files directly inside `dir`, sorted by name.
#[unsafe(no_mangle)]
pub extern "C" fn postier_list_request_files(
    app: *const FfiApp,
    dir: *const c_char,
) -> *mut c_char {
    call(app, "postier_list_request_files", |app| {
        let dir = str_arg(dir, "dir")?;
        app.inner.list_request_files(dir).map_err(|e| e.to_string())
    })
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

/// Show the host's folder picker. Answers the selected path, or
/// `{"error": "no folder selected"}` on cancel.
#[unsafe(no_mangle)]
pub extern "C" fn postier_open_folder_dialog(app: *const FfiApp) -> *mut c_char {
    call(app, "postier_open_folder_dialog", |app| {
        app.inner
            .open_folder_dialog()
            .map(|path| path.to_string_lossy().into_owned())
            .map_err(|e| e.to_string())
    })
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a string returned by any `postier_*` function. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn postier_string_free(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}
