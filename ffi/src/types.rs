//! Handle, host callback and result envelope for the FFI boundary.
//!
//! # Design
//! Descriptors cross the boundary as JSON text rather than `#[repr(C)]`
//! structs: the host is a webview shell that already speaks the frontend's
//! JSON models, and the maps and nested trees in the Postier types have no
//! natural C layout. Every call answers with one envelope string,
//! `{"ok": value}` or `{"error": "message"}`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::PathBuf;

use postier_core::{App, DirectoryPicker};
use serde::Serialize;

/// Native folder dialog provided by the host.
///
/// Receives the dialog title and returns the selected path, or null when the
/// user cancels. The returned string stays owned by the host; it only has to
/// remain valid until the callback's caller has copied it.
pub type FfiPickerFn = extern "C" fn(title: *const c_char) -> *const c_char;

/// Adapts the host's C callback to `DirectoryPicker`.
pub struct HostPicker {
    callback: Option<FfiPickerFn>,
}

impl HostPicker {
    pub(crate) fn new(callback: Option<FfiPickerFn>) -> Self {
        Self { callback }
    }
}

impl DirectoryPicker for HostPicker {
    fn select_directory(&self, title: &str) -> Option<PathBuf> {
        let callback = self.callback?;
        let title = CString::new(title).ok()?;
        let selected = callback(title.as_ptr());
        if selected.is_null() {
            return None;
        }
        let path = unsafe { CStr::from_ptr(selected) }.to_string_lossy().into_owned();
        Some(PathBuf::from(path))
    }
}

/// Opaque handle to an `App`. C callers receive a pointer to this and pass
/// it back into every FFI function.
pub struct FfiApp {
    pub(crate) inner: App<HostPicker>,
}

/// Result of every JSON-returning call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope<T> {
    Ok(T),
    Error(String),
}

impl<T: Serialize> Envelope<T> {
    /// Serialize into a heap C string owned by the caller.
    ///
    /// Returns null only if allocation of the C string fails, which cannot
    /// happen for JSON text since it never contains a NUL byte.
    pub(crate) fn into_raw(self) -> *mut c_char {
        let json = match serde_json::to_string(&self) {
            Ok(json) => json,
            Err(e) => {
                let message = format!("failed to serialize result: {e}");
                serde_json::json!({ "error": message }).to_string()
            }
        };
        CString::new(json)
            .map(CString::into_raw)
            .unwrap_or(std::ptr::null_mut())
    }
}

/// Borrow a C string argument as UTF-8.
pub(crate) fn str_arg<'a>(ptr: *const c_char, name: &str) -> Result<&'a str, String> {
    if ptr.is_null() {
        return Err(format!("null argument: {name}"));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| format!("argument {name} is not valid UTF-8"))
}

/// Response to `postier_save_request`: where the file went and the stamped
/// document.
#[derive(Debug, Serialize)]
pub struct SavedFile {
    pub path: String,
    pub request: postier_core::SavedRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_wraps_value() {
        let raw = Envelope::Ok(vec![1, 2]).into_raw();
        let json = unsafe { CString::from_raw(raw) }.into_string().unwrap();
        assert_eq!(json, r#"{"ok":[1,2]}"#);
    }

    #[test]
    fn error_envelope_carries_message() {
        let raw = Envelope::<()>::Error("boom".to_string()).into_raw();
        let json = unsafe { CString::from_raw(raw) }.into_string().unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);
    }

    #[test]
    fn unit_ok_is_null() {
        let raw = Envelope::Ok(()).into_raw();
        let json = unsafe { CString::from_raw(raw) }.into_string().unwrap();
        assert_eq!(json, r#"{"ok":null}"#);
    }

    #[test]
    fn str_arg_rejects_null_and_bad_utf8() {
        assert_eq!(
            str_arg(std::ptr::null(), "path").unwrap_err(),
            "null argument: path"
        );
        let bad = [0xffu8, 0xfe, 0];
        assert!(str_arg(bad.as_ptr() as *const c_char, "path").is_err());
        let good = CString::new("ok").unwrap();
        assert_eq!(str_arg(good.as_ptr(), "path").unwrap(), "ok");
    }

    #[test]
    fn picker_without_callback_cancels() {
        assert!(HostPicker::new(None).select_directory("t").is_none());
    }
}
