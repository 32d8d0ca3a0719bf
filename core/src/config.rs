use std::time::Duration;

use serde::Deserialize;

/// Overall time budget for one request, connect through last body byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Redirects followed before the transport gives up.
pub const MAX_REDIRECTS: u32 = 10;

/// File extension of saved request documents.
pub const REQUEST_FILE_EXTENSION: &str = ".postier";

/// Title shown on the native folder picker.
pub const FOLDER_DIALOG_TITLE: &str = "Select Collection Folder";

/// Settings for `RequestExecutor`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Global timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of response body bytes read. `None` reads everything.
    pub max_body_bytes: Option<u64>,
    pub max_redirects: u32,
    /// Sent unless the request sets its own `User-Agent`.
    pub user_agent: String,
}

impl ExecutorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: REQUEST_TIMEOUT.as_secs(),
            max_body_bytes: None,
            max_redirects: MAX_REDIRECTS,
            user_agent: concat!("postier/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
