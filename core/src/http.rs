//! Request and response descriptors exchanged with the host.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The host
//! fills in an `HttpRequest`, hands it to `RequestExecutor::execute`, and
//! receives an `HttpResponse` back. Neither type carries behavior beyond
//! small constructors.
//!
//! Field names serialize in camelCase so the JSON matches the frontend's
//! models one-to-one. Maps are `BTreeMap` to keep serialized output stable.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An HTTP request described as plain data.
///
/// `headers` and `query` are maps, so keys are unique. `query` pairs are
/// appended to whatever query string `url` already carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub query: BTreeMap<String, String>,
}

impl HttpRequest {
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            method: method.to_string(),
            url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }
}

/// A cookie taken from a single `Set-Cookie` response header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    /// `None` when the header had no `Expires` attribute or it did not parse.
    pub expires: Option<DateTime<Utc>>,
    pub secure: bool,
    pub http_only: bool,
}

/// An HTTP response described as plain data.
///
/// `status_code == 0` means the request never produced an HTTP response
/// (bad URL, bad request, transport failure). `size` is always the byte
/// length of `body`, and `duration` is always in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub status: String,
    #[serde(default)]
    pub headers: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub cookies: Vec<HttpCookie>,
    pub body: String,
    pub size: u64,
    /// Elapsed milliseconds, measured from URL parsing to the final result.
    pub duration: u64,
}

impl HttpResponse {
    /// A response for a request that failed before or during the transport
    /// call. The error text becomes the body.
    pub(crate) fn failure(status: &str, body: String, started: Instant) -> Self {
        Self {
            status_code: 0,
            status: status.to_string(),
            size: body.len() as u64,
            body,
            duration: elapsed_millis(started),
            ..Self::default()
        }
    }

    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// All values for a header name, matched case-insensitively.
    pub fn header_values(&self, name: &str) -> &[String] {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }
}

pub(crate) fn elapsed_millis(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
