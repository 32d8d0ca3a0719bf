//! Blocking request executor.
//!
//! # Design
//! `RequestExecutor` owns one `ureq::Agent` and nothing else, so repeated
//! calls may reuse pooled connections but never share request state.
//! `execute` never fails: every local or transport error is folded into an
//! `HttpResponse` with status code 0 and a tagged status string, so the host
//! always receives something it can render.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info, warn};
use ureq::http::header::{SET_COOKIE, USER_AGENT};
use ureq::http::{HeaderMap, HeaderName, HeaderValue, Request, StatusCode};
use ureq::Agent;
use url::Url;

use crate::config::ExecutorConfig;
use crate::cookie::parse_set_cookie;
use crate::http::{elapsed_millis, HttpCookie, HttpRequest, HttpResponse};

pub const STATUS_INVALID_URL: &str = "Invalid URL";
pub const STATUS_REQUEST_CREATION_ERROR: &str = "Request Creation Error";
pub const STATUS_REQUEST_ERROR: &str = "Request Error";

/// Executes `HttpRequest` descriptors over the network.
#[derive(Clone)]
pub struct RequestExecutor {
    agent: Agent,
    config: ExecutorConfig,
}

impl Default for RequestExecutor {
    fn default() -> Self {
        Self::new(ExecutorConfig::default())
    }
}

impl RequestExecutor {
    pub fn new(config: ExecutorConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true)
            .timeout_global(Some(config.timeout()))
            .max_redirects(config.max_redirects)
            .build()
            .new_agent();
        Self { agent, config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Perform the request and describe the outcome.
    ///
    /// Blocks for at most the configured timeout. Status code 0 means no
    /// HTTP response was obtained; the body then holds the error text.
    pub fn execute(&self, req: &HttpRequest) -> HttpResponse {
        let started = Instant::now();
        debug!(method = %req.method, url = %req.url, "executing request");

        let mut url = match parse_url(&req.url) {
            Ok(url) => url,
            Err(e) => {
                warn!(url = %req.url, error = %e, "invalid url");
                return HttpResponse::failure(
                    STATUS_INVALID_URL,
                    format!("Error parsing URL: {e}"),
                    started,
                );
            }
        };
        merge_query(&mut url, &req.query);

        let request = match self.build_request(req, &url) {
            Ok(request) => request,
            Err(e) => {
                warn!(method = %req.method, error = %e, "could not build request");
                return HttpResponse::failure(
                    STATUS_REQUEST_CREATION_ERROR,
                    format!("Error creating request: {e}"),
                    started,
                );
            }
        };

        let result = if req.body.is_empty() {
            self.agent.run(request)
        } else {
            self.agent.run(request.map(|()| req.body.as_bytes()))
        };
        let mut response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "request failed");
                return HttpResponse::failure(
                    STATUS_REQUEST_ERROR,
                    format!("Error making request: {e}"),
                    started,
                );
            }
        };

        let status = response.status();
        let headers = collect_headers(response.headers());
        let cookies = collect_cookies(response.headers());
        let limit = self.config.max_body_bytes.unwrap_or(u64::MAX);

        let body = match response.body_mut().with_config().limit(limit).read_to_vec() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!(url = %url, status = status.as_u16(), error = %e, "reading body failed");
                let body = format!("Error reading response body: {e}");
                return HttpResponse {
                    status_code: status.as_u16(),
                    status: status_text(status),
                    headers,
                    cookies: Vec::new(),
                    size: body.len() as u64,
                    body,
                    duration: elapsed_millis(started),
                };
            }
        };

        let duration = elapsed_millis(started);
        info!(
            method = %req.method,
            url = %url,
            status = status.as_u16(),
            duration_ms = duration,
            "request completed"
        );

        HttpResponse {
            status_code: status.as_u16(),
            status: status_text(status),
            headers,
            cookies,
            size: body.len() as u64,
            body,
            duration,
        }
    }

    /// Build the transport request. An empty method means GET. Caller
    /// headers replace any value the transport would otherwise send for the
    /// same name.
    fn build_request(
        &self,
        req: &HttpRequest,
        url: &Url,
    ) -> Result<Request<()>, ureq::http::Error> {
        let method = match req.method.as_str() {
            "" => "GET",
            method => method,
        };
        let mut request = Request::builder()
            .method(method)
            .uri(url.as_str())
            .body(())?;

        let headers = request.headers_mut();
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.config.user_agent)?);
        for (key, value) in &req.headers {
            let name = HeaderName::from_bytes(key.as_bytes())?;
            headers.insert(name, HeaderValue::from_str(value)?);
        }
        Ok(request)
    }
}

fn parse_url(raw: &str) -> Result<Url, String> {
    if raw.chars().any(|c| c.is_ascii_control()) {
        return Err("invalid control character in URL".to_string());
    }
    Url::parse(raw).map_err(|e| e.to_string())
}

/// Append query pairs without touching pairs already on the URL.
fn merge_query(url: &mut Url, query: &BTreeMap<String, String>) {
    if query.is_empty() {
        return;
    }
    let mut pairs = url.query_pairs_mut();
    for (key, value) in query {
        pairs.append_pair(key, value);
    }
}

fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

fn collect_headers(map: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in map {
        headers
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    headers
}

fn collect_cookies(map: &HeaderMap) -> Vec<HttpCookie> {
    map.get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| {
            let cookie = parse_set_cookie(&String::from_utf8_lossy(value.as_bytes()));
            if cookie.is_none() {
                debug!(?value, "ignoring malformed set-cookie header");
            }
            cookie
        })
        .collect()
}
