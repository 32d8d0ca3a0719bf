use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    extract::{Path, RawQuery},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What the server saw, returned by `/echo`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: String,
}

/// Cookies set by `/cookies`, in header order.
pub const COOKIES: [&str; 3] = [
    "session=abc123; Path=/; HttpOnly",
    "theme=dark; Domain=localhost; Path=/app; Expires=Wed, 21 Oct 2015 07:28:00 GMT",
    "secure_id=42; Secure",
];

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/cookies", get(cookies))
        .route("/status/{code}", any(status))
        .route("/delay/{ms}", get(delay))
        .route("/bytes/{n}", get(bytes))
        .route("/redirect", get(redirect))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(
    method: Method,
    uri: Uri,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> Json<Echo> {
    let mut seen: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in &headers {
        seen.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    Json(Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        headers: seen,
        body,
    })
}

async fn cookies() -> Response {
    let mut response = "cookies set".into_response();
    for cookie in COOKIES {
        response
            .headers_mut()
            .append(header::SET_COOKIE, header::HeaderValue::from_static(cookie));
    }
    response
}

async fn status(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, format!("status {}", status.as_u16())).into_response()
}

async fn delay(Path(ms): Path<u64>) -> &'static str {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    "done"
}

async fn bytes(Path(n): Path<usize>) -> String {
    "a".repeat(n)
}

async fn redirect() -> Redirect {
    Redirect::to("/echo")
}
