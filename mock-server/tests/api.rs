use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, COOKIES};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reports_method_query_and_body() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/echo?a=1&a=2")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(r#"{"k":"v"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.path, "/echo");
    assert_eq!(echo.query.as_deref(), Some("a=1&a=2"));
    assert_eq!(echo.headers["content-type"], vec!["application/json".to_string()]);
    assert_eq!(echo.body, r#"{"k":"v"}"#);
}

#[tokio::test]
async fn echo_without_query() {
    let resp = app().oneshot(get("/echo")).await.unwrap();
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert!(echo.query.is_none());
    assert!(echo.body.is_empty());
}

#[tokio::test]
async fn echo_keeps_repeated_headers() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/echo")
                .header("x-multi", "one")
                .header("x-multi", "two")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.headers["x-multi"], vec!["one".to_string(), "two".to_string()]);
}

// --- cookies ---

#[tokio::test]
async fn cookies_sets_every_fixture_in_order() {
    let resp = app().oneshot(get("/cookies")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let set: Vec<&str> = resp
        .headers()
        .get_all(http::header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(set, COOKIES.to_vec());
}

// --- status ---

#[tokio::test]
async fn status_returns_requested_code() {
    let resp = app().oneshot(get("/status/418")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(&body_bytes(resp).await[..], b"status 418");
}

#[tokio::test]
async fn status_rejects_out_of_range_code() {
    let resp = app().oneshot(get("/status/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_non_numeric_returns_400() {
    let resp = app().oneshot(get("/status/abc")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- bytes / delay / redirect ---

#[tokio::test]
async fn bytes_returns_exact_length() {
    let resp = app().oneshot(get("/bytes/1024")).await.unwrap();
    assert_eq!(body_bytes(resp).await.len(), 1024);
}

#[tokio::test]
async fn delay_eventually_answers() {
    let resp = app().oneshot(get("/delay/10")).await.unwrap();
    assert_eq!(&body_bytes(resp).await[..], b"done");
}

#[tokio::test]
async fn redirect_points_at_echo() {
    let resp = app().oneshot(get("/redirect")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[http::header::LOCATION], "/echo");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app().oneshot(get("/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
