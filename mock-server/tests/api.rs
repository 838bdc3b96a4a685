use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder().method(method).uri(uri).body(String::new()).unwrap()
}

fn content_type(response: &axum::response::Response) -> &str {
    response.headers()[http::header::CONTENT_TYPE].to_str().unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reports_method_headers_and_body() {
    let resp = app()
        .oneshot(json_request("PUT", "/echo", r#"{"a":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.headers["content-type"], "application/json");
    assert_eq!(echo.body, r#"{"a":1}"#);
}

#[tokio::test]
async fn echo_accepts_delete_with_body() {
    let resp = app()
        .oneshot(json_request("DELETE", "/echo", r#"{"reason":"dup"}"#))
        .await
        .unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "DELETE");
    assert_eq!(echo.body, r#"{"reason":"dup"}"#);
}

// --- files ---

#[tokio::test]
async fn file_is_octet_stream() {
    let resp = app().oneshot(empty_request("GET", "/files/ab")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), "application/octet-stream");
    assert_eq!(body_bytes(resp).await.as_ref(), b"abab");
}

#[tokio::test]
async fn missing_file_is_json_404() {
    let resp = app().oneshot(empty_request("GET", "/files/missing")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["code"], 404);
    assert_eq!(body["message"], "file not found");
}

// --- status / malformed / upload ---

#[tokio::test]
async fn status_route_answers_with_requested_code() {
    let resp = app().oneshot(empty_request("GET", "/status/418")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["code"], 418);
    assert_eq!(body["message"], "status 418");
}

#[tokio::test]
async fn malformed_claims_json_but_is_not() {
    let resp = app().oneshot(empty_request("GET", "/malformed")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), "application/json");
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<serde_json::Value>(&bytes).is_err());
}

#[tokio::test]
async fn upload_reports_content_type_and_length() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header(http::header::CONTENT_TYPE, "multipart/form-data; boundary=b")
                .body("0123456789".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["content_type"], "multipart/form-data; boundary=b");
    assert_eq!(body["len"], 10);
}

// --- one service, several calls ---

#[tokio::test]
async fn echo_serves_each_verb_in_turn() {
    use tower::Service;

    let mut app = app().into_service();

    for method in ["GET", "POST", "PUT", "PATCH", "DELETE"] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request(method, "/echo", "{}"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{method}");
        let echo: Echo = body_json(resp).await;
        assert_eq!(echo.method, method);
        assert_eq!(echo.body, "{}");
    }
}

#[tokio::test]
async fn unknown_status_code_is_rejected() {
    let resp = app().oneshot(empty_request("GET", "/status/1000")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "invalid status code");
}
