use std::time::Duration;

use axum::http;
use reqwest::header::AUTHORIZATION;
use serde_json::json;

use super::{ClientError, HttpDartClient, ListQuery};

// Initialize crypto provider once for all tests
fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

fn client() -> HttpDartClient {
    init_crypto();
    HttpDartClient::new("https://dart.test/api/v0/public", "tok123", Duration::from_secs(5))
        .unwrap()
}

fn response(status: u16, body: &'static str) -> reqwest::Response {
    http::Response::builder()
        .status(status)
        .body(body)
        .unwrap()
        .into()
}

#[test]
fn test_trailing_slash_trimmed() {
    init_crypto();
    let client =
        HttpDartClient::new("https://dart.test/api/", "t", Duration::from_secs(1)).unwrap();
    assert_eq!(client.base_url(), "https://dart.test/api");
}

#[test]
fn test_requests_carry_bearer_token() {
    let request = client().get("/config").build().unwrap();
    assert_eq!(
        request.headers().get(AUTHORIZATION).unwrap(),
        "Bearer tok123"
    );
    assert_eq!(
        request.url().as_str(),
        "https://dart.test/api/v0/public/config"
    );
}

#[test]
fn test_verbs_and_paths() {
    let client = client();
    let put = client.put("/tasks/abcdefABCDEF").build().unwrap();
    assert_eq!(put.method(), reqwest::Method::PUT);
    assert_eq!(put.url().path(), "/api/v0/public/tasks/abcdefABCDEF");

    let delete = client.delete("/docs/abcdefABCDEF").build().unwrap();
    assert_eq!(delete.method(), reqwest::Method::DELETE);

    let post = client.post("/comments").build().unwrap();
    assert_eq!(post.method(), reqwest::Method::POST);
}

#[test]
fn test_list_query_repeats_array_keys() {
    let args = json!({"tag": ["a", "b"], "limit": 10})
        .as_object()
        .unwrap()
        .clone();
    let query = ListQuery::from_args(&args);
    let request = client()
        .get("/tasks/list")
        .query(query.pairs())
        .build()
        .unwrap();
    assert_eq!(request.url().query(), Some("tag=a&tag=b&limit=10"));
}

#[tokio::test]
async fn test_handle_response_success_passes_json_through() {
    let value = HttpDartClient::handle_response(response(200, r#"{"b":1,"a":[true]}"#))
        .await
        .unwrap();
    assert_eq!(value, json!({"b": 1, "a": [true]}));
    assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"b":1,"a":[true]}"#);
}

#[tokio::test]
async fn test_handle_response_empty_body_is_null() {
    let value = HttpDartClient::handle_response(response(204, ""))
        .await
        .unwrap();
    assert!(value.is_null());
}

#[tokio::test]
async fn test_handle_response_error_keeps_status_and_body() {
    let err = HttpDartClient::handle_response(response(404, r#"{"detail":"Not found."}"#))
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, r#"{"detail":"Not found."}"#);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_handle_response_garbage_is_decode_error() {
    let err = HttpDartClient::handle_response(response(200, "<html>"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}
