//! Integration tests for the HTTP routes.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::AUTHORIZATION},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use crate::api::{ROOT_MESSAGE, app};
use crate::client::MockDartApi;
use crate::config::Config;

const TOKEN: &str = "dsa_test_token";

/// Create a test app around a mocked backend
fn test_app(api: MockDartApi) -> Router {
    app(&Config::new(TOKEN), api, CancellationToken::new())
}

/// Helper to parse JSON response body
async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn rpc_request(token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/rpc")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

// =============================================================================
// System routes
// =============================================================================

#[tokio::test]
async fn root_returns_banner() {
    let response = test_app(MockDartApi::new())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], ROOT_MESSAGE.as_bytes());
}

#[tokio::test]
async fn health_is_open() {
    let response = test_app(MockDartApi::new())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn docs_are_served() {
    let response = test_app(MockDartApi::new())
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn rpc_without_authorization_is_rejected() {
    let response = test_app(MockDartApi::new())
        .oneshot(rpc_request(None, json!({"id": 1, "method": "listTools"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Missing or invalid Authorization header"})
    );
}

#[tokio::test]
async fn rpc_with_non_bearer_scheme_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/rpc")
        .header("content-type", "application/json")
        .header(AUTHORIZATION, format!("Basic {TOKEN}"))
        .body(Body::from(r#"{"id":1,"method":"listTools"}"#))
        .unwrap();

    let response = test_app(MockDartApi::new()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Missing or invalid Authorization header"})
    );
}

#[tokio::test]
async fn rpc_with_wrong_token_is_rejected() {
    // No expectations on the mock: the dispatcher must never be reached
    let response = test_app(MockDartApi::new())
        .oneshot(rpc_request(
            Some("not-the-token"),
            json!({"id": 1, "method": "callTool", "params": {"name": "get_config"}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await, json!({"error": "Invalid token"}));
}

#[tokio::test]
async fn rpc_with_padded_token_is_rejected() {
    for header in [
        format!("Bearer   {TOKEN}   "),
        format!("Bearer  {TOKEN}"),
        format!("Bearer {TOKEN} "),
    ] {
        let request = Request::builder()
            .method("POST")
            .uri("/rpc")
            .header("content-type", "application/json")
            .header(AUTHORIZATION, header.as_str())
            .body(Body::from(r#"{"id":1,"method":"listTools"}"#))
            .unwrap();

        let response = test_app(MockDartApi::new()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{header:?}");
        assert_eq!(json_body(response).await, json!({"error": "Invalid token"}));
    }
}

#[tokio::test]
async fn rpc_with_token_prefix_is_rejected() {
    let response = test_app(MockDartApi::new())
        .oneshot(rpc_request(
            Some(&TOKEN[..TOKEN.len() - 1]),
            json!({"id": 1, "method": "listTools"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn mcp_requires_authorization() {
    let response = test_app(MockDartApi::new())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// POST /rpc
// =============================================================================

#[tokio::test]
async fn rpc_list_tools() {
    let response = test_app(MockDartApi::new())
        .oneshot(rpc_request(
            Some(TOKEN),
            json!({"jsonrpc": "2.0", "id": 1, "method": "listTools"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 1);
    assert_eq!(body["result"]["tools"].as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn rpc_call_tool_returns_text_content() {
    let mut api = MockDartApi::new();
    api.expect_create_doc()
        .times(1)
        .returning(|_| Ok(json!({"item": {"id": "abcdefABCDEF", "title": "Notes"}})));

    let response = test_app(api)
        .oneshot(rpc_request(
            Some(TOKEN),
            json!({
                "id": "req-9",
                "method": "callTool",
                "params": {"name": "create_doc", "arguments": {"title": "Notes"}}
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], "req-9");
    assert_eq!(body["result"]["content"][0]["type"], "text");
    let text = body["result"]["content"][0]["text"].as_str().unwrap();
    let payload: Value = serde_json::from_str(text).unwrap();
    assert_eq!(payload["item"]["title"], "Notes");
}

#[tokio::test]
async fn rpc_errors_are_reported_with_status_200() {
    let response = test_app(MockDartApi::new())
        .oneshot(rpc_request(
            Some(TOKEN),
            json!({"id": 3, "method": "callTool", "params": {"name": "get_task"}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "error": {"code": -32603, "message": "Arguments are required"}
        })
    );
}

#[tokio::test]
async fn rpc_unknown_method() {
    let response = test_app(MockDartApi::new())
        .oneshot(rpc_request(Some(TOKEN), json!({"id": 4, "method": "shutdown"})))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["error"]["message"], "Unknown method: shutdown");
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn rpc_missing_method_is_an_error_envelope() {
    let response = test_app(MockDartApi::new())
        .oneshot(rpc_request(Some(TOKEN), json!({"id": 5})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], 5);
    assert_eq!(body["error"]["code"], -32603);
}

#[tokio::test]
async fn rpc_backend_error_embeds_status_and_body() {
    let mut api = MockDartApi::new();
    api.expect_get_task().times(1).returning(|_| {
        Err(crate::client::ClientError::Api {
            status: 404,
            body: r#"{"detail":"Not found."}"#.to_string(),
        })
    });

    let response = test_app(api)
        .oneshot(rpc_request(
            Some(TOKEN),
            json!({
                "id": 6,
                "method": "callTool",
                "params": {"name": "get_task", "arguments": {"id": "9q5qtB8n2Qn6"}}
            }),
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(
        body["error"]["message"],
        r#"API error: 404 {"detail":"Not found."}"#
    );
}

#[tokio::test]
async fn rpc_non_json_body_is_an_error_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/rpc")
        .header(AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::from("method=listTools"))
        .unwrap();

    let response = test_app(MockDartApi::new()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], Value::Null);
    assert_eq!(body["error"]["code"], -32603);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request: ")
    );
    assert!(body.get("result").is_none());
}
