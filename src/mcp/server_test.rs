//! Tests for the MCP server, driven over an in-memory duplex transport.

use rmcp::model::{CallToolRequestParams, ClientInfo};
use rmcp::{ClientHandler, ServerHandler, ServiceExt};
use serde_json::json;

use crate::client::MockDartApi;
use crate::dispatch::Dispatcher;
use crate::rpc::RpcRouter;

use super::server::DartMcpServer;

#[derive(Debug, Clone, Default)]
struct DummyClient;

impl ClientHandler for DummyClient {
    fn get_info(&self) -> ClientInfo {
        ClientInfo::default()
    }
}

fn server(api: MockDartApi) -> DartMcpServer<MockDartApi> {
    DartMcpServer::new(RpcRouter::new(Dispatcher::new(api)))
}

fn call(name: &str, arguments: Option<serde_json::Value>) -> CallToolRequestParams {
    CallToolRequestParams {
        meta: None,
        name: name.to_string().into(),
        arguments: arguments.map(|v| v.as_object().unwrap().clone()),
        task: None,
    }
}

#[test]
fn test_server_info() {
    let info = server(MockDartApi::new()).get_info();

    assert!(info.capabilities.tools.is_some(), "Server should support tools");
    assert!(info.capabilities.prompts.is_some(), "Server should support prompts");
    assert!(info.capabilities.resources.is_some(), "Server should support resources");
    assert_eq!(info.server_info.name, "dart-mcp");
    assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_protocol_list_tools() {
    let (server_transport, client_transport) = tokio::io::duplex(64 * 1024);

    let server = server(MockDartApi::new());
    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await.unwrap();
        service.waiting().await.unwrap();
    });

    let client = DummyClient.serve(client_transport).await.unwrap();

    let tools = client.list_tools(None).await.unwrap();
    let names: Vec<&str> = tools.tools.iter().map(|t| t.name.as_ref()).collect();
    assert_eq!(names.len(), 15);
    assert_eq!(names[0], "get_config");
    assert!(names.contains(&"add_task_comment"));

    let prompts = client.list_prompts(None).await.unwrap();
    assert_eq!(prompts.prompts.len(), 3);

    let templates = client.list_resource_templates(None).await.unwrap();
    assert_eq!(templates.resource_templates.len(), 3);

    client.cancel().await.unwrap();
    server_handle.await.unwrap();
}

#[tokio::test]
async fn test_protocol_call_tool() {
    let (server_transport, client_transport) = tokio::io::duplex(64 * 1024);

    let mut api = MockDartApi::new();
    api.expect_get_task()
        .withf(|id: &str| id == "9q5qtB8n2Qn6")
        .times(1)
        .returning(|_| Ok(json!({"item": {"id": "9q5qtB8n2Qn6", "title": "Plan"}})));

    let server = server(api);
    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await.unwrap();
        service.waiting().await.unwrap();
    });

    let client = DummyClient.serve(client_transport).await.unwrap();

    let result = client
        .call_tool(call("get_task", Some(json!({"id": "9q5qtB8n2Qn6"}))))
        .await
        .unwrap();

    let text = result
        .content
        .first()
        .and_then(|c| c.raw.as_text())
        .map(|t| t.text.as_str())
        .expect("Expected text content");
    let parsed: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(parsed["item"]["title"], "Plan");

    client.cancel().await.unwrap();
    server_handle.await.unwrap();
}

#[tokio::test]
async fn test_protocol_errors_do_not_end_the_session() {
    let (server_transport, client_transport) = tokio::io::duplex(64 * 1024);

    let mut api = MockDartApi::new();
    api.expect_get_config()
        .times(1)
        .returning(|| Ok(json!({"today": "2025-05-10"})));

    let server = server(api);
    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await.unwrap();
        service.waiting().await.unwrap();
    });

    let client = DummyClient.serve(client_transport).await.unwrap();

    let unknown = client.call_tool(call("launch_rockets", Some(json!({})))).await;
    assert!(unknown.is_err());

    let missing = client.call_tool(call("get_task", None)).await;
    assert!(missing.is_err());

    let ok = client.call_tool(call("get_config", None)).await.unwrap();
    assert_eq!(ok.content.len(), 1);

    client.cancel().await.unwrap();
    server_handle.await.unwrap();
}
