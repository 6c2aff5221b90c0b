//! MCP server implementation
//!
//! Every MCP request is answered by the shared [`RpcRouter`]; this module
//! only converts between rmcp's typed model and the router's JSON.

use std::sync::Arc;

use rmcp::{
    ErrorData, RoleServer, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, Content, GetPromptRequestParams, GetPromptResult,
        Implementation, ListPromptsResult, ListResourceTemplatesResult, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ReadResourceRequestParams, ReadResourceResult,
        ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::DartApi;
use crate::error::DispatchError;
use crate::rpc::RpcRouter;

/// MCP front end over the Dart dispatcher.
///
/// Cheap to clone: each streamable HTTP session gets its own handle onto the
/// same router.
pub struct DartMcpServer<A> {
    rpc: Arc<RpcRouter<A>>,
}

impl<A> Clone for DartMcpServer<A> {
    fn clone(&self) -> Self {
        Self {
            rpc: Arc::clone(&self.rpc),
        }
    }
}

impl<A: DartApi> DartMcpServer<A> {
    pub fn new(rpc: impl Into<Arc<RpcRouter<A>>>) -> Self {
        Self { rpc: rpc.into() }
    }

    pub fn router(&self) -> &RpcRouter<A> {
        &self.rpc
    }
}

fn to_error(e: DispatchError) -> ErrorData {
    let wire = e.to_wire();
    ErrorData::internal_error(wire.message, None)
}

fn convert<T: DeserializeOwned>(value: Value) -> Result<T, ErrorData> {
    serde_json::from_value(value).map_err(|e| ErrorData::internal_error(e.to_string(), None))
}

impl<A: DartApi + 'static> ServerHandler for DartMcpServer<A> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "dart-mcp".to_string(),
                title: Some("Dart MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "Read and manage Dart tasks, docs, dartboards, folders and views".to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Dart MCP Server - call get_config first to learn the workspace's statuses, \
                 dartboards, assignees and custom properties, then use the task and doc tools."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        convert(self.rpc.list_tools())
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let text = self
            .rpc
            .dispatcher()
            .dispatch(&request.name, request.arguments)
            .await
            .map_err(to_error)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        convert(self.rpc.list_prompts())
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        let rendered = self
            .rpc
            .get_prompt(&request.name, request.arguments)
            .map_err(to_error)?;
        convert(rendered)
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, ErrorData> {
        convert(self.rpc.list_resource_templates())
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let contents = self
            .rpc
            .read_resource(&request.uri)
            .await
            .map_err(to_error)?;
        convert(contents)
    }
}
