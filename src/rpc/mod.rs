//! JSON-RPC method routing shared by the stdio and HTTP front ends.
//!
//! Results are plain JSON in the shapes MCP clients expect (`{tools}`,
//! `{content}`, `{prompts}`, `{messages}`, `{resourceTemplates}`,
//! `{contents}`), so each front end only adds its own framing.


use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::client::{DartApi, JsonObject};
use crate::dispatch::Dispatcher;
use crate::error::{DispatchError, DispatchResult, WireError};
use crate::{prompts, resources};

/// Methods accepted on the RPC surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    ListTools,
    CallTool,
    ListPrompts,
    GetPrompt,
    ListResourceTemplates,
    ReadResource,
}

impl RpcMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListTools => "listTools",
            Self::CallTool => "callTool",
            Self::ListPrompts => "listPrompts",
            Self::GetPrompt => "getPrompt",
            Self::ListResourceTemplates => "listResourceTemplates",
            Self::ReadResource => "readResource",
        }
    }
}

impl FromStr for RpcMethod {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "listTools" => Ok(Self::ListTools),
            "callTool" => Ok(Self::CallTool),
            "listPrompts" => Ok(Self::ListPrompts),
            "getPrompt" => Ok(Self::GetPrompt),
            "listResourceTemplates" => Ok(Self::ListResourceTemplates),
            "readResource" => Ok(Self::ReadResource),
            other => Err(DispatchError::UnknownMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// `{name, arguments?}` as sent to `callTool` and `getPrompt`.
#[derive(Debug, Default, Deserialize)]
pub struct NamedCall {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<JsonObject>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReadResourceParams {
    #[serde(default)]
    pub uri: Option<String>,
}

/// Incoming JSON-RPC request on `POST /rpc`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct RpcRequest {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub params: Value,
}

/// Outgoing JSON-RPC response: exactly one of `result` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct RpcResponse {
    #[schema(value_type = String)]
    pub jsonrpc: &'static str,
    #[schema(value_type = Object)]
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub error: Option<WireError>,
}

impl RpcResponse {
    pub fn from_result(id: Value, result: DispatchResult<Value>) -> Self {
        match result {
            Ok(value) => Self {
                jsonrpc: "2.0",
                id,
                result: Some(value),
                error: None,
            },
            Err(e) => Self {
                jsonrpc: "2.0",
                id,
                result: None,
                error: Some(e.to_wire()),
            },
        }
    }
}

fn parse_params<T: DeserializeOwned + Default>(params: Value) -> DispatchResult<T> {
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params)
        .map_err(|e| DispatchError::invalid_request(format!("Invalid params: {e}")))
}

/// Answers every RPC method on top of a [`Dispatcher`].
pub struct RpcRouter<A> {
    dispatcher: Dispatcher<A>,
}

impl<A: DartApi> RpcRouter<A> {
    pub fn new(dispatcher: Dispatcher<A>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher<A> {
        &self.dispatcher
    }

    pub fn list_tools(&self) -> Value {
        json!({ "tools": self.dispatcher.catalog().to_json() })
    }

    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> DispatchResult<Value> {
        let text = self.dispatcher.dispatch(name, arguments).await?;
        Ok(json!({ "content": [{ "type": "text", "text": text }] }))
    }

    pub fn list_prompts(&self) -> Value {
        json!({ "prompts": prompts::PROMPTS })
    }

    pub fn get_prompt(&self, name: &str, arguments: Option<JsonObject>) -> DispatchResult<Value> {
        let rendered = prompts::render(name, &arguments.unwrap_or_default())?;
        Ok(json!(rendered))
    }

    pub fn list_resource_templates(&self) -> Value {
        let templates: Vec<Value> = resources::TEMPLATES.iter().map(|t| t.to_json()).collect();
        json!({ "resourceTemplates": templates })
    }

    pub async fn read_resource(&self, uri: &str) -> DispatchResult<Value> {
        let contents = resources::read(self.dispatcher.api(), uri).await?;
        Ok(json!({ "contents": [contents] }))
    }

    /// Route one request by method name.
    #[instrument(skip(self, params))]
    pub async fn handle(&self, method: &str, params: Value) -> DispatchResult<Value> {
        let method: RpcMethod = method.parse()?;
        debug!(method = method.as_str(), "rpc request");

        match method {
            RpcMethod::ListTools => Ok(self.list_tools()),
            RpcMethod::CallTool => {
                let call: NamedCall = parse_params(params)?;
                let name = call
                    .name
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| DispatchError::invalid_request("Tool name is required"))?;
                self.call_tool(&name, call.arguments).await
            }
            RpcMethod::ListPrompts => Ok(self.list_prompts()),
            RpcMethod::GetPrompt => {
                let call: NamedCall = parse_params(params)?;
                let name = call
                    .name
                    .ok_or_else(|| DispatchError::invalid_request("Prompt name is required"))?;
                self.get_prompt(&name, call.arguments)
            }
            RpcMethod::ListResourceTemplates => Ok(self.list_resource_templates()),
            RpcMethod::ReadResource => {
                let read: ReadResourceParams = parse_params(params)?;
                let uri = read
                    .uri
                    .ok_or_else(|| DispatchError::invalid_request("Resource uri is required"))?;
                self.read_resource(&uri).await
            }
        }
    }

    /// Handle a full request envelope. Never fails: errors are carried in
    /// the response.
    pub async fn respond(&self, request: RpcRequest) -> RpcResponse {
        let result = self.handle(&request.method, request.params).await;
        RpcResponse::from_result(request.id, result)
    }
}
