//! Backend client capability.
//!
//! [`DartApi`] is the seam between the dispatcher and the Dart REST API: one
//! method per backend call, each returning the decoded JSON response as-is.
//! [`HttpDartClient`] is the reqwest implementation; tests use the generated
//! `MockDartApi`.

mod error;
mod http;

#[cfg(test)]
mod http_test;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

#[cfg(test)]
use mockall::automock;

pub use error::{ClientError, ClientResult};
pub use http::HttpDartClient;

/// A JSON object as received in a call's argument bag.
pub type JsonObject = Map<String, Value>;

/// Request body wrapper the backend expects for create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub item: T,
}

impl<T> Envelope<T> {
    pub fn new(item: T) -> Self {
        Self { item }
    }
}

/// Body of a new comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreate {
    pub task_id: String,
    pub text: String,
}

/// Query string pairs for the list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pairs: Vec<(String, String)>,
}

impl ListQuery {
    /// Flatten a filter bag into query pairs.
    ///
    /// Scalars are rendered as text, arrays repeat the key once per element
    /// and nulls are dropped. Nested objects are sent as compact JSON.
    pub fn from_args(args: &JsonObject) -> Self {
        let mut pairs = Vec::with_capacity(args.len());
        for (key, value) in args {
            match value {
                Value::Null => {}
                Value::Array(elements) => pairs.extend(
                    elements
                        .iter()
                        .filter_map(render_scalar)
                        .map(|v| (key.clone(), v)),
                ),
                other => {
                    if let Some(v) = render_scalar(other) {
                        pairs.push((key.clone(), v));
                    }
                }
            }
        }
        Self { pairs }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(render_number(n)),
        nested => Some(nested.to_string()),
    }
}

/// Whole floats such as `10.0` render as `10`.
fn render_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9.0e15 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

/// Every backend call the dispatcher can make.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DartApi: Send + Sync {
    /// Workspace configuration: assignees, dartboards, statuses and so on.
    async fn get_config(&self) -> ClientResult<Value>;

    async fn list_tasks(&self, query: &ListQuery) -> ClientResult<Value>;

    async fn create_task(&self, body: Envelope<JsonObject>) -> ClientResult<Value>;

    async fn get_task(&self, id: &str) -> ClientResult<Value>;

    async fn update_task(&self, id: &str, body: Envelope<JsonObject>) -> ClientResult<Value>;

    /// Moves the task to the trash.
    async fn delete_task(&self, id: &str) -> ClientResult<Value>;

    async fn create_comment(&self, body: Envelope<CommentCreate>) -> ClientResult<Value>;

    async fn list_docs(&self, query: &ListQuery) -> ClientResult<Value>;

    async fn create_doc(&self, body: Envelope<JsonObject>) -> ClientResult<Value>;

    async fn get_doc(&self, id: &str) -> ClientResult<Value>;

    async fn update_doc(&self, id: &str, body: Envelope<JsonObject>) -> ClientResult<Value>;

    /// Moves the doc to the trash.
    async fn delete_doc(&self, id: &str) -> ClientResult<Value>;

    async fn get_dartboard(&self, id: &str) -> ClientResult<Value>;

    async fn get_folder(&self, id: &str) -> ClientResult<Value>;

    async fn get_view(&self, id: &str) -> ClientResult<Value>;
}
