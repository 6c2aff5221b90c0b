use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{ClientError, ClientResult, CommentCreate, DartApi, Envelope, JsonObject, ListQuery};
use crate::config::Config;

/// Dart REST API client.
///
/// Every request carries the workspace token as a bearer credential and is
/// bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct HttpDartClient {
    base_url: String,
    token: String,
    client: Client,
}

impl HttpDartClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            token: token.into(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> ClientResult<Self> {
        Self::new(config.base_url(), config.token(), config.timeout())
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.client
            .put(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.client
            .delete(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<Value> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn send_json<T: Serialize + Sync>(
        &self,
        request: RequestBuilder,
        body: &T,
    ) -> ClientResult<Value> {
        self.send(request.json(body)).await
    }

    /// Decode a backend response.
    ///
    /// Non-success statuses become [`ClientError::Api`] carrying the raw
    /// body; an empty success body decodes to `null`.
    pub async fn handle_response(response: Response) -> ClientResult<Value> {
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "dart api response");

        if status.is_success() {
            let text = response.text().await?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_str(&text)?)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl DartApi for HttpDartClient {
    async fn get_config(&self) -> ClientResult<Value> {
        self.send(self.get("/config")).await
    }

    async fn list_tasks(&self, query: &ListQuery) -> ClientResult<Value> {
        self.send(self.get("/tasks/list").query(query.pairs())).await
    }

    async fn create_task(&self, body: Envelope<JsonObject>) -> ClientResult<Value> {
        self.send_json(self.post("/tasks"), &body).await
    }

    async fn get_task(&self, id: &str) -> ClientResult<Value> {
        self.send(self.get(&format!("/tasks/{id}"))).await
    }

    async fn update_task(&self, id: &str, body: Envelope<JsonObject>) -> ClientResult<Value> {
        self.send_json(self.put(&format!("/tasks/{id}")), &body).await
    }

    async fn delete_task(&self, id: &str) -> ClientResult<Value> {
        self.send(self.delete(&format!("/tasks/{id}"))).await
    }

    async fn create_comment(&self, body: Envelope<CommentCreate>) -> ClientResult<Value> {
        self.send_json(self.post("/comments"), &body).await
    }

    async fn list_docs(&self, query: &ListQuery) -> ClientResult<Value> {
        self.send(self.get("/docs/list").query(query.pairs())).await
    }

    async fn create_doc(&self, body: Envelope<JsonObject>) -> ClientResult<Value> {
        self.send_json(self.post("/docs"), &body).await
    }

    async fn get_doc(&self, id: &str) -> ClientResult<Value> {
        self.send(self.get(&format!("/docs/{id}"))).await
    }

    async fn update_doc(&self, id: &str, body: Envelope<JsonObject>) -> ClientResult<Value> {
        self.send_json(self.put(&format!("/docs/{id}")), &body).await
    }

    async fn delete_doc(&self, id: &str) -> ClientResult<Value> {
        self.send(self.delete(&format!("/docs/{id}"))).await
    }

    async fn get_dartboard(&self, id: &str) -> ClientResult<Value> {
        self.send(self.get(&format!("/dartboards/{id}"))).await
    }

    async fn get_folder(&self, id: &str) -> ClientResult<Value> {
        self.send(self.get(&format!("/folders/{id}"))).await
    }

    async fn get_view(&self, id: &str) -> ClientResult<Value> {
        self.send(self.get(&format!("/views/{id}"))).await
    }
}
