//! Addressable resources: workspace config, tasks and docs by URI.

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::debug;
use url::Url;

use crate::client::{ClientError, DartApi};
use crate::error::{DispatchError, DispatchResult};
use crate::validation::validate_id;

const CONFIG_SCHEME: &str = "dart-config";
const TASK_SCHEME: &str = "dart-task";
const DOC_SCHEME: &str = "dart-doc";

const JSON_MIME: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ResourceTemplate {
    pub uri_template: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// `(name, description)` of the single URI parameter, if any.
    pub parameter: Option<(&'static str, &'static str)>,
    pub example: &'static str,
}

impl ResourceTemplate {
    pub fn to_json(&self) -> Value {
        let mut parameters = Map::new();
        if let Some((name, description)) = self.parameter {
            parameters.insert(
                name.to_string(),
                json!({"type": "string", "description": description}),
            );
        }
        json!({
            "uriTemplate": self.uri_template,
            "name": self.name,
            "description": self.description,
            "parameters": parameters,
            "examples": [self.example],
        })
    }
}

pub const TEMPLATES: [ResourceTemplate; 3] = [
    ResourceTemplate {
        uri_template: "dart-config:",
        name: "Dart config",
        description: "Information about the authenticated user associated with the API key, including their role, teams, and settings.",
        parameter: None,
        example: "dart-config:",
    },
    ResourceTemplate {
        uri_template: "dart-task:///{taskId}",
        name: "Dart task",
        description: "A Dart task with its title, description, status, priority, dates, and more. Use this to fetch detailed information about a specific task.",
        parameter: Some(("taskId", "The unique identifier of the Dart task")),
        example: "dart-task:///9q5qtB8n2Qn6",
    },
    ResourceTemplate {
        uri_template: "dart-doc:///{docId}",
        name: "Dart doc",
        description: "A Dart doc with its title, text content, and folder. Use this to fetch detailed information about a specific doc.",
        parameter: Some(("docId", "The unique identifier of the Dart doc")),
        example: "dart-doc:///9q5qtB8n2Qn6",
    },
];

/// A parsed resource URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceUri {
    Config,
    Task(String),
    Doc(String),
}

impl ResourceUri {
    pub fn parse(uri: &str) -> DispatchResult<Self> {
        let unknown = || DispatchError::UnknownResource {
            uri: uri.to_string(),
        };
        let url = Url::parse(uri).map_err(|_| unknown())?;
        let path = url.path().strip_prefix('/').unwrap_or(url.path());

        let id = |field: &str| {
            validate_id(&Value::String(path.to_string())).map_err(|reason| {
                DispatchError::InvalidIdentifier {
                    field: field.to_string(),
                    reason,
                }
            })
        };

        match url.scheme() {
            CONFIG_SCHEME => Ok(Self::Config),
            TASK_SCHEME => Ok(Self::Task(id("taskId")?)),
            DOC_SCHEME => Ok(Self::Doc(id("docId")?)),
            _ => Err(unknown()),
        }
    }
}

/// One entry of a `readResource` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: &'static str,
    pub text: String,
}

/// Fetch the resource at `uri` as pretty-printed JSON.
pub async fn read<A: DartApi + ?Sized>(api: &A, uri: &str) -> DispatchResult<ResourceContents> {
    let resource = ResourceUri::parse(uri)?;
    debug!(?resource, "reading resource");

    let payload = match &resource {
        ResourceUri::Config => api.get_config().await?,
        ResourceUri::Task(id) => api.get_task(id).await?,
        ResourceUri::Doc(id) => api.get_doc(id).await?,
    };

    Ok(ResourceContents {
        uri: uri.to_string(),
        mime_type: JSON_MIME,
        text: serde_json::to_string_pretty(&payload).map_err(ClientError::from)?,
    })
}
