//! Prompt templates offered alongside the operation catalog.

use serde::Serialize;
use serde_json::Value;

use crate::client::JsonObject;
use crate::error::{DispatchError, DispatchResult};

#[derive(Debug, Clone, Serialize)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Prompt {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: &'static [PromptArgument],
}

const fn arg(name: &'static str, description: &'static str, required: bool) -> PromptArgument {
    PromptArgument {
        name,
        description,
        required,
    }
}

pub const CREATE_TASK: Prompt = Prompt {
    name: "Create task",
    description: "Create a new task in Dart",
    arguments: &[
        arg("title", "Title of the task", true),
        arg("description", "Description of the task", false),
        arg("status", "Status of the task", false),
        arg("priority", "Priority of the task", false),
        arg("assignee", "Email of the assignee", false),
    ],
};

pub const CREATE_DOC: Prompt = Prompt {
    name: "Create doc",
    description: "Create a new document in Dart",
    arguments: &[
        arg("title", "Title of the document", true),
        arg("text", "Content of the document", false),
        arg("folder", "Folder to place the document in", false),
    ],
};

pub const SUMMARIZE_TASKS: Prompt = Prompt {
    name: "Summarize tasks",
    description: "Get a summary of tasks with optional filtering",
    arguments: &[
        arg(
            "status",
            "Filter by status (e.g., 'In Progress', 'Done')",
            false,
        ),
        arg("assignee", "Filter by assignee email", false),
    ],
};

/// Every prompt, in advertised order.
pub const PROMPTS: [Prompt; 3] = [CREATE_TASK, CREATE_DOC, SUMMARIZE_TASKS];

/// A single user-role text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: &'static str,
    pub content: TextContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPrompt {
    pub description: &'static str,
    pub messages: Vec<PromptMessage>,
}

impl RenderedPrompt {
    fn user_text(description: &'static str, text: String) -> Self {
        Self {
            description,
            messages: vec![PromptMessage {
                role: "user",
                content: TextContent { kind: "text", text },
            }],
        }
    }
}

/// Non-empty string argument, or `None`.
fn text_arg<'a>(args: &'a JsonObject, name: &str) -> Option<&'a str> {
    args.get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn line(args: &JsonObject, name: &str, label: &str) -> String {
    text_arg(args, name)
        .map(|v| format!("{label}: {v}"))
        .unwrap_or_default()
}

/// Render the prompt `name` with the given arguments.
///
/// Missing optional arguments leave an empty line in place so the message
/// layout does not depend on which arguments were supplied.
pub fn render(name: &str, args: &JsonObject) -> DispatchResult<RenderedPrompt> {
    let title = text_arg(args, "title").unwrap_or("(no title)");

    if name == CREATE_TASK.name {
        let text = format!(
            "Create a new task in Dart with the following details:\nTitle: {title}\n{}\n{}\n{}\n{}",
            line(args, "description", "Description"),
            line(args, "status", "Status"),
            line(args, "priority", "Priority"),
            line(args, "assignee", "Assignee"),
        );
        return Ok(RenderedPrompt::user_text(CREATE_TASK.description, text));
    }

    if name == CREATE_DOC.name {
        let text = format!(
            "Create a new document in Dart with the following details:\nTitle: {title}\n{}\n{}",
            line(args, "text", "Content"),
            line(args, "folder", "Folder"),
        );
        return Ok(RenderedPrompt::user_text(CREATE_DOC.description, text));
    }

    if name == SUMMARIZE_TASKS.name {
        let status = text_arg(args, "status")
            .map(|s| format!(" with status \"{s}\""))
            .unwrap_or_default();
        let assignee = text_arg(args, "assignee")
            .map(|a| format!(" assigned to {a}"))
            .unwrap_or_default();
        let text = format!(
            "Summarize the tasks in Dart{status}{assignee}.\nPlease include the total count, group by status, and list any high priority items."
        );
        return Ok(RenderedPrompt::user_text(SUMMARIZE_TASKS.description, text));
    }

    Err(DispatchError::UnknownPrompt {
        name: name.to_string(),
    })
}
