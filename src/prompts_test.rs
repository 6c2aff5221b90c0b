use serde_json::json;

use crate::client::JsonObject;
use crate::error::DispatchError;
use crate::prompts::{PROMPTS, render};

fn bag(value: serde_json::Value) -> JsonObject {
    value.as_object().unwrap().clone()
}

#[test]
fn test_prompt_listing() {
    let names: Vec<&str> = PROMPTS.iter().map(|p| p.name).collect();
    assert_eq!(names, ["Create task", "Create doc", "Summarize tasks"]);

    let rendered = serde_json::to_value(&PROMPTS[0]).unwrap();
    assert_eq!(
        rendered["arguments"][0],
        json!({"name": "title", "description": "Title of the task", "required": true})
    );
    assert_eq!(rendered["arguments"].as_array().unwrap().len(), 5);
}

#[test]
fn test_create_task_with_all_arguments() {
    let prompt = render(
        "Create task",
        &bag(json!({
            "title": "Fix login",
            "description": "Users bounce",
            "status": "Doing",
            "priority": "High",
            "assignee": "ada@example.com"
        })),
    )
    .unwrap();

    assert_eq!(prompt.description, "Create a new task in Dart");
    assert_eq!(prompt.messages.len(), 1);
    assert_eq!(prompt.messages[0].role, "user");
    assert_eq!(
        prompt.messages[0].content.text,
        "Create a new task in Dart with the following details:\nTitle: Fix login\nDescription: Users bounce\nStatus: Doing\nPriority: High\nAssignee: ada@example.com"
    );
}

#[test]
fn test_create_task_keeps_blank_lines_for_missing_arguments() {
    let prompt = render("Create task", &bag(json!({"priority": "Low"}))).unwrap();
    assert_eq!(
        prompt.messages[0].content.text,
        "Create a new task in Dart with the following details:\nTitle: (no title)\n\n\nPriority: Low\n"
    );
}

#[test]
fn test_create_doc() {
    let prompt = render(
        "Create doc",
        &bag(json!({"title": "Runbook", "folder": "Ops"})),
    )
    .unwrap();
    assert_eq!(
        prompt.messages[0].content.text,
        "Create a new document in Dart with the following details:\nTitle: Runbook\n\nFolder: Ops"
    );
}

#[test]
fn test_summarize_tasks_filters() {
    let plain = render("Summarize tasks", &JsonObject::new()).unwrap();
    assert_eq!(
        plain.messages[0].content.text,
        "Summarize the tasks in Dart.\nPlease include the total count, group by status, and list any high priority items."
    );

    let filtered = render(
        "Summarize tasks",
        &bag(json!({"status": "In Progress", "assignee": "ada@example.com"})),
    )
    .unwrap();
    assert!(
        filtered.messages[0]
            .content
            .text
            .starts_with("Summarize the tasks in Dart with status \"In Progress\" assigned to ada@example.com.\n")
    );
}

#[test]
fn test_rendered_prompt_wire_shape() {
    let prompt = render("Summarize tasks", &JsonObject::new()).unwrap();
    let value = serde_json::to_value(&prompt).unwrap();
    assert_eq!(value["messages"][0]["content"]["type"], "text");
    assert_eq!(value["description"], "Get a summary of tasks with optional filtering");
}

#[test]
fn test_unknown_prompt() {
    let err = render("Delete everything", &JsonObject::new()).unwrap_err();
    assert!(matches!(err, DispatchError::UnknownPrompt { .. }));
    assert_eq!(err.to_string(), "Unknown prompt: Delete everything");
}
