//! The standard operation table.
//!
//! Field names, descriptions and patterns are part of the wire contract and
//! must not be changed casually; clients build their calls from them.

use super::custom_property::custom_properties_schema;
use super::schema::{SchemaNode, SchemaType};
use super::{Action, Operation};
use crate::validation::ID_PATTERN;

const TASK_ID: &str = "The 12-character alphanumeric ID of the task";
const DOC_ID: &str = "The 12-character alphanumeric ID of the doc";
const DARTBOARD_ID: &str = "The 12-character alphanumeric ID of the dartboard";
const FOLDER_ID: &str = "The 12-character alphanumeric ID of the folder";
const VIEW_ID: &str = "The 12-character alphanumeric ID of the view";

fn id_field(description: &'static str) -> SchemaNode {
    SchemaNode::string()
        .describe(description)
        .pattern(ID_PATTERN)
        .identifier()
}

fn by_id(description: &'static str) -> SchemaNode {
    SchemaNode::input()
        .property("id", id_field(description))
        .require("id")
}

fn filter(description: &'static str) -> SchemaNode {
    SchemaNode::string().describe(description)
}

/// Properties shared by `create_task` and `update_task`.
fn task_fields(schema: SchemaNode, title_description: &'static str) -> SchemaNode {
    schema
        .property("title", SchemaNode::string().describe(title_description))
        .property(
            "description",
            SchemaNode::string().describe(
                "A longer description of the task, which can include markdown formatting",
            ),
        )
        .property(
            "status",
            SchemaNode::string().describe("The status from the list of available statuses"),
        )
        .property(
            "priority",
            SchemaNode::string().describe("The priority (Critical, High, Medium, or Low)"),
        )
        .property(
            "size",
            SchemaNode::of(&[SchemaType::String, SchemaType::Number, SchemaType::Null])
                .describe("The size which represents the amount of work needed"),
        )
        .property(
            "startAt",
            SchemaNode::string().describe(
                "The start date in ISO format (should be at 9:00am in user's timezone)",
            ),
        )
        .property(
            "dueAt",
            SchemaNode::string()
                .describe("The due date in ISO format (should be at 9:00am in user's timezone)"),
        )
        .property(
            "dartboard",
            SchemaNode::string()
                .describe("The title of the dartboard (project or list of tasks)"),
        )
        .property(
            "assignees",
            SchemaNode::array(SchemaNode::string()).describe(
                "Array of assignee names or emails (if workspace allows multiple assignees)",
            ),
        )
        .property(
            "assignee",
            SchemaNode::string().describe(
                "Single assignee name or email (if workspace doesn't allow multiple assignees)",
            ),
        )
        .property(
            "tags",
            SchemaNode::array(SchemaNode::string()).describe("Array of tags to apply to the task"),
        )
        .property(
            "parentId",
            SchemaNode::string()
                .describe("The ID of the parent task")
                .identifier(),
        )
        .property("customProperties", custom_properties_schema())
}

/// Properties shared by `create_doc` and `update_doc`.
fn doc_fields(schema: SchemaNode, title_description: &'static str) -> SchemaNode {
    schema
        .property("title", SchemaNode::string().describe(title_description))
        .property(
            "text",
            SchemaNode::string()
                .describe("The text content of the doc, which can include markdown formatting"),
        )
        .property(
            "folder",
            SchemaNode::string().describe("The title of the folder to place the doc in"),
        )
}

fn list_tasks_schema() -> SchemaNode {
    SchemaNode::input()
        .property("assignee", filter("Filter by assignee name or email"))
        .property("assignee_id", filter("Filter by assignee ID"))
        .property("dartboard", filter("Filter by dartboard title"))
        .property("dartboard_id", filter("Filter by dartboard ID").identifier())
        .property("description", filter("Filter by description content"))
        .property("due_at_before", filter("Filter by due date before (ISO format)"))
        .property("due_at_after", filter("Filter by due date after (ISO format)"))
        .property("ids", filter("Filter by IDs"))
        .property(
            "in_trash",
            SchemaNode::boolean().describe("Filter by trash status"),
        )
        .property(
            "is_completed",
            SchemaNode::boolean().describe("Filter by completion status"),
        )
        .property(
            "limit",
            SchemaNode::number().describe("Number of results per page"),
        )
        .property(
            "offset",
            SchemaNode::number().describe("Initial index for pagination"),
        )
        .property("priority", filter("Filter by priority"))
        .property("size", SchemaNode::number().describe("Filter by task size"))
        .property(
            "start_at_before",
            filter("Filter by start date before (ISO format)"),
        )
        .property(
            "start_at_after",
            filter("Filter by start date after (ISO format)"),
        )
        .property("status", filter("Filter by status"))
        .property("status_id", filter("Filter by status ID"))
        .property("tag", filter("Filter by tag"))
        .property("tag_id", filter("Filter by tag ID"))
        .property("parent_id", filter("Filter by parent task ID").identifier())
        .property("type", filter("Filter by task type"))
        .property("type_id", filter("Filter by task type ID"))
        .property("title", filter("Filter by title"))
}

fn list_docs_schema() -> SchemaNode {
    SchemaNode::input()
        .property("folder", filter("Filter by folder title"))
        .property("folder_id", filter("Filter by folder ID").identifier())
        .property("ids", filter("Filter by IDs"))
        .property(
            "in_trash",
            SchemaNode::boolean().describe("Filter by trash status"),
        )
        .property(
            "limit",
            SchemaNode::number().describe("Number of results per page"),
        )
        .property(
            "offset",
            SchemaNode::number().describe("Initial index for pagination"),
        )
        .property("s", filter("Search by title, text, or folder title"))
        .property(
            "o",
            SchemaNode::array(SchemaNode::string().enumerated(&[
                "-created_at",
                "-order",
                "-title",
                "-updated_at",
                "created_at",
                "order",
                "title",
                "updated_at",
            ]))
            .describe("Ordering options (use - prefix for descending)"),
        )
        .property("text", filter("Filter by text content"))
        .property("title", filter("Filter by title"))
}

/// Build the standard catalog entries in advertised order.
pub(super) fn standard_operations() -> Vec<Operation> {
    vec![
        Operation {
            name: "get_config",
            description: "Get information about the user's space, including all of the possible values that can be provided to other endpoints. This includes available assignees, dartboards, folders, statuses, tags, priorities, sizes, and all custom property definitions.",
            input_schema: SchemaNode::input(),
            action: Action::GetConfig,
        },
        Operation {
            name: "list_tasks",
            description: "List tasks from Dart with optional filtering parameters. You can filter by assignee, status, dartboard, priority, due date, and more.",
            input_schema: list_tasks_schema(),
            action: Action::ListTasks,
        },
        Operation {
            name: "create_task",
            description: "Create a new task in Dart. You can specify title, description, status, priority, size, dates, dartboard, assignees, tags, parent task, and custom properties.",
            input_schema: task_fields(SchemaNode::input(), "The title of the task (required)")
                .require("title"),
            action: Action::CreateTask,
        },
        Operation {
            name: "get_task",
            description: "Retrieve an existing task by its ID. Returns the task's information including title, description, status, priority, dates, custom properties, and more.",
            input_schema: by_id(TASK_ID),
            action: Action::GetTask,
        },
        Operation {
            name: "update_task",
            description: "Update an existing task. You can modify any of its properties including title, description, status, priority, dates, assignees, tags, and custom properties.",
            input_schema: task_fields(
                SchemaNode::input().property("id", id_field(TASK_ID)),
                "The title of the task",
            )
            .require("id"),
            action: Action::UpdateTask,
        },
        Operation {
            name: "delete_task",
            description: "Move an existing task to the trash, where it can be recovered if needed. Nothing else about the task will be changed.",
            input_schema: by_id(TASK_ID),
            action: Action::DeleteTask,
        },
        Operation {
            name: "add_task_comment",
            description: "Add a comment to an existing task without modifying the task description. Comments support markdown formatting.",
            input_schema: SchemaNode::input()
                .property("taskId", id_field(TASK_ID))
                .property(
                    "text",
                    SchemaNode::string().describe(
                        "The full content of the comment, which can include markdown formatting.",
                    ),
                )
                .require("taskId")
                .require("text"),
            action: Action::AddTaskComment,
        },
        Operation {
            name: "list_docs",
            description: "List docs from Dart with optional filtering parameters. You can filter by folder, title, text content, and more.",
            input_schema: list_docs_schema(),
            action: Action::ListDocs,
        },
        Operation {
            name: "create_doc",
            description: "Create a new doc in Dart. You can specify title, text content, and folder.",
            input_schema: doc_fields(SchemaNode::input(), "The title of the doc (required)")
                .require("title"),
            action: Action::CreateDoc,
        },
        Operation {
            name: "get_doc",
            description: "Retrieve an existing doc by its ID. Returns the doc's information including title, text content, folder, and more.",
            input_schema: by_id(DOC_ID),
            action: Action::GetDoc,
        },
        Operation {
            name: "update_doc",
            description: "Update an existing doc. You can modify its title, text content, and folder.",
            input_schema: doc_fields(
                SchemaNode::input().property("id", id_field(DOC_ID)),
                "The title of the doc",
            )
            .require("id"),
            action: Action::UpdateDoc,
        },
        Operation {
            name: "delete_doc",
            description: "Move an existing doc to the trash, where it can be recovered if needed. Nothing else about the doc will be changed.",
            input_schema: by_id(DOC_ID),
            action: Action::DeleteDoc,
        },
        Operation {
            name: "get_dartboard",
            description: "Retrieve an existing dartboard by its ID. Returns the dartboard's information including title, description, and all tasks within it.",
            input_schema: by_id(DARTBOARD_ID),
            action: Action::GetDartboard,
        },
        Operation {
            name: "get_folder",
            description: "Retrieve an existing folder by its ID. Returns the folder's information including title, description, and all docs within it.",
            input_schema: by_id(FOLDER_ID),
            action: Action::GetFolder,
        },
        Operation {
            name: "get_view",
            description: "Retrieve an existing view by its ID. Returns the view's information including title, description, and all tasks within it.",
            input_schema: by_id(VIEW_ID),
            action: Action::GetView,
        },
    ]
}
