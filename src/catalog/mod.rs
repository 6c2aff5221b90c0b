//! Operation catalog.
//!
//! The catalog is the single table of operations this server exposes. Tool
//! discovery renders it, and the dispatcher validates against it and routes
//! through each entry's [`Action`].
//!
//! # Architecture
//!
//! - **schema**: declarative JSON shapes (`SchemaNode`) with validation
//! - **custom_property**: the tagged custom property kinds and their union
//! - **operations**: the standard operation table

mod custom_property;
mod operations;
mod schema;


use std::sync::LazyLock;

use serde_json::{Value, json};

pub use custom_property::{CustomPropertyKind, custom_properties_schema};
pub use schema::{FieldError, Pattern, SchemaNode, SchemaType};

/// Which backend call an operation is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GetConfig,
    ListTasks,
    CreateTask,
    GetTask,
    UpdateTask,
    DeleteTask,
    AddTaskComment,
    ListDocs,
    CreateDoc,
    GetDoc,
    UpdateDoc,
    DeleteDoc,
    GetDartboard,
    GetFolder,
    GetView,
}

/// A named, schema-described unit of work.
#[derive(Debug, Clone)]
pub struct Operation {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: SchemaNode,
    pub action: Action,
}

impl Operation {
    /// True when the operation declares no properties at all, which is the
    /// only case where a call may omit its arguments entirely.
    pub fn takes_no_arguments(&self) -> bool {
        self.input_schema.properties().is_empty() && self.input_schema.required_fields().is_empty()
    }

    /// Discovery form: `{name, description, inputSchema}`.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema.to_json(),
        })
    }
}

/// Ordered, name-unique collection of operations.
#[derive(Debug, Clone)]
pub struct Catalog {
    operations: Vec<Operation>,
}

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| Catalog::new(operations::standard_operations()));

impl Catalog {
    /// Build a catalog. Duplicate names are a construction defect.
    pub fn new(operations: Vec<Operation>) -> Self {
        debug_assert!(
            operations
                .iter()
                .enumerate()
                .all(|(i, op)| operations[..i].iter().all(|prev| prev.name != op.name)),
            "duplicate operation name in catalog"
        );
        Self { operations }
    }

    /// The catalog of every operation the Dart server supports.
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    /// All operations in advertised order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.name == name)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Discovery form of every operation.
    pub fn to_json(&self) -> Vec<Value> {
        self.operations.iter().map(Operation::to_json).collect()
    }
}
