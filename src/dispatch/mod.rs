//! Call dispatch.
//!
//! [`Dispatcher::dispatch`] is the one path every operation call takes,
//! whichever front end received it: catalog lookup, argument validation,
//! exactly one backend call, pretty-printed result.


use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::catalog::{Action, Catalog, Operation};
use crate::client::{ClientError, CommentCreate, DartApi, Envelope, JsonObject, ListQuery};
use crate::error::{DispatchError, DispatchResult};
use crate::validation::validate_id;

/// Routes named operation calls to the backend.
///
/// Holds no mutable state; share it behind an `Arc`.
pub struct Dispatcher<A> {
    api: A,
    catalog: &'static Catalog,
}

impl<A: DartApi> Dispatcher<A> {
    pub fn new(api: A) -> Self {
        Self::with_catalog(api, Catalog::standard())
    }

    pub fn with_catalog(api: A, catalog: &'static Catalog) -> Self {
        Self { api, catalog }
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Execute `name` with `raw_args`, returning the backend response as
    /// pretty-printed JSON.
    #[instrument(skip(self, raw_args), fields(operation = %name))]
    pub async fn dispatch(&self, name: &str, raw_args: Option<JsonObject>) -> DispatchResult<String> {
        let result = self.try_dispatch(name, raw_args).await;
        if let Err(e) = &result {
            warn!(error = %e, "dispatch failed");
        }
        result
    }

    async fn try_dispatch(&self, name: &str, raw_args: Option<JsonObject>) -> DispatchResult<String> {
        let operation = self
            .catalog
            .get(name)
            .ok_or_else(|| DispatchError::UnknownOperation {
                name: name.to_string(),
            })?;

        let mut args = match raw_args {
            Some(args) => args,
            None if operation.takes_no_arguments() => JsonObject::new(),
            None => {
                return Err(DispatchError::MissingArguments {
                    operation: operation.name.to_string(),
                });
            }
        };
        debug!(fields = args.len(), "dispatching");

        validate(operation, &mut args)?;

        let payload = self.route(operation.action, args).await?;
        Ok(serde_json::to_string_pretty(&payload).map_err(ClientError::from)?)
    }

    async fn route(&self, action: Action, mut args: JsonObject) -> DispatchResult<Value> {
        let payload = match action {
            Action::GetConfig => self.api.get_config().await?,
            Action::ListTasks => self.api.list_tasks(&ListQuery::from_args(&args)).await?,
            Action::CreateTask => self.api.create_task(Envelope::new(args)).await?,
            Action::GetTask => self.api.get_task(&take_id(&mut args, "id")?).await?,
            Action::UpdateTask => {
                let id = canonical_id(&args, "id")?;
                self.api.update_task(&id, Envelope::new(args)).await?
            }
            Action::DeleteTask => self.api.delete_task(&take_id(&mut args, "id")?).await?,
            Action::AddTaskComment => {
                let task_id = take_id(&mut args, "taskId")?;
                let text = match args.remove("text") {
                    Some(Value::String(text)) => text,
                    _ => {
                        return Err(DispatchError::invalid_request("text must be a string"));
                    }
                };
                self.api
                    .create_comment(Envelope::new(CommentCreate { task_id, text }))
                    .await?
            }
            Action::ListDocs => self.api.list_docs(&ListQuery::from_args(&args)).await?,
            Action::CreateDoc => self.api.create_doc(Envelope::new(args)).await?,
            Action::GetDoc => self.api.get_doc(&take_id(&mut args, "id")?).await?,
            Action::UpdateDoc => {
                let id = canonical_id(&args, "id")?;
                self.api.update_doc(&id, Envelope::new(args)).await?
            }
            Action::DeleteDoc => self.api.delete_doc(&take_id(&mut args, "id")?).await?,
            Action::GetDartboard => self.api.get_dartboard(&take_id(&mut args, "id")?).await?,
            Action::GetFolder => self.api.get_folder(&take_id(&mut args, "id")?).await?,
            Action::GetView => self.api.get_view(&take_id(&mut args, "id")?).await?,
        };
        Ok(payload)
    }
}

/// Check identifiers, then the full argument shape.
///
/// Identifier fields are replaced in place by their canonical form so the
/// bag forwarded to the backend only ever carries validated ids.
fn validate(operation: &Operation, args: &mut JsonObject) -> DispatchResult<()> {
    for field in operation.input_schema.identifier_fields() {
        let Some(value) = args.get_mut(field) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        let id = validate_id(value).map_err(|reason| DispatchError::InvalidIdentifier {
            field: field.to_string(),
            reason,
        })?;
        *value = Value::String(id);
    }

    let fields = operation.input_schema.check_arguments(args);
    if fields.is_empty() {
        Ok(())
    } else {
        Err(DispatchError::InvalidArguments {
            operation: operation.name.to_string(),
            fields,
        })
    }
}

fn canonical_id(args: &JsonObject, field: &str) -> DispatchResult<String> {
    let value = args.get(field).unwrap_or(&Value::Null);
    validate_id(value).map_err(|reason| DispatchError::InvalidIdentifier {
        field: field.to_string(),
        reason,
    })
}

fn take_id(args: &mut JsonObject, field: &str) -> DispatchResult<String> {
    let id = canonical_id(args, field)?;
    args.remove(field);
    Ok(id)
}
