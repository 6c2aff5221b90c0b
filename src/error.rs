//! Dispatch error taxonomy.
//!
//! Every failure a call can produce, whichever front end it came through.
//! Front ends never inspect variants beyond [`DispatchError::to_wire`]; the
//! message text is what callers see.

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::FieldError;
use crate::client::ClientError;
use crate::validation::IdError;

/// JSON-RPC "internal error", used for every dispatch failure.
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Error, Diagnostic, Debug)]
pub enum DispatchError {
    #[error("Unknown tool: {name}")]
    #[diagnostic(code(dart_mcp::dispatch::unknown_operation))]
    UnknownOperation { name: String },

    #[error("Arguments are required")]
    #[diagnostic(
        code(dart_mcp::dispatch::missing_arguments),
        help("Only operations without declared properties may be called without arguments")
    )]
    MissingArguments { operation: String },

    #[error("Invalid arguments for {operation}: {}", join_fields(.fields))]
    #[diagnostic(code(dart_mcp::dispatch::invalid_arguments))]
    InvalidArguments {
        operation: String,
        fields: Vec<FieldError>,
    },

    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(dart_mcp::dispatch::invalid_identifier))]
    InvalidIdentifier { field: String, reason: IdError },

    #[error("API error: {status} {body}")]
    #[diagnostic(code(dart_mcp::dispatch::backend))]
    Backend { status: u16, body: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Client(ClientError),

    #[error("Unknown prompt: {name}")]
    #[diagnostic(code(dart_mcp::dispatch::unknown_prompt))]
    UnknownPrompt { name: String },

    #[error("Unknown resource: {uri}")]
    #[diagnostic(code(dart_mcp::dispatch::unknown_resource))]
    UnknownResource { uri: String },

    #[error("Unknown method: {method}")]
    #[diagnostic(code(dart_mcp::dispatch::unknown_method))]
    UnknownMethod { method: String },

    #[error("{message}")]
    #[diagnostic(code(dart_mcp::dispatch::invalid_request))]
    InvalidRequest { message: String },
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DispatchError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Protocol-level form of this error.
    pub fn to_wire(&self) -> WireError {
        WireError {
            code: INTERNAL_ERROR,
            message: self.to_string(),
        }
    }
}

impl From<ClientError> for DispatchError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Api { status, body } => {
                let body = if body.trim().is_empty() {
                    "(unknown error)".to_string()
                } else {
                    body
                };
                DispatchError::Backend { status, body }
            }
            other => DispatchError::Client(other),
        }
    }
}

/// `{code, message}` as carried in a JSON-RPC error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireError {
    pub code: i64,
    pub message: String,
}

pub type DispatchResult<T> = Result<T, DispatchError>;
