//! Resource identifier validation.
//!
//! Every Dart task, doc, dartboard, folder and view is addressed by a
//! 12-character alphanumeric id. Ids arrive from callers as loosely typed
//! JSON, so they are checked here before they are ever placed in a URL.

use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;

/// Length of every Dart identifier.
pub const ID_LEN: usize = 12;

/// Wire-visible pattern advertised in operation schemas.
pub const ID_PATTERN: &str = "^[a-zA-Z0-9]{12}$";

/// Reasons a value is not a usable identifier.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("ID must be a string")]
    #[diagnostic(code(dart_mcp::validation::not_a_string))]
    NotAString,

    #[error("ID must be 12 alphanumeric characters")]
    #[diagnostic(code(dart_mcp::validation::malformed))]
    Malformed { value: String },
}

/// Returns true if `candidate` is exactly 12 ASCII letters or digits.
pub fn is_valid_id(candidate: &str) -> bool {
    candidate.len() == ID_LEN && candidate.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Validate a JSON value as an identifier.
///
/// On success the canonical owned string is returned; callers must use the
/// returned value rather than the input.
pub fn validate_id(value: &Value) -> Result<String, IdError> {
    let Value::String(candidate) = value else {
        return Err(IdError::NotAString);
    };

    if is_valid_id(candidate) {
        Ok(candidate.clone())
    } else {
        Err(IdError::Malformed {
            value: candidate.clone(),
        })
    }
}
