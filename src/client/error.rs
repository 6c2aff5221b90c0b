use miette::Diagnostic;
use thiserror::Error;

/// Failures talking to the Dart backend.
#[derive(Error, Diagnostic, Debug)]
pub enum ClientError {
    #[error("Dart API returned {status}: {body}")]
    #[diagnostic(code(dart_mcp::client::api_error))]
    Api { status: u16, body: String },

    #[error("Failed to reach the Dart API: {source}")]
    #[diagnostic(
        code(dart_mcp::client::transport),
        help("Check network access and DART_HOST. Slow backends can be given more time with DART_TIMEOUT_SECS.")
    )]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from the Dart API: {message}")]
    #[diagnostic(code(dart_mcp::client::decode))]
    Decode { message: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode {
                message: e.to_string(),
            }
        } else {
            ClientError::Transport { source: e }
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode {
            message: e.to_string(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
