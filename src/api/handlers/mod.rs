mod rpc;
mod system;

use serde::Serialize;
use utoipa::ToSchema;

pub use rpc::*;
pub use system::*;

/// Error body for requests rejected before reaching the dispatcher
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invalid token")]
    pub error: String,
}
