pub mod auth;
pub mod json;
pub mod path;
pub mod response;

pub use auth::{jwt_auth_middleware, Caller};
pub use json::JsonPayload;
pub use path::PathId;
pub use response::{ApiResponse, ApiResult, Message};
