// handlers/mod.rs
//
// Public:    /health
// Protected: /api/products/* (bearer token required, see middleware::auth)
// Anything else falls through to `route_not_found`
use axum::http::{Method, Uri};

use crate::error::ApiError;

pub mod health;
pub mod products;

pub use health::health;
pub use products::{create_product, delete_product, edit_product, get_product, get_user_products};

/// Router fallback for unknown routes
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found(format!("Route {} {} not found", method, uri.path()))
}
