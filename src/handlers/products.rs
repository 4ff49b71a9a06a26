//! Owner-scoped product routes.
//!
//! Every handler runs its storage calls one after another and lets any
//! failure propagate as `ApiError`. Handlers that target an existing product
//! report a missing product before checking access; listing a user's
//! products checks access before reporting a missing user.

use axum::extract::{Extension, State};
use tracing::{info, warn};

use crate::app::AppState;
use crate::auth::verify_access;
use crate::database::models::{Product, User};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Caller, JsonPayload, Message, PathId};
use crate::types::RecordId;

/// GET /api/products/user/:user_id - all products of a user, sorted by name
pub async fn get_user_products(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathId(user_id): PathId,
) -> ApiResult<Vec<Product>> {
    let target_id = RecordId::parse_for_lookup(&user_id)?;
    let target = state.users.find_user_by_id(&target_id).await?;

    let current = load_caller(&state, &caller).await?;
    verify_access(current.role, &target_id, &caller.id)?;

    if target.is_none() {
        return Err(ApiError::not_found(format!(
            "User with id of {} does not exist",
            user_id
        )));
    }

    let products = state.products.find_products_by_owner(&target_id).await?;
    Ok(ApiResponse::success(products))
}

/// GET /api/products/:product_id - a single product
pub async fn get_product(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathId(product_id): PathId,
) -> ApiResult<Product> {
    let product = load_product(&state, &product_id).await?;

    let current = load_caller(&state, &caller).await?;
    verify_access(current.role, &product.owner, &caller.id)?;

    Ok(ApiResponse::success(product))
}

/// POST /api/products - create a product owned by the caller
pub async fn create_product(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    JsonPayload(mut payload): JsonPayload,
) -> ApiResult<Message> {
    // The caller always owns what they create
    payload.insert("owner".to_string(), caller.id.canonical().into());

    let product = state.products.create_product(payload).await?;
    info!(product = %product.id, owner = %product.owner, "product created");

    Ok(ApiResponse::created(Message::new("Product Created")))
}

/// PUT|PATCH /api/products/:product_id - change fields of a product
pub async fn edit_product(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathId(product_id): PathId,
    JsonPayload(payload): JsonPayload,
) -> ApiResult<Message> {
    let product = load_product(&state, &product_id).await?;

    let current = load_caller(&state, &caller).await?;
    verify_access(current.role, &product.owner, &caller.id)?;

    state
        .products
        .update_product(&product.id, payload)
        .await?
        .ok_or_else(|| missing_product(&product_id))?;
    info!(product = %product.id, editor = %caller.id, "product updated");

    Ok(ApiResponse::success(Message::new("Product updated")))
}

/// DELETE /api/products/:product_id - remove a product
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathId(product_id): PathId,
) -> ApiResult<Message> {
    let product = load_product(&state, &product_id).await?;

    let current = load_caller(&state, &caller).await?;
    verify_access(current.role, &product.owner, &caller.id)?;

    state.products.delete_product(&product.id).await?;
    info!(product = %product.id, remover = %caller.id, "product deleted");

    Ok(ApiResponse::success(Message::new("Product Deleted")))
}

async fn load_product(state: &AppState, raw_id: &str) -> Result<Product, ApiError> {
    let id = RecordId::parse_for_lookup(raw_id)?;
    state
        .products
        .find_product_by_id(&id)
        .await?
        .ok_or_else(|| missing_product(raw_id))
}

/// The caller's own user record. A token for a user that no longer exists
/// ends in the generic server error.
async fn load_caller(state: &AppState, caller: &Caller) -> Result<User, ApiError> {
    state.users.find_user_by_id(&caller.id).await?.ok_or_else(|| {
        warn!(caller = %caller.id, "authenticated caller has no user record");
        ApiError::unknown(format!("caller {} has no user record", caller.id))
    })
}

fn missing_product(raw_id: &str) -> ApiError {
    ApiError::not_found(format!("Product with id {} does not exist", raw_id))
}
