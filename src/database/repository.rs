use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::database::error::StoreError;
use crate::database::models::{Product, User};
use crate::types::RecordId;

/// Read access to user records. Users are managed elsewhere.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_id(&self, id: &RecordId) -> Result<Option<User>, StoreError>;
}

/// Product persistence. Implementations validate payloads against the
/// product schema before writing anything.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_product_by_id(&self, id: &RecordId) -> Result<Option<Product>, StoreError>;

    /// All products owned by `owner`, sorted by name ascending
    async fn find_products_by_owner(&self, owner: &RecordId) -> Result<Vec<Product>, StoreError>;

    async fn create_product(&self, payload: Map<String, Value>) -> Result<Product, StoreError>;

    /// Apply `payload` to an existing product. `Ok(None)` when it no longer exists.
    async fn update_product(
        &self,
        id: &RecordId,
        payload: Map<String, Value>,
    ) -> Result<Option<Product>, StoreError>;

    async fn delete_product(&self, id: &RecordId) -> Result<(), StoreError>;
}
