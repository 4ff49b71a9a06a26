use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::database::error::StoreError;
use crate::database::models::{Product, User};
use crate::database::repository::{ProductRepository, UserRepository};
use crate::database::validation::{product_for_create, product_for_update};
use crate::types::RecordId;

#[derive(Default)]
struct Tables {
    users: HashMap<RecordId, User>,
    products: HashMap<RecordId, Product>,
}

/// In-process store used when no database is configured, and by tests
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user. Emails are unique, like the `users_email_key` constraint.
    pub async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateKey("users_email_key".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user_by_id(&self, id: &RecordId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn find_product_by_id(&self, id: &RecordId) -> Result<Option<Product>, StoreError> {
        Ok(self.tables.read().await.products.get(id).cloned())
    }

    async fn find_products_by_owner(&self, owner: &RecordId) -> Result<Vec<Product>, StoreError> {
        let tables = self.tables.read().await;
        let mut products: Vec<Product> = tables
            .products
            .values()
            .filter(|p| &p.owner == owner)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn create_product(&self, payload: Map<String, Value>) -> Result<Product, StoreError> {
        let product = Product::create(product_for_create(&payload)?);
        self.tables
            .write()
            .await
            .products
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: &RecordId,
        payload: Map<String, Value>,
    ) -> Result<Option<Product>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(product) = tables.products.get_mut(id) else {
            return Ok(None);
        };
        let fields = product_for_update(product, &payload)?;
        product.apply(fields);
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: &RecordId) -> Result<(), StoreError> {
        self.tables.write().await.products.remove(id);
        Ok(())
    }
}
