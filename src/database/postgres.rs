use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::database::error::StoreError;
use crate::database::models::{Product, User};
use crate::database::repository::{ProductRepository, UserRepository};
use crate::database::validation::{product_for_create, product_for_update};
use crate::types::RecordId;

const USER_COLUMNS: &str = "id, name, email, role, created_at, updated_at";
const PRODUCT_COLUMNS: &str =
    "id, owner, name, price, description, category, created_at, updated_at";

/// PostgreSQL-backed repositories
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a user record. A taken email is a `DuplicateKey`.
    pub async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users ({cols}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {cols}",
            cols = USER_COLUMNS
        );
        let inserted = sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.role.as_str())
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(inserted)
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_user_by_id(&self, id: &RecordId) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl ProductRepository for PgStore {
    async fn find_product_by_id(&self, id: &RecordId) -> Result<Option<Product>, StoreError> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn find_products_by_owner(&self, owner: &RecordId) -> Result<Vec<Product>, StoreError> {
        // Binary collation keeps ordering independent of the database locale
        let sql = format!(
            "SELECT {} FROM products WHERE owner = $1 ORDER BY name COLLATE \"C\" ASC",
            PRODUCT_COLUMNS
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn create_product(&self, payload: Map<String, Value>) -> Result<Product, StoreError> {
        let product = Product::create(product_for_create(&payload)?);

        let sql = format!(
            "INSERT INTO products ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {cols}",
            cols = PRODUCT_COLUMNS
        );
        let inserted = sqlx::query_as::<_, Product>(&sql)
            .bind(product.id)
            .bind(product.owner)
            .bind(&product.name)
            .bind(product.price)
            .bind(&product.description)
            .bind(&product.category)
            .bind(product.created_at)
            .bind(product.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(inserted)
    }

    async fn update_product(
        &self,
        id: &RecordId,
        payload: Map<String, Value>,
    ) -> Result<Option<Product>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let select = format!(
            "SELECT {} FROM products WHERE id = $1 FOR UPDATE",
            PRODUCT_COLUMNS
        );
        let Some(mut product) = sqlx::query_as::<_, Product>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.commit().await?;
            return Ok(None);
        };

        product.apply(product_for_update(&product, &payload)?);

        let update = format!(
            "UPDATE products SET owner = $2, name = $3, price = $4, description = $5, category = $6, \
             updated_at = $7 WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        );
        let updated = sqlx::query_as::<_, Product>(&update)
            .bind(product.id)
            .bind(product.owner)
            .bind(&product.name)
            .bind(product.price)
            .bind(&product.description)
            .bind(&product.category)
            .bind(product.updated_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn delete_product(&self, id: &RecordId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
