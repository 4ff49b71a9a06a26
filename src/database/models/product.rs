use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::validation::ProductFields;
use crate::types::RecordId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: RecordId,
    pub owner: RecordId,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a new product with a fresh id from validated fields
    pub fn create(fields: ProductFields) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            owner: fields.owner,
            name: fields.name,
            price: fields.price,
            description: fields.description,
            category: fields.category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every schema field and bump `updated_at`
    pub fn apply(&mut self, fields: ProductFields) {
        self.owner = fields.owner;
        self.name = fields.name;
        self.price = fields.price;
        self.description = fields.description;
        self.category = fields.category;
        self.updated_at = Utc::now();
    }
}
