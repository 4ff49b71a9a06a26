pub mod error;
pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod validation;

pub use error::StoreError;
pub use manager::DatabaseManager;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::{ProductRepository, UserRepository};
pub use validation::{EntityKind, FieldError, ValidationFailure};
