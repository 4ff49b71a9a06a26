use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::{
    DatabaseManager, MemoryStore, PgStore, ProductRepository, StoreError, UserRepository,
};
use crate::handlers;
use crate::middleware::jwt_auth_middleware;

/// Which backend the repositories talk to
#[derive(Clone)]
pub enum Storage {
    Postgres(PgPool),
    Memory,
}

impl Storage {
    pub fn name(&self) -> &'static str {
        match self {
            Storage::Postgres(_) => "postgres",
            Storage::Memory => "memory",
        }
    }
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub storage: Storage,
}

impl AppState {
    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self {
            users: store.clone(),
            products: store,
            storage: Storage::Postgres(pool),
        }
    }

    pub fn memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            products: store,
            storage: Storage::Memory,
        }
    }

    /// Connect to the configured database, or fall back to memory when none is set
    pub async fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        if config.database.url.is_none() {
            tracing::warn!("DATABASE_URL not set; products are kept in memory");
            return Ok(Self::memory(MemoryStore::new()));
        }

        let pool = DatabaseManager::connect(&config.database).await?;
        if config.database.run_migrations {
            DatabaseManager::migrate(&pool).await?;
        }
        Ok(Self::postgres(pool))
    }
}

/// Full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/health", get(handlers::health))
        // Protected
        .merge(product_routes())
        .fallback(handlers::route_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Full application router with CORS applied per configuration
pub fn router_with_config(state: AppState, config: &AppConfig) -> Router {
    let router = router(state);
    if !config.security.enable_cors {
        return router;
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    router.layer(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

fn product_routes() -> Router<AppState> {
    use handlers::products;

    Router::new()
        .route("/api/products", post(products::create_product))
        .route("/api/products/user/:user_id", get(products::get_user_products))
        .route(
            "/api/products/:product_id",
            get(products::get_product)
                .put(products::edit_product)
                .patch(products::edit_product)
                .delete(products::delete_product),
        )
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}
