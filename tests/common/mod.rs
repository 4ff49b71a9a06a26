#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use product_api::app::{router, AppState};
use product_api::auth::{generate_jwt, Claims};
use product_api::database::models::User;
use product_api::database::MemoryStore;
use product_api::types::{RecordId, Role};

/// In-process application with three seeded users
pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub alice: User,
    pub bob: User,
    pub admin: User,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let store = MemoryStore::new();
        let alice = store
            .insert_user(User::new("Alice", "alice@example.com", Role::User))
            .await?;
        let bob = store
            .insert_user(User::new("Bob", "bob@example.com", Role::User))
            .await?;
        let admin = store
            .insert_user(User::new("Root", "root@example.com", Role::Admin))
            .await?;

        Ok(Self {
            router: router(AppState::memory(store.clone())),
            store,
            alice,
            bob,
            admin,
        })
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        caller: Option<&RecordId>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(id) = caller {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token_for(id)?));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, json))
    }

    pub async fn get(&self, uri: &str, caller: &RecordId) -> Result<(StatusCode, Value)> {
        self.send(Method::GET, uri, Some(caller), None).await
    }

    pub async fn post(&self, uri: &str, caller: &RecordId, body: Value) -> Result<(StatusCode, Value)> {
        self.send(Method::POST, uri, Some(caller), Some(body)).await
    }

    pub async fn put(&self, uri: &str, caller: &RecordId, body: Value) -> Result<(StatusCode, Value)> {
        self.send(Method::PUT, uri, Some(caller), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, caller: &RecordId) -> Result<(StatusCode, Value)> {
        self.send(Method::DELETE, uri, Some(caller), None).await
    }

    /// Create a product as `caller` and return its id
    pub async fn create_product(&self, caller: &RecordId, name: &str, price: f64) -> Result<RecordId> {
        let (status, _) = self
            .post(
                "/api/products",
                caller,
                serde_json::json!({ "name": name, "price": price }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create returned {}", status);

        let (_, list) = self
            .get(&format!("/api/products/user/{}", caller), caller)
            .await?;
        let id = list
            .as_array()
            .and_then(|items| items.iter().find(|p| p["name"] == name))
            .and_then(|p| p["id"].as_str())
            .and_then(RecordId::parse)
            .ok_or_else(|| anyhow::anyhow!("created product {} not listed", name))?;
        Ok(id)
    }
}

pub fn token_for(id: &RecordId) -> Result<String> {
    Ok(generate_jwt(&Claims::with_expiry(id, 1))?)
}
