mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use product_api::types::RecordId;

#[tokio::test]
async fn health_endpoint_is_public() -> Result<()> {
    let app = common::TestApp::new().await?;

    let (status, body) = app.send(Method::GET, "/health", None, None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
    Ok(())
}

#[tokio::test]
async fn product_routes_require_a_bearer_token() -> Result<()> {
    let app = common::TestApp::new().await?;
    let uri = format!("/api/products/user/{}", app.alice.id);

    let (status, body) = app.send(Method::GET, &uri, None, None).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Missing Authorization header" }));
    Ok(())
}

#[tokio::test]
async fn unknown_caller_gets_the_generic_error() -> Result<()> {
    let app = common::TestApp::new().await?;
    let ghost = RecordId::new();
    let uri = format!("/api/products/user/{}", ghost);

    let (status, body) = app.get(&uri, &ghost).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Something went wrong, please try again later." }));
    Ok(())
}
