//! JSON object body extractor.
//!
//! Works like `axum::Json<Map<String, Value>>`, but reports rejections as
//! `ApiError` so malformed bodies are rendered like every other failure.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde_json::{Map, Value};

use crate::error::ApiError;

pub struct JsonPayload(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::bad_request(rejection.body_text()))?;

        match value {
            Value::Object(map) => Ok(JsonPayload(map)),
            _ => Err(ApiError::bad_request("Request body must be a JSON object")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse, routing::post, Router};
    use tower::ServiceExt;

    async fn handler(JsonPayload(map): JsonPayload) -> impl IntoResponse {
        map.len().to_string()
    }

    async fn send(content_type: &str, body: &'static str) -> StatusCode {
        let app = Router::new().route("/", post(handler));
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", content_type)
            .body(Body::from(body))
            .unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn accepts_objects() {
        assert_eq!(send("application/json", r#"{"name":"x"}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_other_bodies_as_bad_requests() {
        assert_eq!(send("application/json", "not json").await, StatusCode::BAD_REQUEST);
        assert_eq!(send("application/json", "[1, 2]").await, StatusCode::BAD_REQUEST);
        assert_eq!(send("text/plain", r#"{"name":"x"}"#).await, StatusCode::BAD_REQUEST);
    }
}
